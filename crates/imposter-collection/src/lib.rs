//! Postman collection generator for Mountebank imposter templates.
//!
//! Reads every `*.ejs` imposter template in a directory, strips `//` line
//! comments, parses the remainder as an imposter configuration and turns each
//! stub into a Postman request. Each imposter becomes a folder in a single
//! Postman Collection v2.1 document.
//!
//! # Example
//!
//! ```no_run
//! use imposter_collection::{generate_collection, write_collection, GenerateOptions};
//!
//! let options = GenerateOptions::default();
//! let (collection, report) = generate_collection(&options)?;
//! write_collection(&options.output, &collection)?;
//!
//! for skipped in &report.skipped {
//!     eprintln!("{}: {}", skipped.file.display(), skipped.reason);
//! }
//! # Ok::<(), imposter_collection::CollectionError>(())
//! ```

mod assembler;
mod builder;
mod extract;
mod loader;
mod types;

// Re-export public types
pub use types::{
    CollectionError, GenerateOptions, GenerateReport, ImposterConfig, ImposterFolder, Operator,
    PostmanCollection, PostmanInfo, PostmanRequest, PostmanUrl, Predicate, PredicateFields,
    RequestItem, SkipReason, SkippedTemplate, Stub, COLLECTION_NAME, POSTMAN_SCHEMA,
    SUPPORTED_PROTOCOLS,
};

pub use assembler::{
    collect_templates, generate_collection, render_collection, run, write_collection,
};
pub use builder::{build_folder, build_request_item, split_path};
pub use extract::{
    aggregate_route, extract_method, extract_path, Route, DEFAULT_METHOD, METHOD_OPERATORS,
    PATH_OPERATORS,
};
pub use loader::{load_template, parse_template, strip_comments, Template};
