//! Directory scan and collection assembly.

use crate::builder::build_folder;
use crate::loader::{load_template, Template};
use crate::types::{
    CollectionError, GenerateOptions, GenerateReport, PostmanCollection, SkipReason,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Collect candidate template files (non-recursive), sorted by path.
///
/// Hidden files, non-regular files and the excluded template are left out.
/// A missing path, or one that is not a directory, yields no templates
/// rather than an error.
pub fn collect_templates(options: &GenerateOptions) -> Result<Vec<PathBuf>, CollectionError> {
    let dir = &options.templates_dir;
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            warn!("Template path {} is not a directory", dir.display());
            return Ok(Vec::new());
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Template directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CollectionError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    }

    let entries = std::fs::read_dir(dir).map_err(|source| CollectionError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CollectionError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if is_candidate(&path, options) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_candidate(path: &Path, options: &GenerateOptions) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    path.is_file()
        && !file_name.starts_with('.')
        && file_name != options.excluded_file
        && path
            .extension()
            .is_some_and(|ext| ext == options.template_extension.as_str())
}

/// Build the collection from every template in the configured directory.
///
/// Malformed templates and non-HTTP imposters are skipped and recorded in
/// the report; I/O failures abort the run.
pub fn generate_collection(
    options: &GenerateOptions,
) -> Result<(PostmanCollection, GenerateReport), CollectionError> {
    let mut collection = PostmanCollection::new();
    let mut report = GenerateReport::new();

    for file in collect_templates(options)? {
        let file_name = file
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        info!("Processing {file_name}...");

        let config = match load_template(&file)? {
            Template::Imposter(config) => config,
            Template::Malformed(e) => {
                report.skip(&file, SkipReason::Malformed(e));
                continue;
            }
        };

        if !config.is_supported_protocol() {
            let reason = SkipReason::UnsupportedProtocol(config.protocol.clone());
            warn!("Skipping {file_name}: {reason}");
            report.skip(&file, reason);
            continue;
        }

        report.processed.push(file);

        let folder = build_folder(&config, &options.host);
        if folder.item.is_empty() {
            debug!("{file_name}: no stubs, folder dropped");
            continue;
        }

        report.folders += 1;
        report.requests += folder.item.len();
        collection.item.push(folder);
    }

    Ok((collection, report))
}

/// Serialize a collection as JSON indented by four spaces.
pub fn render_collection(collection: &PostmanCollection) -> Result<Vec<u8>, CollectionError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    collection.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write a collection to `path`, replacing any previous file.
pub fn write_collection(path: &Path, collection: &PostmanCollection) -> Result<(), CollectionError> {
    let content = render_collection(collection)?;
    std::fs::write(path, content).map_err(|source| CollectionError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate the collection and write it to the configured output file.
pub fn run(options: &GenerateOptions) -> Result<GenerateReport, CollectionError> {
    let (collection, report) = generate_collection(options)?;
    write_collection(&options.output, &collection)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn options_for(dir: &Path) -> GenerateOptions {
        GenerateOptions {
            templates_dir: dir.to_path_buf(),
            output: dir.join("out.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_templates_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.ejs", "a.ejs", "imposters.ejs", "notes.txt", ".hidden.ejs"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.ejs")).unwrap();

        let files = collect_templates(&options_for(dir.path())).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.ejs", "b.ejs"]);
    }

    #[test]
    fn test_collect_templates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let files = collect_templates(&options_for(&dir.path().join("absent"))).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_templates_file_path_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("templates.ejs");
        fs::write(&file, "{}").unwrap();

        let files = collect_templates(&options_for(&file)).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_render_uses_four_space_indent() {
        let rendered = String::from_utf8(render_collection(&PostmanCollection::new()).unwrap())
            .unwrap();
        let expected = concat!(
            "{\n",
            "    \"info\": {\n",
            "        \"name\": \"Mountebank Stubs\",\n",
            "        \"schema\": \"https://schema.getpostman.com/json/collection/v2.1.0/collection.json\"\n",
            "    },\n",
            "    \"item\": []\n",
            "}"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_write_collection_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.json");
        let err = write_collection(&path, &PostmanCollection::new()).unwrap_err();
        assert!(matches!(err, CollectionError::WriteOutput { .. }));
    }
}
