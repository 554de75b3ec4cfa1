//! Request item and folder construction.

use crate::extract::aggregate_route;
use crate::types::{
    ImposterConfig, ImposterFolder, PostmanRequest, PostmanUrl, RequestItem, Stub,
};
use tracing::debug;

/// Split a URL path into Postman path segments.
///
/// Leading and trailing slashes are dropped first, so `/` yields one empty segment.
pub fn split_path(path: &str) -> Vec<String> {
    path.trim_matches('/').split('/').map(str::to_string).collect()
}

/// Build the request item for the stub at `index` (zero-based).
pub fn build_request_item(
    config: &ImposterConfig,
    host: &str,
    index: usize,
    stub: &Stub,
) -> RequestItem {
    let route = aggregate_route(&stub.predicates);

    let (name, path) = match route.path {
        Some(path) => (format!("{} {path}", route.method), path),
        None => (format!("Stub {} (Root)", index + 1), "/".to_string()),
    };

    let port = config.port.to_string();
    let raw = format!("{}://{host}:{port}{path}", config.protocol);

    RequestItem {
        name,
        request: PostmanRequest {
            method: route.method,
            url: PostmanUrl {
                raw,
                protocol: config.protocol.clone(),
                host: vec![host.to_string()],
                port,
                path: split_path(&path),
            },
        },
    }
}

/// Build the folder for an imposter, one request per stub in declaration order.
pub fn build_folder(config: &ImposterConfig, host: &str) -> ImposterFolder {
    let name = config.display_name();
    let item = config
        .stubs
        .iter()
        .enumerate()
        .map(|(idx, stub)| {
            let request = build_request_item(config, host, idx, stub);
            debug!("{name}: {} -> {}", request.name, request.request.url.raw);
            request
        })
        .collect();

    ImposterFolder { name, item }
}
