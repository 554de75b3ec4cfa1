//! Path and method extraction from stub predicates.

use crate::types::{Operator, Predicate};

/// Operators consulted for a path, in priority order.
pub const PATH_OPERATORS: [Operator; 6] = [
    Operator::Equals,
    Operator::DeepEquals,
    Operator::Contains,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Matches,
];

/// Operators consulted for a method, in priority order.
pub const METHOD_OPERATORS: [Operator; 3] =
    [Operator::Equals, Operator::Matches, Operator::StartsWith];

/// Method used when no predicate names one.
pub const DEFAULT_METHOD: &str = "GET";

/// Route derived from a stub's predicate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Last non-empty path found, if any.
    pub path: Option<String>,
    pub method: String,
}

/// Path of the first operator, by priority, that carries one.
///
/// The first hit wins even if it is an empty string.
pub fn extract_path(predicate: &Predicate) -> Option<&str> {
    PATH_OPERATORS
        .iter()
        .filter_map(|op| predicate.operator(*op))
        .find_map(|fields| fields.path.as_deref())
}

/// Method of the first operator, by priority, that carries one, else `GET`.
pub fn extract_method(predicate: &Predicate) -> &str {
    METHOD_OPERATORS
        .iter()
        .filter_map(|op| predicate.operator(*op))
        .find_map(|fields| fields.method.as_deref())
        .unwrap_or(DEFAULT_METHOD)
}

/// Fold a stub's predicates into a single route.
///
/// Path: the last non-empty path wins. Method: the last value that differs
/// from the literal `GET` wins, so an explicit `GET` never replaces a method
/// found earlier.
pub fn aggregate_route(predicates: &[Predicate]) -> Route {
    let mut path = None;
    let mut method = DEFAULT_METHOD;

    for predicate in predicates {
        if let Some(p) = extract_path(predicate).filter(|p| !p.is_empty()) {
            path = Some(p);
        }

        let m = extract_method(predicate);
        if m != DEFAULT_METHOD {
            method = m;
        }
    }

    Route {
        path: path.map(str::to_string),
        method: method.to_string(),
    }
}
