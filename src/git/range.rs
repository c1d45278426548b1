//! Commit range resolution.

/// Symbolic reference for the most recent state of the repository.
pub const HEAD: &str = "HEAD";

/// Build a git range expression from optional first/last commit boundaries.
///
/// - neither given: `HEAD`
/// - only `last`: `last` (everything up to and including it)
/// - only `first`: `first..HEAD`
/// - both: `first..last`
///
/// Inputs are passed through as-is; git validates them when the command runs.
pub fn resolve_range(first: Option<&str>, last: Option<&str>) -> String {
    match (first, last) {
        (None, None) => HEAD.to_string(),
        (None, Some(last)) => last.to_string(),
        (Some(first), None) => format!("{}..{}", first, HEAD),
        (Some(first), Some(last)) => format!("{}..{}", first, last),
    }
}
