//! Artifact filtering logic
//!
//! Pure selection of the artifacts to download: expired artifacts are
//! excluded first, then the survivors are filtered by exact names and
//! glob-style patterns. The returned slice preserves listing order.

use regex::Regex;

use crate::app::models::Artifact;
use crate::errors::{FetchError, FetchResult};

/// Filter a listing down to the artifacts selected by `names` and `patterns`
///
/// Expired artifacts are discarded before any name or pattern is consulted.
/// With both filter lists empty, every non-expired artifact matches (the
/// "download everything" and "prompt candidates" modes). Otherwise an
/// artifact matches when its name appears verbatim in `names` or satisfies
/// any pattern in `patterns` as a whole-name glob.
///
/// # Errors
///
/// Returns `FetchError::NoValidArtifacts` when every candidate is expired,
/// and `FetchError::NoMatch` when non-empty filters select nothing.
pub fn match_artifacts(
    artifacts: &[Artifact],
    names: &[String],
    patterns: &[String],
) -> FetchResult<Vec<Artifact>> {
    let candidates: Vec<Artifact> = artifacts.iter().filter(|a| !a.expired).cloned().collect();
    if candidates.is_empty() {
        return Err(FetchError::NoValidArtifacts);
    }

    if names.is_empty() && patterns.is_empty() {
        return Ok(candidates);
    }

    let globs: Vec<Regex> = patterns.iter().map(|p| compile_glob(p)).collect();
    let matched: Vec<Artifact> = candidates
        .into_iter()
        .filter(|a| {
            names.iter().any(|n| n == &a.name) || globs.iter().any(|g| g.is_match(&a.name))
        })
        .collect();

    if matched.is_empty() {
        return Err(FetchError::NoMatch);
    }

    Ok(matched)
}

/// Compile a shell-style glob into an anchored regex
///
/// `*` matches any run of characters, `?` matches exactly one character,
/// everything else is literal. Artifact names are flat, so no path
/// separator gets special treatment.
fn compile_glob(pattern: &str) -> Regex {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    let mut buf = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            ch => source.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
        }
    }
    source.push('$');

    // Every non-wildcard character is escaped above, so the source is
    // always a valid pattern.
    Regex::new(&source).expect("escaped glob should compile")
}
