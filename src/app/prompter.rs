//! Interactive artifact selection
//!
//! When no name or pattern filter is supplied and the session is
//! interactive, the candidate artifacts are offered through a multi-select
//! prompt. Duplicate names (the same artifact name on several runs) are
//! collapsed into a single prompt entry; choosing that entry selects every
//! underlying artifact.

use tracing::debug;

use crate::app::models::Artifact;
use crate::constants::prompt;
use crate::errors::{FetchResult, PromptResult};

/// Capability for asking the user to pick from a list
///
/// Production uses a terminal implementation; tests supply stubs. The
/// returned indices refer to positions in `options`.
pub trait Prompter {
    fn multi_select(&self, message: &str, options: &[String]) -> PromptResult<Vec<usize>>;
}

/// Offer `candidates` through a multi-select and resolve the chosen names
/// back to artifacts
///
/// The display list contains each artifact name once, in order of first
/// appearance. A chosen name selects every candidate carrying it, in
/// candidate order. An empty choice is a valid outcome and yields an empty
/// selection; it is not an error.
///
/// # Errors
///
/// Propagates a failing prompt mechanism as `FetchError::Prompt`.
pub fn select_by_name(
    candidates: &[Artifact],
    prompter: &dyn Prompter,
) -> FetchResult<Vec<Artifact>> {
    let mut options: Vec<String> = Vec::new();
    for artifact in candidates {
        if !options.contains(&artifact.name) {
            options.push(artifact.name.clone());
        }
    }

    debug!(candidates = candidates.len(), options = options.len(), "prompting for artifact selection");

    let chosen = prompter.multi_select(prompt::SELECT_ARTIFACTS, &options)?;

    let wanted: Vec<&String> = chosen.iter().filter_map(|&i| options.get(i)).collect();
    let selected: Vec<Artifact> = candidates
        .iter()
        .filter(|a| wanted.iter().any(|name| **name == a.name))
        .cloned()
        .collect();

    Ok(selected)
}
