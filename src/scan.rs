use std::path::PathBuf;
use tracing::debug;

/// Finds each unit's per-unit index fragment at its fixed relative path.
/// Units without a fragment are omitted; a failed or empty conversion
/// legitimately produces none.
pub fn find_fragments(units: &[PathBuf], fragment_filename: &str) -> Vec<PathBuf> {
    let mut fragments = Vec::new();
    for unit in units {
        let candidate = unit.join(fragment_filename);
        if candidate.is_file() {
            fragments.push(candidate);
        } else {
            debug!("no fragment in {}", unit.display());
        }
    }
    fragments
}
