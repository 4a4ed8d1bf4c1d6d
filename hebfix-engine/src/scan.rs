use anyhow::Context;
use camino::Utf8PathBuf;
use glob::glob;
use tracing::debug;

/// Directory trees the fixer repairs by default, relative to the invocation
/// directory: the served site and the page-creator assets.
pub const DEFAULT_ROOTS: &[&str] = &["public", "page-creator"];

/// Enumerate `.html` files under each root, recursively.
///
/// Roots keep their given order; matches within a root are sorted. A root
/// that does not exist simply contributes no files.
pub fn discover_html(roots: &[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();

    for root in roots {
        let pattern = root.join("**").join("*.html");
        let pattern_str = pattern.as_str();

        debug!(pattern = %pattern_str, "scanning for html files");

        let mut matched = Vec::new();
        for entry in glob(pattern_str).with_context(|| format!("glob {pattern_str}"))? {
            let path = match entry {
                Ok(p) => p,
                Err(e) => {
                    debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            matched.push(Utf8PathBuf::from(path.to_string_lossy().into_owned()));
        }

        // Deterministic order matters.
        matched.sort();
        out.extend(matched);
    }

    Ok(out)
}
