//! Fix engine for hebfix passes.
//!
//! Responsibilities:
//! - Discover `.html` files under the configured roots.
//! - Apply the substitution table to file content via non-overlapping span
//!   detection against the original text.
//! - Write changed files back (or render a diff for dry runs).
//! - Capture per-file failures as outcomes instead of aborting the run.

pub mod error;
mod scan;
pub mod table;

pub use scan::{discover_html, DEFAULT_ROOTS};

use camino::Utf8Path;
use diffy::PatchFormatter;
use fs_err as fs;
use hebfix_types::outcome::{FileOutcome, FileStatus, RuleHit};
use hebfix_types::rule::Substitution;
use sha2::{Digest, Sha256};

use crate::error::FixError;

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Compute outcomes without writing anything back.
    pub dry_run: bool,
}

/// The result of one substitution pass over a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Hits in table order; rules with zero occurrences are omitted.
    pub hits: Vec<RuleHit>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        !self.hits.is_empty()
    }

    pub fn replacements(&self) -> u64 {
        self.hits.iter().map(|h| h.occurrences).sum()
    }
}

/// Apply `table` to `content`.
///
/// Candidate spans are located in the original content for every rule first,
/// then resolved leftmost-first; spans sharing a start offset resolve to the
/// longest garbled match, remaining ties to the earliest table entry. A
/// claimed span never re-matches, so one rule's output cannot feed another
/// rule's input. This is what keeps a table with nested garbled fragments
/// (see [`table::audit`]) correct.
pub fn rewrite(content: &str, table: &[Substitution]) -> Rewrite {
    // (start, end, table index)
    let mut candidates: Vec<(usize, usize, usize)> = Vec::new();
    for (idx, sub) in table.iter().enumerate() {
        if sub.garbled.is_empty() {
            continue;
        }
        for (start, matched) in content.match_indices(sub.garbled) {
            candidates.push((start, start + matched.len(), idx));
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));

    let mut counts = vec![0u64; table.len()];
    let mut text = String::with_capacity(content.len());
    let mut cursor = 0usize;
    for (start, end, idx) in candidates {
        if start < cursor {
            // Overlaps a span already claimed by an earlier/longer match.
            continue;
        }
        text.push_str(&content[cursor..start]);
        text.push_str(table[idx].corrected);
        counts[idx] += 1;
        cursor = end;
    }
    text.push_str(&content[cursor..]);

    let hits = table
        .iter()
        .zip(&counts)
        .filter(|&(_, &n)| n > 0)
        .map(|(sub, &n)| RuleHit {
            rule_id: sub.id.to_string(),
            occurrences: n,
        })
        .collect();

    Rewrite { text, hits }
}

/// Process one file: read, rewrite, and (unless dry-run) write back when
/// anything matched. Failures become the outcome; they never propagate.
pub fn fix_file(path: &Utf8Path, table: &[Substitution], opts: &ApplyOptions) -> FileOutcome {
    match try_fix_file(path, table, opts) {
        Ok(outcome) => outcome,
        Err(e) => FileOutcome::failed(path.to_path_buf(), e.to_string()),
    }
}

fn try_fix_file(
    path: &Utf8Path,
    table: &[Substitution],
    opts: &ApplyOptions,
) -> Result<FileOutcome, FixError> {
    let before = read_utf8(path)?;

    let rewrite = rewrite(&before, table);
    if !rewrite.changed() {
        // Not even a byte-identical rewrite: an untouched file keeps its mtime.
        return Ok(FileOutcome::clean(
            path.to_path_buf(),
            table::residual_markers(&before),
        ));
    }

    if !opts.dry_run {
        fs::write(path, rewrite.text.as_bytes())?;
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        status: FileStatus::Fixed,
        replacements: rewrite.replacements(),
        sha256_before: Some(sha256_hex(before.as_bytes())),
        sha256_after: Some(sha256_hex(rewrite.text.as_bytes())),
        residual_markers: table::residual_markers(&rewrite.text),
        hits: rewrite.hits,
        message: None,
    })
}

/// Render a unified diff of what a fix pass would change in `path`.
///
/// Reads and rewrites the file again rather than threading content through
/// [`fix_file`]; dry runs are not the hot path.
pub fn preview_patch(path: &Utf8Path, table: &[Substitution]) -> Result<String, FixError> {
    let before = read_utf8(path)?;
    let rewrite = rewrite(&before, table);
    Ok(render_patch(path, &before, &rewrite.text))
}

fn read_utf8(path: &Utf8Path) -> Result<String, FixError> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| FixError::Decode {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    let formatter = PatchFormatter::new();

    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    out.push_str(&formatter.fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{substitution, SUBSTITUTIONS};
    use pretty_assertions::assert_eq;

    #[test]
    fn rewrite_replaces_all_occurrences_and_counts_them() {
        let sub = substitution("login.email_label").unwrap();
        let content = format!("<label>{0}</label><span>{0}</span>", sub.garbled);

        let rewrite = rewrite(&content, SUBSTITUTIONS);

        assert_eq!(
            rewrite.text,
            format!("<label>{0}</label><span>{0}</span>", sub.corrected)
        );
        assert_eq!(rewrite.hits.len(), 1);
        assert_eq!(rewrite.hits[0].rule_id, "login.email_label");
        assert_eq!(rewrite.hits[0].occurrences, 2);
        assert_eq!(rewrite.replacements(), 2);
    }

    #[test]
    fn rewrite_leaves_unmatched_content_byte_identical() {
        let content = "<html><body>שלום עולם</body></html>";
        let rewrite = rewrite(content, SUBSTITUTIONS);
        assert_eq!(rewrite.text, content);
        assert!(!rewrite.changed());
    }

    #[test]
    fn nested_garbled_fragment_resolves_to_the_longer_rule() {
        // The confirm-password label contains the password label as a suffix.
        // The longer span must win; sequential replace-all would strand the
        // prefix half-garbled.
        let confirm = substitution("login.confirm_password_label").unwrap();
        let content = format!("<label>{}</label>", confirm.garbled);

        let rewrite = rewrite(&content, SUBSTITUTIONS);

        assert_eq!(rewrite.text, format!("<label>{}</label>", confirm.corrected));
        assert_eq!(rewrite.hits.len(), 1);
        assert_eq!(rewrite.hits[0].rule_id, "login.confirm_password_label");
    }

    #[test]
    fn inner_fragment_still_matches_on_its_own() {
        let password = substitution("login.password_label").unwrap();
        let content = format!("<label>{}</label>", password.garbled);

        let rewrite = rewrite(&content, SUBSTITUTIONS);

        assert_eq!(rewrite.text, format!("<label>{}</label>", password.corrected));
        assert_eq!(rewrite.hits[0].rule_id, "login.password_label");
    }

    #[test]
    fn rewrite_is_idempotent_on_its_own_output() {
        let sub = substitution("login.forgot_password").unwrap();
        let content = format!("<a href=\"#\">{}</a>", sub.garbled);

        let once = rewrite(&content, SUBSTITUTIONS);
        let twice = rewrite(&once.text, SUBSTITUTIONS);

        assert_eq!(twice.text, once.text);
        assert!(!twice.changed());
    }

    #[test]
    fn same_start_ties_break_to_the_longest_match() {
        let table = &[
            Substitution {
                id: "short",
                garbled: "ab",
                corrected: "S",
            },
            Substitution {
                id: "long",
                garbled: "abc",
                corrected: "L",
            },
        ];

        let rewrite = rewrite("abc ab", table);
        assert_eq!(rewrite.text, "L S");
        assert_eq!(rewrite.hits.len(), 2);
    }

    #[test]
    fn equal_length_ties_break_to_table_order() {
        let table = &[
            Substitution {
                id: "first",
                garbled: "xy",
                corrected: "1",
            },
            Substitution {
                id: "also-xy",
                garbled: "xy",
                corrected: "2",
            },
        ];

        let rewrite = rewrite("xy", table);
        assert_eq!(rewrite.text, "1");
        assert_eq!(rewrite.hits.len(), 1);
        assert_eq!(rewrite.hits[0].rule_id, "first");
    }

    #[test]
    fn render_patch_is_empty_for_identical_content() {
        assert_eq!(render_patch(Utf8Path::new("a.html"), "same", "same"), "");
    }

    #[test]
    fn render_patch_frames_the_file_path() {
        let patch = render_patch(Utf8Path::new("public/a.html"), "old\n", "new\n");
        assert!(patch.starts_with("diff --git a/public/a.html b/public/a.html\n"));
        assert!(patch.contains("--- a/public/a.html"));
        assert!(patch.contains("+++ b/public/a.html"));
        assert!(patch.contains("-old"));
        assert!(patch.contains("+new"));
    }
}
