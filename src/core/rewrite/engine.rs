//! Tree rewriter: load, transform and conditionally commit each eligible file.
//!
//! Files are handled one at a time: fully read, folded through the table, and
//! written back only when the content changed. The first error aborts the run;
//! files committed before it stay rewritten.

use serde::Serialize;
use std::path::Path;

use super::rule::{PatternTable, RuleHit, Transform};
use super::walk;
use crate::error::Result;
use crate::utils::io;

// ============================================================================
// Types
// ============================================================================

/// A file that was rewritten.
#[derive(Debug, Clone, Serialize)]
pub struct FileUpdate {
    /// File path relative to root.
    pub file: String,
    /// Total replacements across all rules.
    pub replacements: usize,
    /// Per-rule replacement counts, in table order.
    pub rules: Vec<RuleHit>,
}

/// A flagged rule fired somewhere in the tree.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteWarning {
    pub kind: String,
    /// File path relative to root.
    pub file: String,
    pub rule: usize,
    pub message: String,
}

/// Summary of one pass over a tree.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteResult {
    pub root: String,
    pub extension: String,
    pub files_scanned: usize,
    pub updated: Vec<FileUpdate>,
    pub warnings: Vec<RewriteWarning>,
    pub total_replacements: usize,
}

// ============================================================================
// Per-file operations
// ============================================================================

/// Read the full content of a file as UTF-8.
pub fn load(path: &Path) -> Result<String> {
    io::read_text(path)
}

/// Apply the whole table to already-loaded content.
pub fn transform(table: &PatternTable, content: &str) -> Transform {
    table.apply(content)
}

/// Overwrite `path` when the transformed content differs from the original.
///
/// Returns whether a write happened.
pub fn commit(path: &Path, original: &str, transformed: &Transform) -> Result<bool> {
    if transformed.content == original {
        return Ok(false);
    }

    io::write_file(
        path,
        &transformed.content,
        &format!("write {}", path.display()),
    )?;
    Ok(true)
}

// ============================================================================
// Tree pass
// ============================================================================

/// Rewrite every file under `root` whose name ends with `.<extension>`.
///
/// `on_update` is called with the full path of each file just before it is
/// overwritten.
pub fn rewrite_tree(
    root: &Path,
    extension: &str,
    table: &PatternTable,
    mut on_update: impl FnMut(&Path),
) -> Result<RewriteResult> {
    crate::log_status!("rewrite", "Scanning {} for *.{}", root.display(), extension);

    let files = walk::eligible_files(root, extension)?;
    let mut updated = Vec::new();
    let mut warnings = Vec::new();

    for path in &files {
        let original = load(path)?;
        let transformed = transform(table, &original);

        if transformed.content == original {
            continue;
        }

        on_update(path);
        commit(path, &original, &transformed)?;

        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        for hit in &transformed.hits {
            let Some(note) = table.rules().get(hit.rule).and_then(|r| r.note.as_ref()) else {
                continue;
            };
            warnings.push(RewriteWarning {
                kind: "flagged_rule".to_string(),
                file: relative.clone(),
                rule: hit.rule,
                message: note.clone(),
            });
        }

        updated.push(FileUpdate {
            file: relative,
            replacements: transformed.replacements(),
            rules: transformed.hits,
        });
    }

    let total_replacements: usize = updated.iter().map(|u| u.replacements).sum();
    crate::log_status!(
        "rewrite",
        "{} of {} files updated ({} replacements)",
        updated.len(),
        files.len(),
        total_replacements
    );

    Ok(RewriteResult {
        root: root.display().to_string(),
        extension: extension.to_string(),
        files_scanned: files.len(),
        updated,
        warnings,
        total_replacements,
    })
}

// ============================================================================
// Tests
// ============================================================================
