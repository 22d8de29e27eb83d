//! Import rewriting: fold an ordered regex table over a source tree.
//!
//! Walks every file with the target extension, applies each rule's
//! replace-all in table order, and overwrites the file only when the content
//! changed.

mod engine;
mod rule;
mod table;
mod walk;

pub use engine::{
    commit, load, rewrite_tree, transform, FileUpdate, RewriteResult, RewriteWarning,
};
pub use rule::{PatternRule, PatternTable, RuleConflict, RuleHit, RuleSpec, Transform};
pub use table::{builtin_rules, Relocation, BASE_PACKAGE, RELOCATIONS, WILDCARD_NOTE};
pub use walk::{eligible_files, enumerate, is_eligible};
