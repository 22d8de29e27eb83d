//! Run configuration: which tree to rewrite, which files, and which rules.
//!
//! Nothing is read implicitly. Unset values fall back to the built-in
//! seatrans migration (`src/main/java`, `*.java`, built-in table).

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rewrite::{builtin_rules, PatternTable, RuleSpec};
use crate::utils::{io, validation};

pub const DEFAULT_ROOT: &str = "src/main/java";
pub const DEFAULT_EXTENSION: &str = "java";

/// Where the pattern table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSource {
    Builtin,
    File { path: String },
}

#[derive(Debug, Clone)]
pub struct RewriteConfig {
    pub root: PathBuf,
    pub extension: String,
    pub rules: RuleSource,
}

impl RewriteConfig {
    /// Resolve CLI-provided values against the defaults and validate them.
    pub fn resolve(root: Option<&str>, extension: Option<&str>, rules: Option<&str>) -> Result<Self> {
        let root = expand_path(root.unwrap_or(DEFAULT_ROOT), "root")?;
        let root = validation::require_dir(&root, "root")?;
        let extension = normalize_extension(extension.unwrap_or(DEFAULT_EXTENSION))?;

        Ok(Self {
            root,
            extension,
            rules: RuleSource::from_arg(rules)?,
        })
    }

    pub fn load_table(&self) -> Result<PatternTable> {
        self.rules.load_table()
    }
}

impl RuleSource {
    /// `--rules <file>` when given, the built-in table otherwise.
    pub fn from_arg(path: Option<&str>) -> Result<Self> {
        Ok(match path {
            Some(path) => RuleSource::File {
                path: expand_path(path, "rules")?.display().to_string(),
            },
            None => RuleSource::Builtin,
        })
    }

    /// Uncompiled rules, in application order.
    pub fn specs(&self) -> Result<Vec<RuleSpec>> {
        match self {
            RuleSource::Builtin => Ok(builtin_rules()),
            RuleSource::File { path } => load_rules_file(Path::new(path)),
        }
    }

    /// Compile the table. Any invalid pattern fails here, before any file
    /// is touched.
    pub fn load_table(&self) -> Result<PatternTable> {
        PatternTable::compile(&self.specs()?)
    }
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references.
pub fn expand_path(raw: &str, field: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|e| {
        Error::validation_invalid_argument(field, e.to_string(), Some(raw.to_string()))
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Accept `java` or `.java`; reject empty input.
pub fn normalize_extension(raw: &str) -> Result<String> {
    let ext = validation::require_non_empty(raw, "ext", "Extension cannot be empty")?;
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        return Err(Error::validation_invalid_argument(
            "ext",
            "Extension cannot be empty",
            Some(raw.to_string()),
        ));
    }
    Ok(ext.to_string())
}

/// Read a JSON rules file: an array of `{ "pattern", "replacement", "note"? }`.
pub fn load_rules_file(path: &Path) -> Result<Vec<RuleSpec>> {
    let content = io::read_text(path)?;
    parse_rules(&content, &path.display().to_string())
}

pub fn parse_rules(json: &str, source: &str) -> Result<Vec<RuleSpec>> {
    let rules: Vec<RuleSpec> =
        serde_json::from_str(json).map_err(|e| Error::config_invalid_json(source, e))?;

    if rules.is_empty() {
        return Err(Error::config_invalid_value(
            "rules",
            Some(source.to_string()),
            "Rules file contains no rules",
        ));
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn normalize_extension_strips_leading_dot() {
        assert_eq!(normalize_extension(".java").unwrap(), "java");
        assert_eq!(normalize_extension("kt").unwrap(), "kt");
        assert!(normalize_extension(".").is_err());
        assert!(normalize_extension("  ").is_err());
    }

    #[test]
    fn parse_rules_reads_optional_note() {
        let rules = parse_rules(
            r#"[
                {"pattern": "import a\\.B;", "replacement": "import c.B;"},
                {"pattern": "import a\\.\\*;", "replacement": "import c.*;", "note": "check"}
            ]"#,
            "rules.json",
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].pattern, r"import a\.B;");
        assert!(rules[0].note.is_none());
        assert_eq!(rules[1].note.as_deref(), Some("check"));
    }

    #[test]
    fn parse_rules_rejects_wrong_shape() {
        let err = parse_rules(r#"{"pattern": "x"}"#, "rules.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn parse_rules_rejects_empty_list() {
        let err = parse_rules("[]", "rules.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn rule_source_from_arg_expands_tilde() {
        assert_eq!(RuleSource::from_arg(None).unwrap(), RuleSource::Builtin);
        match RuleSource::from_arg(Some("~/rules.json")).unwrap() {
            RuleSource::File { path } => {
                assert!(path.ends_with("rules.json"));
                assert!(!path.starts_with('~'));
            }
            RuleSource::Builtin => panic!("expected file source"),
        }
    }

    #[test]
    fn expand_path_substitutes_environment_variables() {
        let home = std::env::var("HOME").unwrap();
        assert_eq!(
            expand_path("$HOME/src", "root").unwrap(),
            Path::new(&home).join("src")
        );
    }

    #[test]
    fn expand_path_rejects_unset_variable() {
        let err = expand_path("$IMPORT_REWRITE_UNSET_VAR/src", "root").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "root");
    }

    #[test]
    fn resolve_defaults_to_builtin_rules() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let config = RewriteConfig::resolve(Some(root.as_str()), None, None).unwrap();
        assert_eq!(config.extension, DEFAULT_EXTENSION);
        assert_eq!(config.rules, RuleSource::Builtin);
        assert_eq!(config.load_table().unwrap().len(), builtin_rules().len());
    }

    #[test]
    fn resolve_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing").to_string_lossy().to_string();

        let err = RewriteConfig::resolve(Some(missing.as_str()), None, None).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn load_table_fails_on_invalid_pattern_in_file() {
        let dir = TempDir::new().unwrap();
        let rules = dir.path().join("rules.json");
        std::fs::write(&rules, r#"[{"pattern": "(open", "replacement": "x"}]"#).unwrap();
        let root = dir.path().to_string_lossy().to_string();
        let rules = rules.to_string_lossy().to_string();

        let config =
            RewriteConfig::resolve(Some(root.as_str()), Some("java"), Some(rules.as_str())).unwrap();

        let err = config.load_table().unwrap_err();
        assert_eq!(err.code.as_str(), "rewrite.invalid_pattern");
    }
}
