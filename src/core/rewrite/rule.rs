//! Pattern rules and the ordered table that folds them over file content.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// An uncompiled rule, as written in the built-in table or a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regular expression to search for.
    pub pattern: String,
    /// Replacement template; `${1}` style group references are expanded.
    pub replacement: String,
    /// Set when the mapping is known to be imprecise and should be reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            note: None,
        }
    }

    pub fn flagged(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A compiled rule with its position in the table.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub index: usize,
    regex: Regex,
    pub replacement: String,
    pub note: Option<String>,
}

impl PatternRule {
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Replace every non-overlapping match in `text`, returning the new text
    /// and how many matches were replaced.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut count = 0;
        let replaced = self.regex.replace_all(text, |caps: &Captures| {
            count += 1;
            let mut dst = String::new();
            caps.expand(&self.replacement, &mut dst);
            dst
        });
        (replaced.into_owned(), count)
    }
}

/// How many replacements a single rule made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: usize,
    pub replacements: usize,
}

/// Result of folding a table over one piece of text.
#[derive(Debug, Clone)]
pub struct Transform {
    pub content: String,
    pub hits: Vec<RuleHit>,
}

impl Transform {
    pub fn replacements(&self) -> usize {
        self.hits.iter().map(|h| h.replacements).sum()
    }
}

/// A rule whose output is matched by some pattern in the table.
///
/// Any conflict means a second run over already-rewritten files is not a no-op.
/// Outputs of rules that reference capture groups are only sampled, so an empty
/// conflict list proves nothing for them; see [`PatternTable::unverified`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleConflict {
    /// Rule producing the output.
    pub rule: usize,
    /// Rule whose pattern matches that output.
    pub matched_by: usize,
    /// Sample output that was matched (group references filled with a sample word).
    pub output: String,
}

// ============================================================================
// Table
// ============================================================================

/// Ordered, immutable list of compiled rules.
///
/// Later rules see the output of earlier ones, so order is part of the table's meaning.
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    /// Compile every rule up front. The first invalid pattern fails the whole table.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let regex = Regex::new(&spec.pattern)
                    .map_err(|e| Error::rewrite_invalid_pattern(index, &spec.pattern, &e))?;
                Ok(PatternRule {
                    index,
                    regex,
                    replacement: spec.replacement.clone(),
                    note: spec.note.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// The compiled built-in seatrans table.
    pub fn builtin() -> Result<Self> {
        Self::compile(&super::table::builtin_rules())
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order, each scanning the output of the previous one.
    pub fn apply(&self, text: &str) -> Transform {
        let mut content = text.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let (next, replacements) = rule.apply(&content);
            if replacements > 0 {
                hits.push(RuleHit {
                    rule: rule.index,
                    replacements,
                });
                content = next;
            }
        }

        Transform { content, hits }
    }

    /// Check every ordered rule pair, including a rule against itself, for
    /// output that another pattern would match again.
    ///
    /// Group references are filled with a placeholder and with every word that
    /// appears in the table's own patterns and replacements. At most one
    /// conflict is reported per pair.
    pub fn conflicts(&self) -> Vec<RuleConflict> {
        let fillers = self.sample_words();
        let mut conflicts = Vec::new();

        for producer in &self.rules {
            let outputs: Vec<String> = if has_group_refs(&producer.replacement) {
                fillers
                    .iter()
                    .map(|word| sample_output(&producer.replacement, word))
                    .collect()
            } else {
                vec![sample_output(&producer.replacement, GROUP_PLACEHOLDER)]
            };

            for matcher in &self.rules {
                if let Some(output) = outputs.iter().find(|o| matcher.regex.is_match(o)) {
                    conflicts.push(RuleConflict {
                        rule: producer.index,
                        matched_by: matcher.index,
                        output: output.clone(),
                    });
                }
            }
        }

        conflicts
    }

    /// Rules whose replacement references a capture group and produced no
    /// sampled conflict.
    ///
    /// Their real output depends on the matched text, so idempotence cannot be
    /// established for them by [`conflicts`](Self::conflicts).
    pub fn unverified(&self) -> Vec<usize> {
        let conflicting: Vec<usize> = self.conflicts().iter().map(|c| c.rule).collect();
        self.rules
            .iter()
            .filter(|r| has_group_refs(&r.replacement) && !conflicting.contains(&r.index))
            .map(|r| r.index)
            .collect()
    }

    /// Placeholder first, then each distinct word of every pattern and
    /// replacement, in table order.
    fn sample_words(&self) -> Vec<String> {
        let mut words = vec![GROUP_PLACEHOLDER.to_string()];
        for rule in &self.rules {
            let text = [rule.pattern(), rule.replacement.as_str()];
            for word in text
                .iter()
                .flat_map(|t| t.split(|c: char| !(c.is_alphanumeric() || c == '_')))
                .filter(|w| !w.is_empty())
            {
                if !words.iter().any(|existing| existing == word) {
                    words.push(word.to_string());
                }
            }
        }
        words
    }
}

// ============================================================================
// Template sampling
// ============================================================================

const GROUP_PLACEHOLDER: &str = "Sample";

/// Render a replacement template without a match, filling every group
/// reference (`$1`, `${1}`, `$name`, `${name}`) with `filler`.
fn sample_output(template: &str, filler: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(close) => {
                    out.push_str(filler);
                    rest = &braced[close + 1..];
                }
                None => {
                    out.push('$');
                    rest = after;
                }
            }
        } else {
            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if name_len == 0 {
                out.push('$');
            } else {
                out.push_str(filler);
            }
            rest = &after[name_len..];
        }
    }

    out.push_str(rest);
    out
}

fn has_group_refs(template: &str) -> bool {
    sample_output(template, "a") != sample_output(template, "b")
}

// ============================================================================
// Tests
// ============================================================================
