use clap::{Args, Subcommand};
use serde::Serialize;

use import_rewrite::config::RuleSource;
use import_rewrite::rewrite::RuleConflict;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// List the active rules in application order
    List {
        /// JSON rules file to use instead of the built-in table
        #[arg(long)]
        rules: Option<String>,
    },
    /// Check that no rule's output is matched again by any pattern
    Check {
        /// JSON rules file to use instead of the built-in table
        #[arg(long)]
        rules: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules.list")]
    List {
        source: RuleSource,
        rules: Vec<RuleSummary>,
    },
    #[serde(rename = "rules.check")]
    Check {
        source: RuleSource,
        rule_count: usize,
        idempotent: bool,
        conflicts: Vec<RuleConflict>,
        unverified: Vec<usize>,
    },
}

#[derive(Serialize)]
pub struct RuleSummary {
    pub index: usize,
    pub pattern: String,
    pub replacement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub fn run(args: RulesArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RulesOutput> {
    match args.command {
        RulesCommand::List { rules } => run_list(RuleSource::from_arg(rules.as_deref())?),
        RulesCommand::Check { rules } => run_check(RuleSource::from_arg(rules.as_deref())?),
    }
}

fn run_list(source: RuleSource) -> CmdResult<RulesOutput> {
    let table = source.load_table()?;

    let rules = table
        .rules()
        .iter()
        .map(|r| RuleSummary {
            index: r.index,
            pattern: r.pattern().to_string(),
            replacement: r.replacement.clone(),
            note: r.note.clone(),
        })
        .collect();

    Ok((RulesOutput::List { source, rules }, 0))
}

fn run_check(source: RuleSource) -> CmdResult<RulesOutput> {
    let table = source.load_table()?;
    let conflicts = table.conflicts();
    let unverified = table.unverified();

    for conflict in &conflicts {
        import_rewrite::log_status!(
            "rules",
            "Rule {} output '{}' is matched by rule {}",
            conflict.rule,
            conflict.output,
            conflict.matched_by
        );
    }

    for rule in &unverified {
        import_rewrite::log_status!(
            "rules",
            "Rule {} substitutes captured text; idempotence not verified",
            rule
        );
    }

    // Unverified rules are reported but do not fail the check.
    let exit_code = if conflicts.is_empty() { 0 } else { 1 };

    Ok((
        RulesOutput::Check {
            source,
            rule_count: table.len(),
            idempotent: conflicts.is_empty() && unverified.is_empty(),
            conflicts,
            unverified,
        },
        exit_code,
    ))
}
