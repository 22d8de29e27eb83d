use clap::Args;
use serde::Serialize;

use import_rewrite::config::{RewriteConfig, RuleSource};
use import_rewrite::rewrite::{self, FileUpdate, RewriteWarning};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Root directory to rewrite (default: src/main/java)
    #[arg(long)]
    root: Option<String>,
    /// File extension to rewrite, without the dot (default: java)
    #[arg(long)]
    ext: Option<String>,
    /// JSON rules file to use instead of the built-in table
    #[arg(long)]
    rules: Option<String>,
    /// Print a JSON summary instead of one line per updated file
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RunOutput {
    #[serde(rename = "run")]
    Run {
        root: String,
        extension: String,
        rules: RuleSource,
        rule_count: usize,
        files_scanned: usize,
        total_replacements: usize,
        updated: Vec<FileUpdate>,
        warnings: Vec<RewriteWarning>,
    },
}

pub fn run(args: RunArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RunOutput> {
    let config = RewriteConfig::resolve(
        args.root.as_deref(),
        args.ext.as_deref(),
        args.rules.as_deref(),
    )?;
    let table = config.load_table()?;

    let print_notices = !args.json;
    let result = rewrite::rewrite_tree(&config.root, &config.extension, &table, |path| {
        if print_notices {
            println!("Updating {}", path.display());
        }
    })?;

    // Flagged rules are reported even when stderr is not a terminal.
    if print_notices {
        for warning in &result.warnings {
            eprintln!(
                "Warning: {}: rule {}: {}",
                warning.file, warning.rule, warning.message
            );
        }
    }

    // "No changes" and "some changes" are both success.
    Ok((
        RunOutput::Run {
            root: result.root,
            extension: result.extension,
            rules: config.rules,
            rule_count: table.len(),
            files_scanned: result.files_scanned,
            total_replacements: result.total_replacements,
            updated: result.updated,
            warnings: result.warnings,
        },
        0,
    ))
}
