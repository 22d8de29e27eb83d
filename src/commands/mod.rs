pub type CmdResult<T> = import_rewrite::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod rules;
pub mod run;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (import_rewrite::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Rules(args) => dispatch!(args, global, rules),
    }
}

/// Run a command whose product output is already written to stdout.
///
/// Only the exit code is returned; the structured result is discarded.
pub(crate) fn run_raw(command: crate::Commands, global: &GlobalArgs) -> import_rewrite::Result<i32> {
    match command {
        crate::Commands::Run(args) => run::run(args, global).map(|(_, exit_code)| exit_code),
        crate::Commands::Rules(_) => Err(import_rewrite::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
        )),
    }
}
