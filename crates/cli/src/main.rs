use std::env;
use std::io::{stderr, stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use itertools::Itertools;
use log::{debug, info};
use runpick_core::config::{self, Locale, CANCEL_STATUS, DEFAULT_SHELL};
use runpick_core::error::Error::{PickerUnavailable, ScriptNotFound};
use runpick_core::error::Result;
use runpick_core::execution;
use runpick_core::file_handling;
use runpick_core::resolution::resolve_script_name;
use runpick_core::script_definitions::{RunpickConfig, ScriptEntry, WorkspaceEntry};

use runpick_cli::cli_args::{Args, Command, PickArgs, RunArgs};
use runpick_cli::picker::theme::Labels;
use runpick_cli::picker::{pick, PickOptions};

/// The script to run and the workspace to run it in.
struct Selection<'a> {
    script: ScriptEntry<'a>,
    workspace: Option<WorkspaceEntry<'a>>,
}

/// Resolves a script given on the command line, without the picker.
fn resolve_named_script<'a>(config: &'a RunpickConfig, query: &str) -> Result<Selection<'a>> {
    let names: Vec<&str> = config.scripts.keys().map(String::as_str).collect();
    let name = resolve_script_name(&names, query)?;
    info!("Resolved `{query}` to script `{name}`");

    let script = config
        .script(name)
        .ok_or_else(|| ScriptNotFound(query.to_string()))?;

    Ok(Selection {
        script,
        workspace: None,
    })
}

/// Lets the user pick a workspace (when any are configured) and a script.
/// Returns `None` when either pick is cancelled.
fn pick_script<'a>(args: &RunArgs, config: &'a RunpickConfig) -> Result<Option<Selection<'a>>> {
    let max_items = args.max_items.or(config.picker.max_items);

    let workspace = if config.workspaces.is_empty() {
        None
    } else {
        let picked = pick(
            &config.workspace_items(),
            &PickOptions {
                max_items,
                ..PickOptions::default()
            },
        )?;
        if picked.is_cancelled() {
            return Ok(None);
        }
        config.workspace_for_item(&picked.result)
    };

    let picked = pick(
        &config.script_items(),
        &PickOptions {
            placeholder: config.picker.placeholder.clone(),
            max_items,
            prompt_path: workspace.map(|w| w.path.to_string()),
        },
    )?;
    if picked.is_cancelled() {
        return Ok(None);
    }

    let script = config
        .script_for_item(&picked.result)
        .ok_or_else(|| ScriptNotFound(picked.result.clone()))?;

    Ok(Some(Selection { script, workspace }))
}

fn select<'a>(args: &RunArgs, config: &'a RunpickConfig) -> Result<Option<Selection<'a>>> {
    if let Some(query) = &args.script {
        return resolve_named_script(config, query).map(Some);
    }

    if config::picker_disabled() || config::is_ci() {
        return Err(PickerUnavailable(config.scripts.keys().join(", ")));
    }

    pick_script(args, config)
}

fn print_selection(selection: &Selection) {
    println!("Executing command:\n{}", selection.script.command);

    if let Some(workspace) = &selection.workspace {
        println!("In workspace `{}`: {}", workspace.name, workspace.path);
    }
}

fn cancelled_exit_code(labels: &Labels) -> ExitCode {
    let mut stderr = stderr();
    let printed = if config::color_enabled() {
        execute!(
            stderr,
            SetForegroundColor(Color::Yellow),
            Print(labels.cancelled),
            ResetColor,
            Print("\n")
        )
    } else {
        writeln!(stderr, "{}", labels.cancelled)
    };
    if let Err(e) = printed {
        debug!("Could not print cancel notice: {e}");
    }

    u8::try_from(CANCEL_STATUS).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn run(args: &RunArgs) -> Result<ExitCode> {
    let shell = env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");
    let runpick_config = file_handling::get_config(&config_path)?;

    let Some(selection) = select(args, &runpick_config)? else {
        return Ok(cancelled_exit_code(&Labels::for_locale(Locale::from_env())));
    };

    print_selection(&selection);

    if args.dry_run {
        println!("Dry run is specified, exiting without executing.");
        return Ok(ExitCode::SUCCESS);
    }

    let working_directory = selection.workspace.map(|w| w.path.to_string());
    let command = execution::shell_command(&shell, selection.script.command, &working_directory);
    execution::execute_command(command)?;

    Ok(ExitCode::SUCCESS)
}

fn pick_item(args: &PickArgs) -> Result<ExitCode> {
    let options = PickOptions {
        placeholder: args.placeholder.clone(),
        max_items: args.max_items,
        prompt_path: args.prompt_path.clone(),
    };

    let picked = pick(&args.items, &options)?;
    if picked.is_cancelled() {
        return Ok(cancelled_exit_code(&Labels::for_locale(Locale::from_env())));
    }

    let mut stdout = stdout();
    writeln!(stdout, "{}", picked.result)?;
    Ok(ExitCode::SUCCESS)
}

fn execute() -> Result<ExitCode> {
    match Args::parse().into_command() {
        Command::Run(args) => run(&args),
        Command::Pick(args) => pick_item(&args),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
