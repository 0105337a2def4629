//! Command-line argument parsing.
//!
//! This module defines the command-line interface of `rp` using the `clap`
//! crate. Running `rp` without a subcommand behaves like `rp run`.

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Command-line arguments for the runpick CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use runpick_cli::cli_args::{Args, Command};
///
/// let args = Args::parse_from(["rp", "build"]);
/// assert!(matches!(args.into_command(), Command::Run(run) if run.script.as_deref() == Some("build")));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0, args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

impl Args {
    /// The subcommand to execute, `run` when none was given.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Run(self.run))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick a script from the config file and run it.
    Run(RunArgs),

    /// Pick one of the given items and print it.
    Pick(PickArgs),
}

#[derive(ClapArgs, Debug, Default, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Path to the scripts config file YAML.
    ///
    /// If not provided, defaults to `~/.runpick/config.yml`.
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<String>,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Maximum number of rows shown by the picker.
    #[arg(long, short = 'm')]
    pub max_items: Option<usize>,

    /// Name of the script to run, skipping the picker.
    ///
    /// The name may be abbreviated: an unambiguous prefix or a fuzzy match
    /// of a script name is enough.
    pub script: Option<String>,
}

#[derive(ClapArgs, Debug, Default, Clone, PartialEq, Eq)]
pub struct PickArgs {
    /// Prompt text shown above the query.
    #[arg(long, short = 'p')]
    pub placeholder: Option<String>,

    /// Maximum number of rows shown by the picker.
    #[arg(long, short = 'm')]
    pub max_items: Option<usize>,

    /// Context shown in parentheses beside the prompt.
    #[arg(long)]
    pub prompt_path: Option<String>,

    /// The items to pick from.
    pub items: Vec<String>,
}
