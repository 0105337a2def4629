use std::process::{Command, Stdio};

use log::info;

use crate::config::expand_working_directory;
use crate::error::{Error, Result};

/// Builds the command that runs `script` through `shell`.
///
/// The shell gets `-i` so it reads the user's rc files, making aliases and
/// `PATH` tweaks available to the script.
#[must_use]
pub fn shell_command(shell: &str, script: &str, working_directory: &Option<String>) -> Command {
    let mut command = Command::new(shell);
    if let Some(working_directory) = expand_working_directory(working_directory) {
        command.current_dir(working_directory);
    }

    command.args(["-i", "-c", script]);
    command
}

/// Executes a command with inherited stdio and waits for it.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits with a
/// non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let description = format!("{command:?}");
    info!("Executing {description}");

    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .and_then(|mut child| child.wait())
        .map_err(|original| Error::SubProcess {
            command: description.clone(),
            original,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit {
            command: description,
            status,
        })
    }
}
