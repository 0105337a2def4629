use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process `{}` exited with a non-success code ({}).", .command, .status)]
    SubProcessExit {
        command: String,
        status: std::process::ExitStatus,
    },

    #[error("Error spawning sub process `{}`: {}", .command, .original)]
    SubProcess {
        command: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No scripts were found in the config file. Is `scripts` in `{}` empty?", .path)]
    EmptyScriptDefinition { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No script matches `{}`", .0)]
    ScriptNotFound(String),

    #[error("Invalid name: script and workspace names may not be empty")]
    EmptyName,

    #[error("Invalid name `{}`: it may not contain `{}`", .name, .separator)]
    NameWithSeparator { name: String, separator: String },

    #[error("The interactive picker is disabled (CI or RUNPICK_NO_PICKER/NO_PICKER is set). Pass a script name, one of: {}", .0)]
    PickerUnavailable(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn empty_script_definition(path: String) -> Self {
        Self::EmptyScriptDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
