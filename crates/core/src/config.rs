//! Configuration paths and environment settings for runpick.
//!
//! This module resolves the config file path, expands shell variables like
//! `~` in paths, and reads the environment flags that decide whether the
//! interactive picker may be used and how it looks.

use std::env;

/// Default path for the config file holding scripts and workspaces
const DEFAULT_CONFIG_PATH: &str = "~/.runpick/config.yml";

/// Default shell to use for script execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Exit status reported when a pick is cancelled, matching SIGINT.
pub const CANCEL_STATUS: i32 = 130;

/// Default number of rows the picker shows at once.
pub const DEFAULT_MAX_ITEMS: usize = 10;

const PICKER_DISABLE_VARS: [&str; 2] = ["RUNPICK_NO_PICKER", "NO_PICKER"];
const LANGUAGE_VARS: [&str; 2] = ["RUNPICK_LANG", "LANG"];

/// Language used for picker labels and notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl Locale {
    /// Picks the locale from a language tag such as `zh_CN.UTF-8`.
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Self {
        if tag.starts_with("zh") {
            Locale::Chinese
        } else {
            Locale::English
        }
    }

    /// Reads `RUNPICK_LANG`, falling back to `LANG`.
    #[must_use]
    pub fn from_env() -> Self {
        LANGUAGE_VARS
            .iter()
            .find_map(|var| env::var(var).ok().filter(|v| !v.is_empty()))
            .map_or(Locale::English, |tag| Self::from_language_tag(&tag))
    }
}

/// Resolves the config file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use runpick_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Expands shell variables in a working directory path.
///
/// Returns None if no working directory is provided.
///
/// # Examples
///
/// ```
/// use runpick_core::config::expand_working_directory;
///
/// let expanded = expand_working_directory(&Some("~/projects".to_string()));
/// assert!(expanded.is_some());
///
/// assert!(expand_working_directory(&None).is_none());
/// ```
pub fn expand_working_directory(working_directory: &Option<String>) -> Option<String> {
    working_directory
        .as_ref()
        .map(|dir| shellexpand::tilde(dir).to_string())
}

/// Whether a flag value means "on": `1`, `true` or `yes`, in any case.
#[must_use]
pub fn is_truthy_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Whether the picker was switched off with `RUNPICK_NO_PICKER` or `NO_PICKER`.
#[must_use]
pub fn picker_disabled() -> bool {
    PICKER_DISABLE_VARS
        .iter()
        .find_map(|var| env::var(var).ok().filter(|v| !v.is_empty()))
        .is_some_and(|value| is_truthy_flag(&value))
}

/// Whether we are running under CI.
#[must_use]
pub fn is_ci() -> bool {
    env::var_os("CI").is_some()
}

/// Colors are on unless `NO_COLOR` is set.
#[must_use]
pub fn color_enabled() -> bool {
    env::var_os("NO_COLOR").is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.yml".to_string());
        let result = get_config_path(&custom_path);
        assert_eq!(result, "/custom/path/config.yml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".runpick/config.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_expand_working_directory_with_some() {
        let working_dir = Some("~/projects/app".to_string());
        let expanded = expand_working_directory(&working_dir).unwrap();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("projects/app"));
    }

    #[test]
    fn test_expand_working_directory_without_tilde() {
        let working_dir = Some("/absolute/path".to_string());
        assert_eq!(
            expand_working_directory(&working_dir),
            Some("/absolute/path".to_string())
        );
    }

    #[test]
    fn test_expand_working_directory_with_none() {
        assert!(expand_working_directory(&None).is_none());
    }

    #[test]
    fn test_truthy_flags() {
        assert!(is_truthy_flag("1"));
        assert!(is_truthy_flag("TRUE"));
        assert!(is_truthy_flag("Yes"));
        assert!(!is_truthy_flag("0"));
        assert!(!is_truthy_flag("no"));
        assert!(!is_truthy_flag(""));
    }

    #[test]
    fn test_locale_from_language_tag() {
        assert_eq!(Locale::from_language_tag("zh_CN.UTF-8"), Locale::Chinese);
        assert_eq!(Locale::from_language_tag("en_US.UTF-8"), Locale::English);
        assert_eq!(Locale::from_language_tag(""), Locale::English);
    }

    #[test]
    fn test_cancel_status_constant() {
        assert_eq!(CANCEL_STATUS, 130);
    }
}
