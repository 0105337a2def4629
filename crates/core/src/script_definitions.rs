use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::display::format::{SCRIPT_SEPARATOR, WORKSPACE_SEPARATOR};

/// Optional picker settings from the config file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerSettings {
    pub max_items: Option<usize>,
    pub placeholder: Option<String>,
}

/// The runpick config file: scripts to run and the workspaces to run them in.
///
/// Both maps keep the order they are written in, which is the order the
/// picker lists them in.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunpickConfig {
    #[serde(default)]
    pub picker: PickerSettings,
    #[serde(default)]
    pub workspaces: IndexMap<String, String>,
    #[serde(default)]
    pub scripts: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEntry<'a> {
    pub name: &'a str,
    pub command: &'a str,
}

impl Display for ScriptEntry<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}{SCRIPT_SEPARATOR}{}", self.name, self.command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceEntry<'a> {
    pub name: &'a str,
    pub path: &'a str,
}

impl Display for WorkspaceEntry<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}{WORKSPACE_SEPARATOR}{}", self.name, self.path)
    }
}

impl RunpickConfig {
    pub fn scripts(&self) -> impl Iterator<Item = ScriptEntry<'_>> {
        self.scripts.iter().map(|(name, command)| ScriptEntry { name, command })
    }

    pub fn workspaces(&self) -> impl Iterator<Item = WorkspaceEntry<'_>> {
        self.workspaces
            .iter()
            .map(|(name, path)| WorkspaceEntry { name, path })
    }

    /// Picker items for the scripts, `name: command`.
    #[must_use]
    pub fn script_items(&self) -> Vec<String> {
        self.scripts().map(|s| s.to_string()).collect()
    }

    /// Picker items for the workspaces, `name  -  path`.
    #[must_use]
    pub fn workspace_items(&self) -> Vec<String> {
        self.workspaces().map(|w| w.to_string()).collect()
    }

    /// Maps a picked item back to its script.
    #[must_use]
    pub fn script_for_item(&self, item: &str) -> Option<ScriptEntry<'_>> {
        self.scripts().find(|s| s.to_string() == item)
    }

    /// Maps a picked item back to its workspace.
    #[must_use]
    pub fn workspace_for_item(&self, item: &str) -> Option<WorkspaceEntry<'_>> {
        self.workspaces().find(|w| w.to_string() == item)
    }

    #[must_use]
    pub fn script(&self, name: &str) -> Option<ScriptEntry<'_>> {
        self.scripts
            .get_key_value(name)
            .map(|(name, command)| ScriptEntry { name, command })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> RunpickConfig {
        let mut config = RunpickConfig::default();
        config.scripts.insert("dev".to_string(), "cargo run".to_string());
        config
            .scripts
            .insert("test".to_string(), "cargo test --workspace".to_string());
        config
            .workspaces
            .insert("web".to_string(), "~/src/app/web".to_string());
        config
    }

    #[test]
    fn test_script_entry_display() {
        let entry = ScriptEntry {
            name: "dev",
            command: "cargo run",
        };
        assert_eq!(format!("{entry}"), "dev: cargo run");
    }

    #[test]
    fn test_workspace_entry_display() {
        let entry = WorkspaceEntry {
            name: "web",
            path: "packages/web",
        };
        assert_eq!(format!("{entry}"), "web  -  packages/web");
    }

    #[test]
    fn test_items_keep_config_order() {
        let config = create_test_config();
        assert_eq!(
            config.script_items(),
            vec!["dev: cargo run", "test: cargo test --workspace"]
        );
        assert_eq!(config.workspace_items(), vec!["web  -  ~/src/app/web"]);
    }

    #[test]
    fn test_item_lookup() {
        let config = create_test_config();
        let script = config.script_for_item("test: cargo test --workspace").unwrap();
        assert_eq!(script.name, "test");

        let workspace = config.workspace_for_item("web  -  ~/src/app/web").unwrap();
        assert_eq!(workspace.path, "~/src/app/web");

        assert!(config.script_for_item("test").is_none());
    }

    #[test]
    fn test_script_by_name() {
        let config = create_test_config();
        assert_eq!(config.script("dev").unwrap().command, "cargo run");
        assert!(config.script("build").is_none());
    }
}
