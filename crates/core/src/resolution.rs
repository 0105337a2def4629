//! Resolving a script name typed on the command line.
//!
//! Used when the picker is skipped: the argument is matched exactly first,
//! then as a prefix, then by the picker's own fuzzy ranking. No pattern is
//! ever compiled from user input.

use crate::error::{Error, Result};
use crate::ranking::rank;

/// Finds the script name best matching `query` among `names`.
///
/// # Errors
///
/// Returns [`Error::ScriptNotFound`] when nothing matches.
pub fn resolve_script_name<'a>(names: &[&'a str], query: &str) -> Result<&'a str> {
    if let Some(exact) = names.iter().copied().find(|name| *name == query) {
        return Ok(exact);
    }

    if query.trim().is_empty() {
        return Err(Error::ScriptNotFound(query.to_string()));
    }

    if let Some(prefixed) = names.iter().copied().find(|name| name.starts_with(query)) {
        return Ok(prefixed);
    }

    rank(names, query)
        .first()
        .map(|entry| names[entry.original_index])
        .ok_or_else(|| Error::ScriptNotFound(query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 5] = ["dev", "build", "build:web", "test:unit", "lint"];

    #[test]
    fn test_exact_name_wins() {
        assert_eq!(resolve_script_name(&NAMES, "build").unwrap(), "build");
    }

    #[test]
    fn test_first_prefix_match() {
        assert_eq!(resolve_script_name(&NAMES, "bu").unwrap(), "build");
        assert_eq!(resolve_script_name(&NAMES, "test").unwrap(), "test:unit");
    }

    #[test]
    fn test_fuzzy_fallback() {
        assert_eq!(resolve_script_name(&NAMES, "tu").unwrap(), "test:unit");
        assert_eq!(resolve_script_name(&NAMES, "bw").unwrap(), "build:web");
    }

    #[test]
    fn test_no_match() {
        assert!(matches!(
            resolve_script_name(&NAMES, "zzz"),
            Err(Error::ScriptNotFound(_))
        ));
        assert!(resolve_script_name(&NAMES, " ").is_err());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(resolve_script_name(&NAMES, "b(").is_err());
        assert!(resolve_script_name(&NAMES, "[").is_err());
    }
}
