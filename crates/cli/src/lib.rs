//! Runpick CLI Library
//!
//! This crate provides the terminal side of runpick: an interactive fuzzy
//! picker drawn inline below the cursor, and the argument parsing of the `rp`
//! binary that uses it to pick and run scripts.
//!
//! # Key Features
//!
//! - **Inline Picker**: Fuzzy filtering with highlighted matches, no alternate screen
//! - **Structured Items**: `name: command` and `name  -  path` items truncate sensibly
//! - **Safe Terminal Handling**: Raw mode and cursor are restored exactly once
//! - **Non-interactive Fallback**: Without a terminal the picker returns a cancel status
//!
//! # Architecture
//!
//! - [`picker`]: Key decoding, picker state, rendering and the terminal session
//! - [`cli_args`]: Command-line argument parsing
//!
//! # Examples
//!
//! The CLI binary (`rp`) can be used in several ways:
//!
//! ```bash
//! # Pick a workspace and a script from ~/.runpick/config.yml, then run it
//! rp
//!
//! # Run a script directly, by (abbreviated) name
//! rp build
//!
//! # Show what would run without running it
//! rp --dry-run test
//!
//! # Pick from arbitrary items and print the choice
//! rp pick dev build test
//! ```

pub mod cli_args;
pub mod picker;
