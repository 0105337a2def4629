//! Runpick Core Library
//!
//! This crate provides the terminal-independent parts of runpick, a developer
//! command runner built around an interactive fuzzy picker.
//!
//! # Key Features
//!
//! - **Fuzzy Scoring**: Tiered exact / prefix / substring / subsequence matching
//! - **Ranking**: Stable, multi-token ranking of picker items
//! - **Display Formatting**: Width-aware truncation of plain and structured items
//! - **Config Loading**: YAML scripts and workspaces with validated names
//! - **Execution**: Running a picked script through the user's shell
//!
//! # Examples
//!
//! Ranking items against a query:
//!
//! ```
//! use runpick_core::ranking::rank;
//!
//! let ranked = rank(&["dev", "build", "test"], "b");
//! assert_eq!(ranked[0].item, "build");
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod ranking;
pub mod resolution;
pub mod script_definitions;
pub mod scoring;
