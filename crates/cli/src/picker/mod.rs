//! Interactive fuzzy picker drawn inline in the terminal.
//!
//! Key events are decoded into [`keys::Key`] values, applied to the pure
//! [`state::PickerState`], and every change is repainted by the
//! [`render::Renderer`]. A [`session::Session`] ties these together and owns
//! the terminal for its lifetime.
//!
//! # Examples
//!
//! ```no_run
//! use runpick_cli::picker::{pick, PickOptions};
//!
//! let result = pick(&["dev", "build", "test"], &PickOptions::default())?;
//! if !result.is_cancelled() {
//!     println!("{}", result.result);
//! }
//! # Ok::<(), runpick_core::error::Error>(())
//! ```

pub mod keys;
pub mod render;
pub mod session;
pub mod state;
pub mod theme;

pub use session::{pick, PickOptions, PickResult};
