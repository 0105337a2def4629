//! Turning ranked items into width-bounded terminal lines.
//!
//! - [`width`]: terminal column width of characters and strings
//! - [`format`]: truncation of plain and structured items, with the mapping
//!   from displayed cells back to item positions used for highlighting

pub mod format;
pub mod width;

pub use format::{format_item, truncate_line, Cell, CellRole, FormattedItem, ItemShape};
pub use width::{char_width, str_width};
