pub mod format_selector;

pub use format_selector::{best_format, select, Selection};
