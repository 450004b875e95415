//! Line of sight and tile paths

mod find;
mod line;

pub use find::find_path;
pub use line::{is_line_not_solid, line_clear, line_clear_missile};
