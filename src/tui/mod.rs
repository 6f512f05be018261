mod failure;
mod results;
mod screen;
mod theme;

pub use failure::show_failure;
pub use results::{result_lines, show_results};
pub use theme::Theme;
