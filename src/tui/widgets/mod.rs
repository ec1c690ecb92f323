//! TUI widgets

pub mod help;
pub mod month_grid;
pub mod year_grid;
