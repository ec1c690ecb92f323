//! Year-at-a-glance month picker: a 4x3 grid of mini calendars with
//! range-gated selection.

pub mod calendar;
pub mod services;
pub mod tui;
pub mod types;
