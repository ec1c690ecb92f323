//! Terminal front end for the year grid

pub mod app;
pub mod theme;
pub mod widgets;
