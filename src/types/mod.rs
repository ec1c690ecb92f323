//! Type definitions for yeargrid

mod error;
mod month;

pub use error::*;
pub use month::*;
