//! Shared geometric and chemical utilities.

pub mod bounds;
pub mod elements;
