//! Stack definitions

pub mod windows;
