//! Entity description helpers

pub mod macros;
