//! Command implementations

pub mod compile;
pub mod package;
pub mod toolchain;
