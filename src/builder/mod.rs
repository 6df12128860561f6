//! Compiler toolchains.

pub mod toolchain;
