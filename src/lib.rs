//! jarwright - compile Java sources with the host `javac` and package them
//!
//! This crate provides the library side of jarwright: classpath derivation,
//! the toolchain abstraction over `javac`, and the compile and jar packaging
//! operations.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for jarwright unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides a fake toolchain so compiles can be tested without a JDK.
#[cfg(test)]
pub mod test_support;

pub use builder::toolchain::{detect_toolchain, Toolchain};
pub use crate::core::{Classpath, CompilerOptions, OutMode, PathListDelimiter, SourceSpec};
pub use ops::{java_compile, package_as_archive, CompileArtifact, CompileError, JavaCompileOptions};
pub use util::Config;
