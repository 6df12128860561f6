//! High-level operations

pub mod java_compile;
pub mod package;

pub use java_compile::{java_compile, CompileArtifact, CompileError, JavaCompileOptions};
pub use package::{package_as_archive, PackageError};
