//! Core data types: classpath, compiler options, compile inputs and outputs.

pub mod classpath;
pub mod options;
pub mod source;

pub use classpath::{Classpath, ClasspathError, PathListDelimiter};
pub use options::CompilerOptions;
pub use source::{OutMode, SourceSpec};
