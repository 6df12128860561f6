//! Toolchain abstraction for Java compilers.
//!
//! The compile operation never talks to `javac` directly; it goes through the
//! [`Toolchain`] trait so that classpath derivation, temporary directory
//! handling and packaging can be exercised without a JDK.
//!
//! Toolchain detection priority:
//! 1. Explicit path (`--javac` or `compile.javac` in config)
//! 2. `$JAVA_HOME/bin/javac`
//! 3. `javac` on PATH

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::classpath::Classpath;
use crate::core::options::CompilerOptions;

mod detect;
mod javac;

pub use detect::detect_toolchain;
pub use javac::{parse_release, JavacToolchain};

/// A command to execute, with program and arguments.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The program to run (e.g., "javac")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }
}

/// Everything one compiler run needs.
#[derive(Debug, Clone)]
pub struct CompileTask {
    /// Option flags, passed first and in order
    pub options: CompilerOptions,
    /// Source files to compile
    pub sources: Vec<PathBuf>,
    /// Classpath for resolving already-compiled code
    pub classpath: Classpath,
    /// Root for resolving sources not listed explicitly
    pub source_path: Option<PathBuf>,
    /// Directory receiving `.class` files
    pub class_output: PathBuf,
}

/// Result of a compiler run that managed to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Whether the compiler reported success
    pub success: bool,
    /// Diagnostic text the compiler produced (warnings included)
    pub diagnostics: String,
}

impl CompileOutcome {
    pub fn succeeded(diagnostics: impl Into<String>) -> Self {
        CompileOutcome {
            success: true,
            diagnostics: diagnostics.into(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        CompileOutcome {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Trait for Java compiler implementations.
pub trait Toolchain: Send + Sync {
    /// Short human-readable name (e.g., "javac 21.0.2").
    fn name(&self) -> String;

    /// Get the compiler path.
    fn compiler_path(&self) -> &Path;

    /// Highest class-file release the compiler can target.
    fn latest_supported_release(&self) -> Result<u32>;

    /// Run the compiler synchronously.
    ///
    /// `Err` means the compiler could not be run at all; a compiler that ran
    /// and rejected the sources returns `Ok` with `success == false`.
    fn compile(&self, task: &CompileTask) -> Result<CompileOutcome>;
}
