//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// jarwright - compile Java sources with javac and package them as a jar or class directory
#[derive(Parser)]
#[command(name = "jarwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a source file or directory into a jar or class directory
    Compile(CompileArgs),

    /// Package an existing directory of class files into a jar
    Package(PackageArgs),

    /// Show the detected Java toolchain and classpath
    Toolchain(ToolchainArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// A .java file, or a directory searched recursively for .java files
    pub source: PathBuf,

    /// Output path; a `.jar` suffix produces a jar, anything else a directory
    pub output: PathBuf,

    /// Classpath to compile against (defaults to $CLASSPATH)
    #[arg(long, alias = "cp")]
    pub classpath: Option<String>,

    /// Path to javac
    #[arg(long, env = "JARWRIGHT_JAVAC")]
    pub javac: Option<PathBuf>,

    /// Baseline -target release (raised to the newest release javac supports)
    #[arg(long)]
    pub target: Option<u32>,

    /// Extra option passed to javac (repeatable)
    #[arg(short = 'O', long = "option", allow_hyphen_values = true)]
    pub options: Vec<String>,
}

#[derive(Args)]
pub struct PackageArgs {
    /// Directory containing compiled .class files
    pub classes: PathBuf,

    /// Jar file to write
    pub jar: PathBuf,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Path to javac
    #[arg(long, env = "JARWRIGHT_JAVAC")]
    pub javac: Option<PathBuf>,
}
