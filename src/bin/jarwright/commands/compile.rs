//! `jarwright compile` command

use anyhow::Result;

use crate::cli::CompileArgs;
use jarwright::builder::toolchain::detect_toolchain;
use jarwright::core::PathListDelimiter;
use jarwright::ops::{java_compile, JavaCompileOptions};
use jarwright::util::config::load_config_for;
use jarwright::OutMode;

pub fn execute(args: CompileArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config_for(&cwd);

    // CLI overrides config
    let javac = args.javac.or(config.compile.javac.clone());
    let toolchain = detect_toolchain(javac.as_deref())?;

    let extra_options = if args.options.is_empty() {
        config.compile.options.clone()
    } else {
        args.options
    };

    let opts = JavaCompileOptions {
        target: args.target.unwrap_or_else(|| config.target_release()),
        extra_options,
        classpath: args.classpath.or(config.compile.classpath),
        delimiter: PathListDelimiter::host(),
    };

    let artifact = java_compile(toolchain.as_ref(), &args.source, &args.output, &opts)?;

    if !artifact.warnings.trim().is_empty() {
        eprintln!("{}", artifact.warnings.trim_end());
    }

    let kind = match artifact.mode {
        OutMode::Archive => "jar",
        OutMode::Directory => "directory",
    };
    eprintln!(
        "    Finished {} class file(s) (target {}) -> {} {}",
        artifact.class_count,
        artifact.target,
        kind,
        artifact.path.display()
    );

    Ok(())
}
