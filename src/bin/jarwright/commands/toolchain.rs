//! `jarwright toolchain` command

use anyhow::Result;

use crate::cli::ToolchainArgs;
use jarwright::builder::toolchain::detect_toolchain;
use jarwright::core::{Classpath, CompilerOptions, PathListDelimiter};
use jarwright::util::config::load_config_for;

pub fn execute(args: ToolchainArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config_for(&cwd);

    println!("Toolchain:");
    println!();

    let javac = args.javac.or(config.compile.javac.clone());
    match detect_toolchain(javac.as_deref()) {
        Ok(toolchain) => {
            println!("  javac:   {}", toolchain.compiler_path().display());
            println!("           {}", toolchain.name());
            match toolchain.latest_supported_release() {
                Ok(latest) => {
                    let effective = CompilerOptions::new(config.target_release()).upgraded_for(latest);
                    println!("  Latest:  {}", latest);
                    println!("  Target:  {}", effective.target());
                }
                Err(e) => println!("  Latest:  unknown ({:#})", e),
            }
        }
        Err(_) => println!("  javac:   not found"),
    }

    println!();

    let delimiter = PathListDelimiter::host();
    println!("Classpath (delimiter `{}`):", delimiter);
    let classpath = Classpath::resolve(config.compile.classpath.as_deref(), delimiter)?;
    if classpath.is_empty() {
        println!("  (empty)");
    }
    for entry in classpath.entries() {
        println!("  {}", entry.display());
    }

    println!();

    println!("Environment:");
    for var in ["JAVA_HOME", "CLASSPATH"] {
        if let Ok(value) = std::env::var(var) {
            println!("  {}={}", var, value);
        }
    }

    Ok(())
}
