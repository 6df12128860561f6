//! Toolchain detection functions.

use std::path::Path;

use anyhow::{bail, Result};

use crate::util::process::find_javac;

use super::{JavacToolchain, Toolchain};

/// Detect the available Java compiler.
///
/// An explicit path (from the command line or config) must exist; otherwise
/// `JAVA_HOME` and then PATH are searched.
pub fn detect_toolchain(explicit: Option<&Path>) -> Result<Box<dyn Toolchain>> {
    if let Some(javac) = explicit {
        if !javac.is_file() {
            bail!(
                "configured Java compiler not found: {}\n\
                 \n\
                 Check the `--javac` flag or `compile.javac` in .jarwright/config.toml.",
                javac.display()
            );
        }

        tracing::info!("Using javac from config: {}", javac.display());
        return Ok(Box::new(JavacToolchain::new(javac.to_path_buf())));
    }

    if let Some(javac) = find_javac() {
        tracing::debug!("Found javac at: {}", javac.display());
        return Ok(Box::new(JavacToolchain::new(javac)));
    }

    bail!(
        "no Java compiler found\n\
         \n\
         jarwright requires a JDK (javac).\n\
         Set JAVA_HOME, pass `--javac <path>`, or put javac on PATH."
    )
}
