//! `javac` toolchain implementation.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, OnceLock};

use anyhow::{anyhow, Result};
use regex::Regex;

use crate::core::classpath::PathListDelimiter;
use crate::util::process::{combined_output, ProcessBuilder};

use super::{CommandSpec, CompileOutcome, CompileTask, Toolchain};

/// The JDK's `javac`, driven as a subprocess.
#[derive(Debug, Clone)]
pub struct JavacToolchain {
    /// Path to javac
    pub javac: PathBuf,
    /// Delimiter used to join the classpath on the command line
    pub delimiter: PathListDelimiter,
    version: OnceLock<String>,
}

impl JavacToolchain {
    /// Create a toolchain for the given javac, joining classpaths with the host delimiter.
    pub fn new(javac: PathBuf) -> Self {
        JavacToolchain {
            javac,
            delimiter: PathListDelimiter::host(),
            version: OnceLock::new(),
        }
    }

    /// Join classpaths with `delimiter` instead of the host's.
    pub fn with_delimiter(mut self, delimiter: PathListDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Command printing the compiler version.
    ///
    /// `-version` is accepted by every javac release; `--version` only from 9 on.
    pub fn version_command(&self) -> CommandSpec {
        CommandSpec::new(&self.javac).arg("-version")
    }

    /// Generate the compile command for a task.
    pub fn compile_command(&self, task: &CompileTask) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.javac);

        cmd = cmd.args(task.options.to_args());

        if !task.classpath.is_empty() {
            cmd = cmd.arg("-classpath");
            cmd = cmd.arg(task.classpath.join(self.delimiter));
        }

        if let Some(ref root) = task.source_path {
            cmd = cmd.arg("-sourcepath");
            cmd = cmd.arg(root.display().to_string());
        }

        cmd = cmd.arg("-d");
        cmd = cmd.arg(task.class_output.display().to_string());

        for source in &task.sources {
            cmd = cmd.arg(source.display().to_string());
        }

        cmd
    }

    /// Query the full version line, e.g. `javac 21.0.2`.
    ///
    /// javac runs once; later calls return the cached line.
    pub fn version_line(&self) -> Result<&str> {
        if let Some(line) = self.version.get() {
            return Ok(line.as_str());
        }
        let line = self.query_version_line()?;
        Ok(self.version.get_or_init(|| line).as_str())
    }

    fn query_version_line(&self) -> Result<String> {
        let spec = self.version_command();
        let output = ProcessBuilder::new(&spec.program)
            .args(&spec.args)
            .exec_and_check()?;

        // Older releases print the version on stderr.
        let text = combined_output(&output);
        text.lines()
            .find(|line| line.trim_start().starts_with("javac"))
            .map(|line| line.trim().to_string())
            .ok_or_else(|| {
                anyhow!(
                    "could not find a version line in `{}` output:\n{}",
                    self.javac.display(),
                    text
                )
            })
    }
}

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"javac\s+(\d+)(?:\.(\d+))?").unwrap());

/// Extract the feature release from javac version output.
///
/// `javac 17.0.2` is release 17, `javac 21` is 21 and the legacy scheme
/// `javac 1.8.0_292` is release 8.
pub fn parse_release(output: &str) -> Option<u32> {
    let caps = VERSION_RE.captures(output)?;
    let major: u32 = caps.get(1)?.as_str().parse().ok()?;

    if major == 1 {
        caps.get(2)?.as_str().parse().ok()
    } else {
        Some(major)
    }
}

impl Toolchain for JavacToolchain {
    fn name(&self) -> String {
        match self.version_line() {
            Ok(line) => line.to_string(),
            Err(_) => self.javac.display().to_string(),
        }
    }

    fn compiler_path(&self) -> &Path {
        &self.javac
    }

    fn latest_supported_release(&self) -> Result<u32> {
        let line = self.version_line()?;
        parse_release(line)
            .ok_or_else(|| anyhow!("unrecognized javac version: `{}`", line))
    }

    fn compile(&self, task: &CompileTask) -> Result<CompileOutcome> {
        let spec = self.compile_command(task);
        let output = ProcessBuilder::new(&spec.program)
            .args(&spec.args)
            .exec()?;

        let diagnostics = combined_output(&output);
        if output.status.success() {
            Ok(CompileOutcome::succeeded(diagnostics))
        } else {
            tracing::debug!("javac exited with {:?}", output.status.code());
            Ok(CompileOutcome::failed(diagnostics))
        }
    }
}
