//! Test utilities for jarwright unit tests.
//!
//! Provides a [`FakeToolchain`] that stands in for `javac`, so the compile
//! operation can be tested on machines without a JDK.
//!
//! # Example
//!
//! ```rust,ignore
//! use jarwright::test_support::FakeToolchain;
//!
//! let toolchain = FakeToolchain::new(21);
//! let artifact = java_compile(&toolchain, &src, &out, &opts)?;
//! assert_eq!(toolchain.last_task().unwrap().options.target(), 21);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::builder::toolchain::{CompileOutcome, CompileTask, Toolchain};
use crate::core::source::CLASS_EXTENSION;

/// Marker bytes written at the start of every fake class file.
pub const FAKE_CLASS_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Toolchain double.
///
/// On success it writes one `.class` per source, mirroring the source's path
/// relative to the task's source path (or just its file name for a single
/// file). Every task it receives is recorded.
#[derive(Debug)]
pub struct FakeToolchain {
    latest: u32,
    failure: Option<String>,
    tasks: Mutex<Vec<CompileTask>>,
}

impl FakeToolchain {
    /// A toolchain that succeeds and reports `latest` as its newest release.
    pub fn new(latest: u32) -> Self {
        FakeToolchain {
            latest,
            failure: None,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// A toolchain whose every compile fails with the given diagnostics.
    pub fn failing(diagnostics: impl Into<String>) -> Self {
        FakeToolchain {
            latest: 11,
            failure: Some(diagnostics.into()),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// The most recent task handed to [`Toolchain::compile`].
    pub fn last_task(&self) -> Option<CompileTask> {
        self.tasks.lock().unwrap().last().cloned()
    }

    fn class_path_for(task: &CompileTask, source: &Path) -> PathBuf {
        let relative = task
            .source_path
            .as_ref()
            .and_then(|root| {
                let source = source.canonicalize().ok()?;
                source.strip_prefix(root).ok().map(Path::to_path_buf)
            })
            .unwrap_or_else(|| PathBuf::from(source.file_name().unwrap_or_default()));

        task.class_output
            .join(relative)
            .with_extension(CLASS_EXTENSION)
    }
}

impl Toolchain for FakeToolchain {
    fn name(&self) -> String {
        format!("fake javac {}", self.latest)
    }

    fn compiler_path(&self) -> &Path {
        Path::new("fake-javac")
    }

    fn latest_supported_release(&self) -> Result<u32> {
        Ok(self.latest)
    }

    fn compile(&self, task: &CompileTask) -> Result<CompileOutcome> {
        self.tasks.lock().unwrap().push(task.clone());

        if let Some(ref diagnostics) = self.failure {
            return Ok(CompileOutcome::failed(diagnostics.clone()));
        }

        for source in &task.sources {
            let class = Self::class_path_for(task, source);
            if let Some(parent) = class.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut contents = FAKE_CLASS_MAGIC.to_vec();
            contents.extend(std::fs::read(source).with_context(|| {
                format!("failed to read source: {}", source.display())
            })?);
            std::fs::write(&class, contents)?;
        }

        Ok(CompileOutcome::succeeded(""))
    }
}
