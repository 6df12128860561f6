//! Compiler options.

use crate::util::config::DEFAULT_TARGET_RELEASE;

/// Flag carrying the class-file target release.
pub const TARGET_FLAG: &str = "-target";

/// Ordered option flags handed verbatim to the compiler.
///
/// Built fresh for every invocation; nothing here is shared between compiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    target: u32,
    extra: Vec<String>,
}

impl CompilerOptions {
    /// Options targeting `baseline`, with no extra flags.
    pub fn new(baseline: u32) -> Self {
        CompilerOptions {
            target: baseline,
            extra: Vec::new(),
        }
    }

    /// Append flags after the target flag.
    pub fn with_extra(mut self, extra: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Raise the target to the toolchain's latest supported release if that is newer.
    ///
    /// A baseline at or above `latest` is left as is.
    pub fn upgraded_for(mut self, latest: u32) -> Self {
        if latest > self.target {
            tracing::debug!("raising -target from {} to {}", self.target, latest);
            self.target = latest;
        }
        self
    }

    /// Effective target release.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Flags following the target flag.
    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    /// The full flag list in order.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![TARGET_FLAG.to_string(), self.target.to_string()];
        args.extend(self.extra.iter().cloned());
        args
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions::new(DEFAULT_TARGET_RELEASE)
    }
}
