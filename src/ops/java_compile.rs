//! Implementation of `jarwright compile`.
//!
//! One invocation: resolve sources and classpath, run the toolchain into a
//! scratch directory, then deliver the classes as a jar or a directory tree.
//! The scratch directory is a [`TempDir`] and is removed when this function
//! returns, whichever way it returns.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use tempfile::TempDir;
use thiserror::Error;

use crate::builder::toolchain::{CompileTask, Toolchain};
use crate::core::classpath::{Classpath, ClasspathError, PathListDelimiter};
use crate::core::options::CompilerOptions;
use crate::core::source::{OutMode, SourceSpec, CLASS_EXTENSION};
use crate::ops::package::{package_as_archive, PackageError};
use crate::util::config::DEFAULT_TARGET_RELEASE;
use crate::util::fs::{copy_dir_all, glob_files_with_extension, normalize_path};

/// Options for a compile run.
#[derive(Debug, Clone)]
pub struct JavaCompileOptions {
    /// Baseline `-target` release, raised to the toolchain's latest if that is newer
    pub target: u32,
    /// Extra flags appended after the target flag
    pub extra_options: Vec<String>,
    /// Classpath string to use instead of the `CLASSPATH` environment variable
    pub classpath: Option<String>,
    /// Delimiter for splitting the classpath string
    pub delimiter: PathListDelimiter,
}

impl Default for JavaCompileOptions {
    fn default() -> Self {
        JavaCompileOptions {
            target: DEFAULT_TARGET_RELEASE,
            extra_options: Vec::new(),
            classpath: None,
            delimiter: PathListDelimiter::host(),
        }
    }
}

/// What a successful compile produced.
#[derive(Debug, Clone)]
pub struct CompileArtifact {
    /// The jar or directory written
    pub path: PathBuf,
    /// Whether `path` is a jar or a directory
    pub mode: OutMode,
    /// Number of class files delivered
    pub class_count: usize,
    /// Effective `-target` release
    pub target: u32,
    /// Non-fatal compiler output (warnings, notes)
    pub warnings: String,
}

/// Failure of a compile run.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error("source path is neither a file nor a directory: {}", path.display())]
    #[diagnostic(code(jarwright::compile::invalid_source))]
    InvalidSource { path: PathBuf },

    #[error("no .java files found under {}", path.display())]
    #[diagnostic(code(jarwright::compile::no_sources))]
    NoSources { path: PathBuf },

    #[error("java compiler unavailable")]
    #[diagnostic(
        code(jarwright::compile::toolchain),
        help("set JAVA_HOME or pass `--javac <path>`")
    )]
    Toolchain {
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid classpath")]
    #[diagnostic(code(jarwright::compile::classpath))]
    Classpath(#[from] ClasspathError),

    #[error("compilation failed\n{diagnostics}")]
    #[diagnostic(code(jarwright::compile::failed))]
    CompilationFailed { diagnostics: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Package(#[from] PackageError),

    #[error("{context}")]
    #[diagnostic(code(jarwright::compile::io))]
    Io {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CompileError {
    fn io(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        CompileError::Io {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Compile `source` (a `.java` file or a directory of them) and deliver the
/// classes to `output`.
///
/// An `output` ending in `.jar` is written as a jar; anything else is a
/// directory that receives the class tree, overwriting existing files. If
/// the toolchain or the compiler fails, nothing is written to `output`. A jar
/// is replaced atomically; a directory copy that fails partway keeps the files
/// already copied.
pub fn java_compile(
    toolchain: &dyn Toolchain,
    source: &Path,
    output: &Path,
    opts: &JavaCompileOptions,
) -> Result<CompileArtifact, CompileError> {
    let spec = SourceSpec::from_path(source).ok_or_else(|| CompileError::InvalidSource {
        path: source.to_path_buf(),
    })?;

    let build_dir = tempfile::Builder::new()
        .prefix("jarwright-")
        .tempdir()
        .map_err(|e| CompileError::io("failed to create temporary build directory", e))?;

    compile_into(toolchain, &spec, &build_dir, output, opts)
}

fn compile_into(
    toolchain: &dyn Toolchain,
    spec: &SourceSpec,
    build_dir: &TempDir,
    output: &Path,
    opts: &JavaCompileOptions,
) -> Result<CompileArtifact, CompileError> {
    let class_output = normalize_path(build_dir.path());

    let latest = toolchain
        .latest_supported_release()
        .map_err(|source| CompileError::Toolchain { source })?;
    let options = CompilerOptions::new(opts.target)
        .with_extra(opts.extra_options.iter().cloned())
        .upgraded_for(latest);

    let classpath = Classpath::resolve(opts.classpath.as_deref(), opts.delimiter)?;
    tracing::debug!("classpath has {} entries", classpath.len());

    let sources = spec.resolve_files().map_err(|e| {
        CompileError::io(
            format!("failed to collect sources under {}", spec.path().display()),
            e,
        )
    })?;
    if sources.is_empty() {
        return Err(CompileError::NoSources {
            path: spec.path().to_path_buf(),
        });
    }

    let task = CompileTask {
        options,
        sources,
        classpath,
        source_path: spec.source_root().map(normalize_path),
        class_output: class_output.clone(),
    };

    tracing::info!(
        "Compiling {} source file(s) with {} (target {})",
        task.sources.len(),
        toolchain.compiler_path().display(),
        task.options.target()
    );

    let outcome = toolchain
        .compile(&task)
        .map_err(|source| CompileError::Toolchain { source })?;

    if !outcome.success {
        return Err(CompileError::CompilationFailed {
            diagnostics: outcome.diagnostics,
        });
    }

    let mode = OutMode::for_output(output);
    let class_count = match mode {
        OutMode::Archive => package_as_archive(output, &class_output)?,
        OutMode::Directory => {
            copy_dir_all(&class_output, output).map_err(|e| {
                CompileError::io(format!("failed to copy classes to {}", output.display()), e)
            })?;
            glob_files_with_extension(&class_output, CLASS_EXTENSION)
                .map_err(|e| CompileError::io("failed to count compiled classes", e))?
                .len()
        }
    };

    Ok(CompileArtifact {
        path: output.to_path_buf(),
        mode,
        class_count,
        target: task.options.target(),
        warnings: outcome.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeToolchain;
    use std::fs;
    use zip::ZipArchive;

    fn opts() -> JavaCompileOptions {
        JavaCompileOptions {
            classpath: Some(String::new()),
            delimiter: PathListDelimiter::Colon,
            ..Default::default()
        }
    }

    fn jar_entries(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(|s| s.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_single_file_to_jar() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "public class Hello {}").unwrap();
        let jar = tmp.path().join("out.jar");

        let toolchain = FakeToolchain::new(17);
        let artifact = java_compile(&toolchain, &src, &jar, &opts()).unwrap();

        assert_eq!(artifact.mode, OutMode::Archive);
        assert_eq!(artifact.class_count, 1);
        assert_eq!(jar_entries(&jar), vec!["Hello.class"]);
    }

    #[test]
    fn test_directory_to_directory() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("a")).unwrap();
        fs::create_dir_all(src.join("b")).unwrap();
        fs::write(src.join("a/A.java"), "package a; class A {}").unwrap();
        fs::write(src.join("b/B.java"), "package b; class B {}").unwrap();
        let out = tmp.path().join("outdir");

        let toolchain = FakeToolchain::new(11);
        let artifact = java_compile(&toolchain, &src, &out, &opts()).unwrap();

        assert_eq!(artifact.mode, OutMode::Directory);
        assert_eq!(artifact.class_count, 2);
        assert!(out.join("a/A.class").is_file());
        assert!(out.join("b/B.class").is_file());

        let task = toolchain.last_task().unwrap();
        assert_eq!(task.source_path, Some(normalize_path(&src)));
        assert_eq!(task.sources.len(), 2);
    }

    #[test]
    fn test_single_file_has_no_source_path() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();

        let toolchain = FakeToolchain::new(11);
        java_compile(&toolchain, &src, &tmp.path().join("out"), &opts()).unwrap();

        assert!(toolchain.last_task().unwrap().source_path.is_none());
    }

    #[test]
    fn test_target_raised_to_toolchain_latest() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();

        let toolchain = FakeToolchain::new(21);
        let artifact = java_compile(&toolchain, &src, &tmp.path().join("a.jar"), &opts()).unwrap();
        assert_eq!(artifact.target, 21);
        assert_eq!(
            toolchain.last_task().unwrap().options.to_args(),
            vec!["-target", "21"]
        );
    }

    #[test]
    fn test_target_stays_at_baseline_for_old_toolchain() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();

        let toolchain = FakeToolchain::new(8);
        let artifact = java_compile(&toolchain, &src, &tmp.path().join("a.jar"), &opts()).unwrap();
        assert_eq!(artifact.target, 11);
    }

    #[test]
    fn test_upgrade_is_not_shared_between_invocations() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();

        let newer = FakeToolchain::new(21);
        java_compile(&newer, &src, &tmp.path().join("a.jar"), &opts()).unwrap();

        let older = FakeToolchain::new(11);
        let artifact = java_compile(&older, &src, &tmp.path().join("b.jar"), &opts()).unwrap();
        assert_eq!(artifact.target, 11);
    }

    #[test]
    fn test_classpath_order_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();

        let toolchain = FakeToolchain::new(11);
        let opts = JavaCompileOptions {
            classpath: Some("z.jar:a.jar:z.jar".to_string()),
            ..opts()
        };
        java_compile(&toolchain, &src, &tmp.path().join("out"), &opts).unwrap();

        let task = toolchain.last_task().unwrap();
        assert_eq!(
            task.classpath.entries(),
            &[
                PathBuf::from("z.jar"),
                PathBuf::from("a.jar"),
                PathBuf::from("z.jar"),
            ]
        );
    }

    #[test]
    fn test_compile_failure_is_typed_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Broken.java");
        fs::write(&src, "class Broken {").unwrap();
        let jar = tmp.path().join("out.jar");

        let toolchain = FakeToolchain::failing("Broken.java:1: error: reached end of file while parsing");
        let err = java_compile(&toolchain, &src, &jar, &opts()).unwrap_err();

        match err {
            CompileError::CompilationFailed { diagnostics } => {
                assert!(diagnostics.contains("reached end of file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!jar.exists());
    }

    #[test]
    fn test_temp_dir_removed_on_success_and_failure() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();

        let ok = FakeToolchain::new(11);
        java_compile(&ok, &src, &tmp.path().join("out.jar"), &opts()).unwrap();
        let used = ok.last_task().unwrap().class_output;
        assert!(!used.exists());

        let failing = FakeToolchain::failing("error");
        java_compile(&failing, &src, &tmp.path().join("out2.jar"), &opts()).unwrap_err();
        let used = failing.last_task().unwrap().class_output;
        assert!(!used.exists());
    }

    #[test]
    fn test_empty_directory_reports_no_sources() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("empty");
        fs::create_dir_all(&src).unwrap();

        let toolchain = FakeToolchain::new(11);
        let err = java_compile(&toolchain, &src, &tmp.path().join("out.jar"), &opts()).unwrap_err();

        assert!(matches!(err, CompileError::NoSources { .. }));
        assert!(toolchain.last_task().is_none());
    }

    #[test]
    fn test_invalid_source_path() {
        let tmp = TempDir::new().unwrap();
        let toolchain = FakeToolchain::new(11);

        let err = java_compile(
            &toolchain,
            &tmp.path().join("missing"),
            &tmp.path().join("out.jar"),
            &opts(),
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::InvalidSource { .. }));
    }

    #[test]
    fn test_directory_output_overwrites_existing_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Hello.java");
        fs::write(&src, "class Hello {}").unwrap();
        let out = tmp.path().join("classes");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("Hello.class"), b"stale").unwrap();

        let toolchain = FakeToolchain::new(11);
        java_compile(&toolchain, &src, &out, &opts()).unwrap();

        assert_ne!(fs::read(out.join("Hello.class")).unwrap(), b"stale");
    }
}
