//! Compile inputs and outputs.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::glob_files_with_extension;

/// Extension of Java source files.
pub const SOURCE_EXTENSION: &str = "java";

/// Extension of compiled class files.
pub const CLASS_EXTENSION: &str = "class";

/// What to compile: one source file, or every source file under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Directory(PathBuf),
}

impl SourceSpec {
    /// Classify an existing path. Returns `None` if it is neither a file nor a directory.
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.is_file() {
            Some(SourceSpec::File(path.to_path_buf()))
        } else if path.is_dir() {
            Some(SourceSpec::Directory(path.to_path_buf()))
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SourceSpec::File(p) | SourceSpec::Directory(p) => p,
        }
    }

    /// Root to hand the compiler as its source path, if any.
    pub fn source_root(&self) -> Option<&Path> {
        match self {
            SourceSpec::File(_) => None,
            SourceSpec::Directory(root) => Some(root),
        }
    }

    /// Source files to pass to the compiler.
    pub fn resolve_files(&self) -> Result<Vec<PathBuf>> {
        match self {
            SourceSpec::File(file) => Ok(vec![file.clone()]),
            SourceSpec::Directory(root) => glob_files_with_extension(root, SOURCE_EXTENSION),
        }
    }
}

/// How compiled output is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutMode {
    /// Package into a jar archive.
    Archive,
    /// Copy the class tree into a directory.
    Directory,
}

impl OutMode {
    /// `.jar` selects [`OutMode::Archive`]; anything else is a directory.
    pub fn for_output(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext == "jar" => OutMode::Archive,
            _ => OutMode::Directory,
        }
    }
}
