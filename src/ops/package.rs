//! Jar packaging.
//!
//! Every `.class` file under a root becomes one archive entry named by its
//! `/`-separated path relative to that root. The archive is assembled in
//! memory and then moved into place, so a failed run never leaves a partial
//! jar at the destination.

use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use tempfile::NamedTempFile;
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::core::source::CLASS_EXTENSION;
use crate::util::fs::{
    glob_files_with_extension, normalize_path, relative_path, to_slash_path,
};

/// Failure while writing a jar.
#[derive(Debug, Error, Diagnostic)]
pub enum PackageError {
    #[error("class directory not found: {}", path.display())]
    #[diagnostic(code(jarwright::package::missing_root))]
    MissingRoot { path: PathBuf },

    #[error("failed to scan {} for class files: {message}", path.display())]
    #[diagnostic(code(jarwright::package::scan))]
    Scan { path: PathBuf, message: String },

    #[error("class file {} is not under {}", path.display(), root.display())]
    #[diagnostic(code(jarwright::package::outside_root))]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("failed to read {}", path.display())]
    #[diagnostic(code(jarwright::package::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode jar entry `{entry}`")]
    #[diagnostic(code(jarwright::package::encode))]
    Encode {
        entry: String,
        #[source]
        source: ZipError,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(
        code(jarwright::package::write),
        help("check that the output directory is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Package every class file under `root` into the jar at `archive_path`.
///
/// Parent directories of `archive_path` are created as needed and an existing
/// file is replaced. Entries are written in sorted order. Returns the number
/// of entries written.
pub fn package_as_archive(archive_path: &Path, root: &Path) -> Result<usize, PackageError> {
    if !root.is_dir() {
        return Err(PackageError::MissingRoot {
            path: root.to_path_buf(),
        });
    }
    let root = normalize_path(root);

    let classes =
        glob_files_with_extension(&root, CLASS_EXTENSION).map_err(|e| PackageError::Scan {
            path: root.clone(),
            message: format!("{:#}", e),
        })?;

    let mut entries = Vec::with_capacity(classes.len());
    for class in &classes {
        let name = to_slash_path(&relative_path(&root, class)).ok_or_else(|| {
            PackageError::OutsideRoot {
                path: class.clone(),
                root: root.clone(),
            }
        })?;
        let bytes = std::fs::read(class).map_err(|source| PackageError::Read {
            path: class.clone(),
            source,
        })?;
        entries.push((name, bytes));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let bytes = encode_jar(&entries)?;
    write_atomically(archive_path, &bytes)?;

    tracing::debug!(
        "wrote {} entries to {}",
        entries.len(),
        archive_path.display()
    );

    Ok(entries.len())
}

/// Encode `(name, contents)` pairs as an in-memory jar with default settings.
fn encode_jar(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, PackageError> {
    let mut jar = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, contents) in entries {
        let encode_err = |source: ZipError| PackageError::Encode {
            entry: name.clone(),
            source,
        };

        jar.start_file(name.as_str(), options).map_err(encode_err)?;
        jar.write_all(contents)
            .map_err(|e| encode_err(ZipError::Io(e)))?;
    }

    let cursor = jar.finish().map_err(|source| PackageError::Encode {
        entry: "<central directory>".to_string(),
        source,
    })?;

    Ok(cursor.into_inner())
}

/// Write `bytes` to a temp file next to `path`, then rename it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), PackageError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let write_err = |source: io::Error| PackageError::Write {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(&parent).map_err(|source| PackageError::Write {
        path: parent.clone(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}
