//! Writes generated units to the output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use zedgen_compiler::GeneratedUnit;

/// Filesystem errors while writing generated files.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A unit's file name would escape the output directory.
    #[error("refusing to write '{file_name}' outside the output directory")]
    InvalidFileName { file_name: String },
}

/// Writes every unit under `directory`, creating it first.
///
/// File names are checked before anything touches the disk. Existing files
/// with the same names are overwritten.
pub fn write_units(directory: &Path, units: &[GeneratedUnit]) -> Result<Vec<PathBuf>, WriteError> {
    for unit in units {
        let name = Path::new(&unit.file_name);
        let plain = name.file_name().is_some_and(|f| f == name.as_os_str());
        if !plain {
            return Err(WriteError::InvalidFileName {
                file_name: unit.file_name.clone(),
            });
        }
    }

    fs::create_dir_all(directory).map_err(|source| WriteError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = directory.join(&unit.file_name);
        fs::write(&path, &unit.content).map_err(|source| WriteError::WriteFile {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = unit.content.len(), "wrote file");
        written.push(path);
    }
    Ok(written)
}
