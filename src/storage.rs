use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::Pipeline;

/// An error reading or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file does not exist.
    #[error("Input file '{}' not found.", path.display())]
    InputNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The input file exists but could not be read as UTF-8 text.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// The input path.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// The output file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },
}

/// Reads a whole UTF-8 document.
///
/// # Errors
///
/// Returns [`Error::InputNotFound`] if nothing exists at `path`, and
/// [`Error::Read`] for any other failure, including invalid UTF-8.
pub fn read_document(path: &Path) -> Result<String, Error> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            Error::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(text)
}

/// Writes `text` to `path`, replacing any existing file.
///
/// The parent directory is not created.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be created or written.
pub fn write_document(path: &Path, text: &str) -> Result<(), Error> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote document");
    Ok(())
}

/// Reads `input`, strips it with `pipeline`, and writes the result to
/// `output`.
///
/// Nothing is written if the input cannot be read.
///
/// # Errors
///
/// Returns an error if either file cannot be accessed.
#[instrument(level = "debug", skip(pipeline))]
pub fn convert(input: &Path, output: &Path, pipeline: &Pipeline) -> Result<(), Error> {
    let text = read_document(input)?;
    let plain = pipeline.strip(&text);
    write_document(output, &plain)
}
