//! Ordered collection of raw level definitions read from a level file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::info;

use crate::rle::DecodeError;

const COMMENT_PREFIX: char = ';';

/// Fatal errors raised while reading or decoding levels.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    /// The level file could not be read.
    #[error("failed to read level file {}", path.display())]
    Io {
        /// Path of the level file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level file contained no level definitions.
    #[error("no level definitions found")]
    Empty,
    /// A level definition could not be decoded into a grid.
    #[error("level {index} could not be decoded")]
    Decode {
        /// Catalog index of the broken definition.
        index: usize,
        /// Decoding failure.
        #[source]
        source: DecodeError,
    },
}

/// Level definitions in file order, indexed from zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalog {
    definitions: Vec<String>,
}

impl LevelCatalog {
    /// Collects every non-comment, non-empty line of a level file.
    pub fn parse(contents: &str) -> Result<Self, LevelLoadError> {
        let definitions: Vec<String> = contents
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim_start().is_empty() && !line.starts_with(COMMENT_PREFIX))
            .map(str::to_owned)
            .collect();

        if definitions.is_empty() {
            return Err(LevelLoadError::Empty);
        }

        Ok(Self { definitions })
    }

    /// Reads and parses the level file at the provided path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&contents)?;
        info!(
            path = %path.display(),
            levels = catalog.len(),
            "level catalog loaded"
        );
        Ok(catalog)
    }

    /// Number of level definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Reports whether the catalog holds no definitions.
    ///
    /// Catalogs built through [`LevelCatalog::parse`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Raw definition stored at the provided index.
    #[must_use]
    pub fn definition(&self, index: usize) -> Option<&str> {
        self.definitions.get(index).map(String::as_str)
    }

    /// Iterates the raw definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(String::as_str)
    }
}
