//! Where submodule designs are looked up.
//!
//! A design's own directory always comes first, followed by the library
//! directories its `#library` statements added, in statement order.

use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of design files.
pub const DESIGN_EXTENSION: &str = "vbi";

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LibraryError {
    /// The path doesn't name an existing directory.
    NotFound { path: String },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotFound { path } => {
                write!(f, "Library '{path}' doesn't exist or is invalid.")
            }
        }
    }
}

impl std::error::Error for LibraryError {}

#[derive(Clone, Debug)]
pub struct SearchPath {
    design_dir: PathBuf,
    libraries: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(design_dir: impl Into<PathBuf>) -> Self {
        SearchPath {
            design_dir: design_dir.into(),
            libraries: Vec::new(),
        }
    }

    pub fn design_dir(&self) -> &Path {
        &self.design_dir
    }

    pub fn libraries(&self) -> &[PathBuf] {
        &self.libraries
    }

    /// Add a library directory, relative paths resolving against the
    /// design's directory. Adding the same directory twice is a no-op.
    pub fn add_library(&mut self, path: &str) -> Result<&Path, LibraryError> {
        let joined = self.design_dir.join(path);
        if !joined.is_dir() {
            return Err(LibraryError::NotFound {
                path: path.to_owned(),
            });
        }
        let index = match self.libraries.iter().position(|lib| *lib == joined) {
            Some(index) => index,
            None => {
                tracing::debug!(library = %joined.display(), "library added");
                self.libraries.push(joined);
                self.libraries.len() - 1
            }
        };
        Ok(&self.libraries[index])
    }

    /// Every path `design` could live at, in lookup order.
    pub fn candidates<'s>(&'s self, design: &'s str) -> impl Iterator<Item = PathBuf> + 's {
        std::iter::once(&self.design_dir)
            .chain(&self.libraries)
            .map(move |dir| dir.join(design).with_extension(DESIGN_EXTENSION))
    }

    /// First candidate that exists as a file.
    pub fn locate(&self, design: &str) -> Option<PathBuf> {
        self.candidates(design).find(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests;
