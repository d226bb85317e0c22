use std::path::{Path, PathBuf};

use crate::constants::DIST_SUFFIX;
use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use paramgen::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// The path with a trailing `.dist` removed from its file name.
    ///
    /// # Examples
    /// ```
    /// use paramgen::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// let path = Path::new("app/config/parameters.yml.dist");
    /// assert_eq!(
    ///     path.without_dist_suffix().unwrap(),
    ///     PathBuf::from("app/config/parameters.yml")
    /// );
    /// ```
    fn without_dist_suffix(&self) -> Result<PathBuf>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn without_dist_suffix(&self) -> Result<PathBuf> {
        let path = self.to_str_checked()?;
        Ok(PathBuf::from(path.strip_suffix(DIST_SUFFIX).unwrap_or(path)))
    }
}
