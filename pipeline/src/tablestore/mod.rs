//! Storage for intermediate tables extracted from PDFs, rooted at either a directory or a ZIP
//! archive.

mod dir;
mod zip;

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

use crate::table::Table;

pub use dir::DirTableStore;
pub use zip::ZipTableStore;

/// Protocol for reading and writing intermediate tables.
pub trait TableStore {
    /// Writes `table` as CSV to `path`, replacing any existing table there.
    fn write_table(&self, path: &Path, table: &Table) -> Result<()>;

    /// Reads the table at `path`.
    fn read_table(&self, path: &Path) -> Result<Table>;

    /// Returns `true` if a table exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns the paths of all stored tables. The order is undefined.
    fn iter_tables(&self) -> Result<Vec<PathBuf>>;

    /// Completes any pending writes.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Concrete error type returned by [TableStore] implementations for cases that might reasonably
/// be handled by callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("path is not linear relative because it contains a {0} component")]
    NonLinearRelativePath(NonRelativePathType),
    #[error("table not found")]
    NotFound,
}

impl StoreError {
    /// Returns `true` if `err` is this [StoreError].
    pub fn eq_anyhow(&self, err: &anyhow::Error) -> bool {
        err.downcast_ref::<StoreError>() == Some(self)
    }
}

/// Type of path `Component` causing a path to be non-relative.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum NonRelativePathType {
    #[strum(to_string = "prefix")]
    Prefix,
    #[strum(to_string = "root directory")]
    RootDir,
    #[strum(to_string = "current directory")]
    CurDir,
    #[strum(to_string = "parent directory")]
    ParentDir,
}

/// Kind of [TableStore] to use.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum StoreType {
    Dir,
    Zip,
}

impl StoreType {
    /// Resolves the [StoreType] to use for `path`. An explicit choice wins, otherwise it is
    /// guessed from what exists at `path`, or the suffix of `path`.
    pub fn resolve_auto(explicit: Option<StoreType>, path: &Path) -> StoreType {
        if let Some(store_type) = explicit {
            return store_type;
        }

        if path.is_dir() {
            StoreType::Dir
        } else if path.is_file() {
            StoreType::Zip
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        {
            StoreType::Zip
        } else {
            StoreType::Dir
        }
    }

    /// Opens a [TableStore] of this type at `path`.
    pub fn open(self, path: &Path) -> Result<Box<dyn TableStore>> {
        Ok(match self {
            StoreType::Dir => Box::new(DirTableStore::new(path)),
            StoreType::Zip => Box::new(ZipTableStore::new(path)?),
        })
    }
}

/// Returns an error if `path` is not strictly relative and linear. That is, it contains only
/// normal components.
fn check_linear_relative(path: &Path) -> Result<()> {
    use std::path::Component::{CurDir, Normal, ParentDir, Prefix, RootDir};
    for component in path.components() {
        let bad_type = match component {
            Normal(_) => continue,
            Prefix(_) => NonRelativePathType::Prefix,
            RootDir => NonRelativePathType::RootDir,
            CurDir => NonRelativePathType::CurDir,
            ParentDir => NonRelativePathType::ParentDir,
        };
        return Err(anyhow!(StoreError::NonLinearRelativePath(bad_type)));
    }
    Ok(())
}
