use std::{
    cell::RefCell,
    collections::HashSet,
    fs::File,
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use atomic_write_file::AtomicWriteFile;
use tempfile::TempDir;
use zip::{ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::table::Table;

use super::{StoreError, TableStore, check_linear_relative, dir::DirTableStore};

/// [TableStore] holding tables inside a ZIP archive.
///
/// Tables written are staged in a temporary directory, and the archive is rewritten when the
/// store is closed. Tables staged in the temporary directory shadow existing archive entries at
/// the same path.
pub struct ZipTableStore {
    dest_path: PathBuf,
    // None when no archive existed at `dest_path` when opened.
    zip_archive: Option<RefCell<ZipArchive<File>>>,
    // Must live until `TableStore::close` completes.
    staging_tempdir: TempDir,
    staging: DirTableStore,
}

impl ZipTableStore {
    pub fn new(path: &Path) -> Result<Self> {
        let zip_archive = match File::open(path) {
            Ok(f) => Some(RefCell::new(
                ZipArchive::new(f).with_context(|| format!("opening ZIP archive {:?}", path))?,
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(anyhow!(e)),
        };
        let staging_tempdir = TempDir::new().context("creating staging directory")?;
        let staging = DirTableStore::new(staging_tempdir.path());

        Ok(Self {
            dest_path: path.to_owned(),
            zip_archive,
            staging_tempdir,
            staging,
        })
    }

    fn read_archived_table(&self, path: &Path) -> Result<Table> {
        let Some(zip_archive) = &self.zip_archive else {
            return Err(anyhow!(StoreError::NotFound));
        };

        let mut zip_archive = zip_archive.borrow_mut();
        let index = zip_archive
            .index_for_path(path)
            .ok_or(StoreError::NotFound)?;

        let mut zip_file = zip_archive.by_index(index)?;
        let mut buf = Vec::new();
        zip_file.read_to_end(&mut buf)?;

        Table::read_csv(buf.as_slice()).with_context(|| format!("parsing {:?} in archive", path))
    }
}

impl TableStore for ZipTableStore {
    fn write_table(&self, path: &Path, table: &Table) -> Result<()> {
        check_linear_relative(path)?;
        self.staging.write_table(path, table)
    }

    fn read_table(&self, path: &Path) -> Result<Table> {
        check_linear_relative(path)?;
        match self.staging.read_table(path) {
            Ok(table) => Ok(table),
            Err(err) if StoreError::NotFound.eq_anyhow(&err) => self.read_archived_table(path),
            Err(err) => Err(err),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.staging.exists(path)
            || self
                .zip_archive
                .as_ref()
                .is_some_and(|zip_archive| zip_archive.borrow().index_for_path(path).is_some())
    }

    fn iter_tables(&self) -> Result<Vec<PathBuf>> {
        let mut paths = self.staging.iter_tables()?;
        let staged: HashSet<PathBuf> = paths.iter().cloned().collect();

        if let Some(zip_archive) = &self.zip_archive {
            paths.extend(
                zip_archive
                    .borrow()
                    .file_names()
                    .map(PathBuf::from)
                    .filter(|path| !staged.contains(path)),
            );
        }

        Ok(paths)
    }

    fn close(self: Box<Self>) -> Result<()> {
        let Self {
            dest_path,
            zip_archive,
            staging_tempdir,
            staging,
        } = *self;

        let out_file = AtomicWriteFile::open(&dest_path)
            .with_context(|| format!("opening {:?} for writing", dest_path))?;
        let mut zip_writer = ZipWriter::new(out_file);

        // Copy over new/overwriting tables.
        let mut new_paths: HashSet<String> = HashSet::new();
        for path in staging.iter_tables()? {
            let path_str = normalise_path_slashes(&path)?;

            zip_writer.start_file(path_str.as_str(), SimpleFileOptions::default())?;
            let mut r = File::open(staging_tempdir.path().join(&path))?;
            std::io::copy(&mut r, &mut zip_writer)?;
            new_paths.insert(path_str);
        }

        // Copy over existing tables that were not overwritten.
        if let Some(zip_archive) = zip_archive {
            let mut zip_archive = zip_archive.into_inner();
            for index in 0..zip_archive.len() {
                let zip_entry = zip_archive.by_index(index)?;
                if new_paths.contains(zip_entry.name()) {
                    continue;
                }
                zip_writer.raw_copy_file(zip_entry)?;
            }
        }

        let out_file = zip_writer.finish()?;
        out_file
            .commit()
            .with_context(|| format!("committing {:?}", dest_path))?;

        Ok(())
    }
}

/// Normalise a [Path] to use forward slashes, for uniformity of ZIP file entry names between
/// platforms.
fn normalise_path_slashes(p: &Path) -> Result<String> {
    Ok(p.to_str()
        .ok_or_else(|| anyhow!("could not convert path {:?} to UTF-8 string", p))?
        .replace('\\', "/"))
}
