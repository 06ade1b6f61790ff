use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};

use crate::table::Table;

use super::{StoreError, TableStore, check_linear_relative};

/// [TableStore] holding tables as files under a directory.
#[derive(Debug)]
pub struct DirTableStore {
    dir_path: PathBuf,
}

impl DirTableStore {
    pub fn new<P>(dir_path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            dir_path: dir_path.into(),
        }
    }
}

impl TableStore for DirTableStore {
    fn write_table(&self, path: &Path, table: &Table) -> Result<()> {
        check_linear_relative(path)?;
        let full_path = self.dir_path.join(path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {:?}", parent))?;
        }

        let f = File::create(&full_path).with_context(|| format!("creating {:?}", full_path))?;
        let mut w = BufWriter::new(f);
        table.write_csv(&mut w)
    }

    fn read_table(&self, path: &Path) -> Result<Table> {
        check_linear_relative(path)?;
        let full_path = self.dir_path.join(path);

        let f = match File::open(&full_path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(anyhow!(StoreError::NotFound));
            }
            Err(e) => return Err(anyhow!(e)),
        };
        Table::read_csv(f).with_context(|| format!("parsing {:?}", full_path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.dir_path.join(path).is_file()
    }

    fn iter_tables(&self) -> Result<Vec<PathBuf>> {
        let dir_path = &self.dir_path;
        walkdir::WalkDir::new(dir_path)
            .follow_links(false)
            .same_file_system(true)
            .into_iter()
            .filter_map(|dir_entry| match dir_entry {
                Err(e) => match e.io_error() {
                    // NotFound for dir_path implies no entries at all,
                    // which is not an error, just an empty store.
                    Some(io_err)
                        if io_err.kind() == std::io::ErrorKind::NotFound
                            && e.path() == Some(dir_path.as_path()) =>
                    {
                        None
                    }
                    _ => Some(Err(anyhow!(e))),
                },
                Ok(dir_entry) if dir_entry.file_type().is_file() => Some(
                    dir_entry
                        .path()
                        .strip_prefix(dir_path)
                        .map(Path::to_owned)
                        .map_err(|e| anyhow!(e)),
                ),
                _ => None,
            })
            .collect()
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
