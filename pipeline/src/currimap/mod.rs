//! The consolidated curriculum map CSV file.


use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use prettytable::{Cell, Row, Table, format};

use crate::course::{CourseRecord, HEADER};

/// Problems found when reading back a curriculum map.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CurriMapError {
    #[error("unexpected header {found:?}")]
    UnexpectedHeader { found: Vec<String> },
}

/// Handle on a curriculum map file at a path.
#[derive(Clone, Debug)]
pub struct CurriculumMapFile {
    path: PathBuf,
}

impl CurriculumMapFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates or truncates the file, leaving only the header row.
    pub fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {:?}", parent))?;
        }

        let f = File::create(&self.path)
            .with_context(|| format!("creating curriculum map {:?}", self.path))?;
        let mut w = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(f);
        w.write_record(HEADER).context("writing header")?;
        w.flush().context("flushing curriculum map")?;

        log::info!("Initialised curriculum map {:?}.", self.path);
        Ok(())
    }

    /// Appends `records` to the end of the file.
    pub fn append(&self, records: &[CourseRecord]) -> Result<()> {
        let f = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("opening curriculum map {:?} for append", self.path))?;
        let mut w = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .has_headers(false)
            .from_writer(f);

        for (index, record) in records.iter().enumerate() {
            w.serialize(record)
                .with_context(|| format!("writing record index {index}"))?;
        }
        w.flush().context("flushing curriculum map")?;

        log::debug!("Appended {} record(s) to {:?}.", records.len(), self.path);
        Ok(())
    }

    /// Reads all records back from the file.
    pub fn load(&self) -> Result<Vec<CourseRecord>> {
        let mut r = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("opening curriculum map {:?}", self.path))?;

        let headers = r.headers().context("reading header")?;
        if !headers.iter().eq(HEADER) {
            return Err(anyhow!(CurriMapError::UnexpectedHeader {
                found: headers.iter().map(str::to_string).collect(),
            }));
        }

        r.deserialize()
            .enumerate()
            .map(|(index, record)| record.with_context(|| format!("reading record index {index}")))
            .collect()
    }
}

/// Renders `records` as a text table with aligned columns, headed by [HEADER].
pub fn render_table(records: &[CourseRecord]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(HEADER.iter().map(|title| Cell::new(title)).collect()));

    for r in records {
        table.add_row(Row::new(vec![
            Cell::new(&r.year.to_string()).style_spec("r"),
            Cell::new(&r.grade.to_string()).style_spec("r"),
            Cell::new(&r.semester.to_string()).style_spec("r"),
            Cell::new(&r.name),
            Cell::new(&r.category.to_string()),
            Cell::new(&r.requirement.to_string()),
            Cell::new(&r.code),
            Cell::new(&r.credit).style_spec("r"),
        ]));
    }

    table.to_string()
}
