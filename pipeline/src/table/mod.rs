
use std::{
    io::{Read, Write},
    ops::{Deref, DerefMut},
};

use anyhow::{Context, Result};

use crate::tabula_wrapper;

/// UTF-8 byte order mark, written at the start of intermediate tables so that spreadsheet
/// software detects the encoding.
const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table(pub Vec<Row>);

impl Table {
    /// Returns the number of columns in the widest row.
    pub fn width(&self) -> usize {
        self.0.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// Returns the cell at `row_index`, `column`. Cells past the end of a short row, but within
    /// [Table::width], read as empty. Returns `None` outside the table.
    pub fn cell(&self, row_index: usize, column: usize) -> Option<&str> {
        let row = self.0.get(row_index)?;
        match row.get(column) {
            Some(cell) => Some(cell.as_str()),
            None if column < self.width() => Some(""),
            None => None,
        }
    }

    /// Writes the table as CSV, all rows included.
    pub fn write_csv<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(UTF8_BOM).context("writing byte order mark")?;

        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .flexible(true)
            .from_writer(w);

        for (row_index, row) in self.0.iter().enumerate() {
            csv_writer
                .write_record(row.iter())
                .with_context(|| format!("writing row index {row_index}"))?;
        }

        csv_writer.flush().context("flushing CSV output")?;
        Ok(())
    }

    /// Reads a table written by [Table::write_csv], or any other headerless CSV.
    pub fn read_csv<R: Read>(mut r: R) -> Result<Self> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf).context("reading CSV data")?;
        let content = buf.strip_prefix(UTF8_BOM).unwrap_or(&buf);

        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content)
            .records()
            .enumerate()
            .map(|(row_index, record)| {
                record
                    .map(|record| Row(record.iter().map(str::to_string).collect()))
                    .with_context(|| format!("reading row index {row_index}"))
            })
            .collect::<Result<Vec<Row>>>()
            .map(Table)
    }
}

impl Deref for Table {
    type Target = Vec<Row>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Table {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<tabula_wrapper::JsonTable> for Table {
    fn from(value: tabula_wrapper::JsonTable) -> Self {
        Table(value.data.into_iter().map(Into::into).collect())
    }
}

impl<C, R> From<C> for Table
where
    C: IntoIterator<Item = R>,
    R: Into<Row>,
{
    fn from(value: C) -> Self {
        Table(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row(pub Vec<String>);

impl Deref for Row {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<tabula_wrapper::JsonRow> for Row {
    fn from(value: tabula_wrapper::JsonRow) -> Self {
        Row(value.0.into_iter().map(|cell| cell.text).collect())
    }
}

impl<C, S> From<C> for Row
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(value: C) -> Self {
        Row(value.into_iter().map(Into::into).collect())
    }
}
