//! Extracts every table of a source PDF into the table store.

#[cfg(test)]
mod tests;

use std::{collections::BTreeSet, path::PathBuf};

use anyhow::{Context, Result};

use crate::{
    layout::Source,
    table::Table,
    tablestore::TableStore,
    tabula_wrapper::{TabulaExtractionRequest, TabulaExtractor},
};

/// Tables written to the table store from a single PDF.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct ExtractedSource {
    /// Paths of the written tables, in document order.
    pub table_paths: Vec<PathBuf>,
    /// Pages that tables were found on.
    pub pages: BTreeSet<i32>,
}

/// Returns the path within the table store of the `number`th (1-based) table of a document.
pub fn table_path(source: &Source, number: usize) -> PathBuf {
    source.tables_dir.join(format!("table_{number}.csv"))
}

/// Extracts all tables from `source.pdf` and writes them to `store` as
/// `<tables_dir>/table_<n>.csv`, numbered from 1 in page order across the whole document.
pub fn extract_source_tables(
    tabula: &dyn TabulaExtractor,
    store: &dyn TableStore,
    source: &Source,
) -> Result<ExtractedSource> {
    let request = TabulaExtractionRequest::whole_document(source.pdf.clone(), source.method);
    let mut table_set = tabula
        .extract_tables(request)
        .with_context(|| format!("extracting tables from {:?}", source.pdf))?;

    // Tabula reports tables page by page, but keep the numbering stable regardless.
    table_set.0.sort_by_key(|table| table.page_number);

    let mut extracted = ExtractedSource::default();
    for (index, json_table) in table_set.0.into_iter().enumerate() {
        let path = table_path(source, index + 1);
        extracted.pages.insert(json_table.page_number);

        let table = Table::from(json_table);
        store
            .write_table(&path, &table)
            .with_context(|| format!("writing table {:?}", path))?;
        log::debug!("Wrote {:?} ({} row(s)).", path, table.len());

        extracted.table_paths.push(path);
    }

    log::info!(
        "Extracted {} table(s) from {} page(s) of {:?}.",
        extracted.table_paths.len(),
        extracted.pages.len(),
        source.pdf,
    );
    Ok(extracted)
}
