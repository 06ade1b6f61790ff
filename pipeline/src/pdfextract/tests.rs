use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use googletest::prelude::*;
use tempfile::tempdir;

use crate::{
    tablestore::DirTableStore,
    tabula_wrapper::{JsonTableSet, MockTabulaExtractor, TabulaExtractionMethod},
    testutil::json_table,
};

use super::*;

fn source() -> Source {
    Source::new("2024_curri.pdf", "2024_curri")
}

#[gtest]
fn test_table_path_is_numbered_within_tables_dir() {
    expect_that!(
        table_path(&source(), 3),
        eq(Path::new("2024_curri/table_3.csv"))
    );
}

#[gtest]
fn test_writes_every_table_in_page_order() -> Result<()> {
    let mut tabula = MockTabulaExtractor::new();
    tabula
        .expect_extract_tables()
        .withf(|request| {
            request.pdf_path == Path::new("2024_curri.pdf")
                && request.pages.is_none()
                && request.guess
                && request.use_returns
                && request.method == TabulaExtractionMethod::Guess
        })
        .times(1)
        .returning(|_| {
            Ok(JsonTableSet(vec![
                json_table(1, &[&["교육과정"], &["CSE1010", "○"]]),
                json_table(3, &[&["전공 교과목 편성표"]]),
                json_table(1, &[&["두번째"]]),
                json_table(2, &[]),
            ]))
        });

    let temp_dir = tempdir()?;
    let store = DirTableStore::new(temp_dir.path());

    let extracted = extract_source_tables(&tabula, &store, &source())?;

    expect_that!(
        extracted,
        eq(&ExtractedSource {
            table_paths: vec![
                PathBuf::from("2024_curri/table_1.csv"),
                PathBuf::from("2024_curri/table_2.csv"),
                PathBuf::from("2024_curri/table_3.csv"),
                PathBuf::from("2024_curri/table_4.csv"),
            ],
            pages: [1, 2, 3].into(),
        })
    );
    expect_that!(
        store.read_table(Path::new("2024_curri/table_1.csv"))?,
        eq(&Table::from([vec!["교육과정"], vec!["CSE1010", "○"]]))
    );
    expect_that!(
        store.read_table(Path::new("2024_curri/table_2.csv"))?,
        eq(&Table::from([vec!["두번째"]]))
    );
    expect_that!(
        store.read_table(Path::new("2024_curri/table_3.csv"))?,
        eq(&Table::default())
    );
    expect_that!(
        store.read_table(Path::new("2024_curri/table_4.csv"))?,
        eq(&Table::from([vec!["전공 교과목 편성표"]]))
    );
    Ok(())
}

#[gtest]
fn test_passes_source_method() -> Result<()> {
    let mut tabula = MockTabulaExtractor::new();
    tabula
        .expect_extract_tables()
        .withf(|request| request.method == TabulaExtractionMethod::Lattice)
        .times(1)
        .returning(|_| Ok(JsonTableSet::default()));

    let temp_dir = tempdir()?;
    let store = DirTableStore::new(temp_dir.path());
    let source = Source {
        method: TabulaExtractionMethod::Lattice,
        ..source()
    };

    expect_that!(
        extract_source_tables(&tabula, &store, &source)?,
        eq(&ExtractedSource::default())
    );
    Ok(())
}

#[gtest]
fn test_tabula_failure_is_reported_with_pdf_path() -> Result<()> {
    let mut tabula = MockTabulaExtractor::new();
    tabula
        .expect_extract_tables()
        .returning(|_| Err(anyhow!("no such file")));

    let temp_dir = tempdir()?;
    let store = DirTableStore::new(temp_dir.path());

    expect_that!(
        extract_source_tables(&tabula, &store, &source()),
        err(displays_as(contains_substring("2024_curri.pdf")))
    );
    expect_that!(store.iter_tables()?, is_empty());
    Ok(())
}
