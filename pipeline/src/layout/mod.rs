//! Per-table column layouts, and the run configuration that lists them.


use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tabula_wrapper::TabulaExtractionMethod;

/// Column positions of the fields of a single intermediate table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableLayout {
    /// Path of the intermediate table within the table store.
    pub table: PathBuf,
    /// Catalog year that the table describes.
    pub year: i32,
    /// First column of the semester window. The window holds two columns (first and second
    /// semester) for each grade.
    pub first_semester_column: usize,
    pub name_column: usize,
    /// Column holding a combined category/requirement cell such as "전필". When absent, the
    /// category is inferred from the course code and the course is taken as required.
    #[serde(default)]
    pub type_column: Option<usize>,
    /// Column of the course code. Shifted right by one for rows where the name cell holds a
    /// line break.
    pub code_column: usize,
    pub credit_column: usize,
    /// Cell contents marking a course as offered in a semester.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Number of grades covered by the semester window.
    #[serde(default = "default_grades")]
    pub grades: usize,
    /// Course code prefix of major courses, used when there is no `type_column`.
    #[serde(default = "default_major_code_prefix")]
    pub major_code_prefix: String,
    /// Number of leading rows to skip. The first row of an intermediate table is the header row
    /// of the extracted table.
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,
}

fn default_marker() -> String {
    "○".to_string()
}

fn default_grades() -> usize {
    4
}

fn default_major_code_prefix() -> String {
    "CSE".to_string()
}

fn default_skip_rows() -> usize {
    1
}

impl TableLayout {
    /// Creates a [TableLayout] with defaults for all optional fields.
    pub fn new(
        table: impl Into<PathBuf>,
        year: i32,
        first_semester_column: usize,
        name_column: usize,
        type_column: Option<usize>,
        code_column: usize,
        credit_column: usize,
    ) -> Self {
        Self {
            table: table.into(),
            year,
            first_semester_column,
            name_column,
            type_column,
            code_column,
            credit_column,
            marker: default_marker(),
            grades: default_grades(),
            major_code_prefix: default_major_code_prefix(),
            skip_rows: default_skip_rows(),
        }
    }

    /// Columns of the semester window, in scan order. Saturates at `usize::MAX` for layouts
    /// that [TableLayout::validate] rejects with [LayoutError::WindowOverflow].
    pub fn semester_columns(&self) -> std::ops::Range<usize> {
        let end = self.semester_window_end().unwrap_or(usize::MAX);
        self.first_semester_column..end
    }

    fn semester_window_end(&self) -> Option<usize> {
        self.grades
            .checked_mul(2)
            .and_then(|width| self.first_semester_column.checked_add(width))
    }

    /// Checks that the layout is self-consistent.
    pub fn validate(&self) -> std::result::Result<(), LayoutError> {
        if self.grades == 0 {
            return Err(LayoutError::NoGrades);
        }
        if self.marker.trim().is_empty() {
            return Err(LayoutError::EmptyMarker);
        }
        if self.semester_window_end().is_none() {
            return Err(LayoutError::WindowOverflow {
                first_semester_column: self.first_semester_column,
                grades: self.grades,
            });
        }

        let window = self.semester_columns();
        let fields = [
            ("name", Some(self.name_column)),
            ("type", self.type_column),
            ("code", Some(self.code_column)),
            ("credit", Some(self.credit_column)),
        ];
        for (field, column) in fields {
            if let Some(column) = column {
                if window.contains(&column) {
                    return Err(LayoutError::FieldInSemesterWindow { field, column });
                }
            }
        }
        Ok(())
    }
}

/// Problems with a [TableLayout].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout must cover at least one grade")]
    NoGrades,
    #[error("layout marker must not be empty")]
    EmptyMarker,
    #[error("{field} column {column} lies within the semester columns")]
    FieldInSemesterWindow { field: &'static str, column: usize },
    #[error("{grades} grade(s) from column {first_semester_column} overflow the column index")]
    WindowOverflow {
        first_semester_column: usize,
        grades: usize,
    },
}

/// A PDF to extract tables from, and where its tables go in the table store.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Source {
    pub pdf: PathBuf,
    /// Directory within the table store that receives the tables as `table_<n>.csv`.
    pub tables_dir: PathBuf,
    #[serde(default)]
    pub method: TabulaExtractionMethod,
}

impl Source {
    pub fn new(pdf: impl Into<PathBuf>, tables_dir: impl Into<PathBuf>) -> Self {
        Self {
            pdf: pdf.into(),
            tables_dir: tables_dir.into(),
            method: TabulaExtractionMethod::default(),
        }
    }
}

/// Everything a run needs: the PDFs, the layouts of the tables to turn into course records, and
/// where to write them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RunConfig {
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub layouts: Vec<TableLayout>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("curriculum_map.csv")
}

impl RunConfig {
    /// Reads a YAML encoded [RunConfig], validating its layouts.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let cfg: RunConfig = serde_yaml_ng::from_reader(r).context("parsing run configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads a YAML encoded [RunConfig] from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("opening run configuration {:?}", path))?;
        Self::from_reader(f).with_context(|| format!("loading run configuration {:?}", path))
    }

    /// Loads from `path` if given, otherwise returns [RunConfig::builtin].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (index, layout) in self.layouts.iter().enumerate() {
            layout
                .validate()
                .with_context(|| format!("layout [{index}] for table {:?}", layout.table))?;
        }
        Ok(())
    }

    /// The department progression maps for catalog years 2019 to 2024.
    ///
    /// Each year has a course table listing major courses with a category/requirement column,
    /// and a curriculum table without one.
    pub fn builtin() -> Self {
        let sources = vec![
            Source::new("2024_curri.pdf", "2024_curri"),
            Source::new("2023_curri.pdf", "2023_curri"),
            Source::new("2019~2022_curri.pdf", "2019~2022_curri"),
        ];

        #[rustfmt::skip]
        let layouts = vec![
            TableLayout::new("2024_curri/table_3.csv", 2024, 4, 2, Some(3), 1, 16),
            TableLayout::new("2024_curri/table_1.csv", 2024, 8, 4, None, 3, 7),
            TableLayout::new("2023_curri/table_3.csv", 2023, 4, 2, Some(3), 1, 16),
            TableLayout::new("2023_curri/table_2.csv", 2023, 8, 4, None, 3, 7),
            TableLayout::new("2019~2022_curri/table_80.csv", 2022, 4, 2, Some(3), 1, 16),
            TableLayout::new("2019~2022_curri/table_79.csv", 2022, 8, 4, None, 3, 7),
            TableLayout::new("2019~2022_curri/table_62.csv", 2021, 4, 2, Some(3), 1, 16),
            TableLayout::new("2019~2022_curri/table_61.csv", 2021, 8, 4, None, 3, 7),
            TableLayout::new("2019~2022_curri/table_32.csv", 2020, 5, 2, Some(3), 1, 17),
            TableLayout::new("2019~2022_curri/table_31.csv", 2020, 8, 5, None, 3, 7),
            TableLayout::new("2019~2022_curri/table_2.csv", 2019, 5, 2, Some(3), 1, 17),
            TableLayout::new("2019~2022_curri/table_1.csv", 2019, 8, 5, None, 3, 7),
        ];

        Self {
            sources,
            layouts,
            output: default_output(),
        }
    }
}
