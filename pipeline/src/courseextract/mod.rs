//! Turns the rows of an intermediate table into [CourseRecord]s, using the column positions of
//! a [TableLayout].

#[cfg(test)]
mod tests;

use crate::{
    course::{Category, CourseRecord, Requirement},
    layout::TableLayout,
    table::Table,
    textutil::{clean_text, first_line},
};

/// Error in reading a row of a table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CourseRowError {
    #[error("row index {row}: column {column} is outside of the table width {width}")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        width: usize,
    },
}

/// Extracts the courses in `table`, in row order, then semester column order within each row.
pub fn extract_courses(
    layout: &TableLayout,
    table: &Table,
) -> Result<Vec<CourseRecord>, CourseRowError> {
    let mut records = Vec::new();
    for row_index in layout.skip_rows..table.len() {
        RowReader { table, row_index }.extract_into(layout, &mut records)?;
    }
    log::debug!(
        "Extracted {} course record(s) from {} row(s) of {:?}.",
        records.len(),
        table.len().saturating_sub(layout.skip_rows),
        layout.table,
    );
    Ok(records)
}

struct RowReader<'a> {
    table: &'a Table,
    row_index: usize,
}

impl<'a> RowReader<'a> {
    fn cell(&self, column: usize) -> Result<&'a str, CourseRowError> {
        self.table
            .cell(self.row_index, column)
            .ok_or(CourseRowError::ColumnOutOfRange {
                row: self.row_index,
                column,
                width: self.table.width(),
            })
    }

    /// Reads the text before any line break in the cell, and whether there was a line break.
    fn first_line(&self, column: usize) -> Result<(String, bool), CourseRowError> {
        let (text, had_break) = first_line(self.cell(column)?);
        let mut text = text.to_string();
        clean_text(&mut text);
        Ok((text, had_break))
    }

    fn category_requirement(
        &self,
        layout: &TableLayout,
        code: &str,
    ) -> Result<(Category, Requirement), CourseRowError> {
        let Some(type_column) = layout.type_column else {
            let category = if code.starts_with(&layout.major_code_prefix) {
                Category::Major
            } else {
                Category::General
            };
            return Ok((category, Requirement::Required));
        };

        let mut marks = self.cell(type_column)?.trim().chars();
        let category = match marks.next() {
            Some(Category::MAJOR_MARK) => Category::Major,
            _ => Category::General,
        };
        let requirement = match marks.next() {
            Some(Requirement::REQUIRED_MARK) => Requirement::Required,
            _ => Requirement::Elective,
        };
        Ok((category, requirement))
    }

    fn extract_into(
        &self,
        layout: &TableLayout,
        records: &mut Vec<CourseRecord>,
    ) -> Result<(), CourseRowError> {
        let (name, name_had_break) = self.first_line(layout.name_column)?;
        // A line break in the name cell pushes the code one column to the right.
        let code_column = layout.code_column + usize::from(name_had_break);
        let (code, _) = self.first_line(code_column)?;
        let (category, requirement) = self.category_requirement(layout, &code)?;
        let credit = self.cell(layout.credit_column)?;

        for column in layout.semester_columns() {
            if self.cell(column)?.trim() != layout.marker {
                continue;
            }
            let offset = column - layout.first_semester_column;
            records.push(CourseRecord {
                year: layout.year,
                grade: (offset / 2 + 1) as u32,
                semester: (offset % 2 + 1) as u32,
                name: name.clone(),
                category,
                requirement,
                code: code.clone(),
                credit: credit.to_string(),
            });
        }
        Ok(())
    }
}
