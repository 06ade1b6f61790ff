use googletest::prelude::*;
use test_casing::test_casing;

use super::*;

/// Layout of a table without a category/requirement column:
/// `[_, _, _, code, name, _, _, credit, 1-1, 1-2, 2-1, 2-2, 3-1, 3-2, 4-1, 4-2]`.
fn curriculum_layout() -> TableLayout {
    TableLayout::new("2024_curri/table_1.csv", 2024, 8, 4, None, 3, 7)
}

/// Layout of a table with a category/requirement column:
/// `[_, code, name, type, 1-1, ..., 4-2, _, _, _, _, credit]`.
fn course_layout() -> TableLayout {
    TableLayout::new("2024_curri/table_3.csv", 2024, 4, 2, Some(3), 1, 16)
}

fn header_row(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("h{i}")).collect()
}

/// Builds a 16 column row for [curriculum_layout].
fn curriculum_row(code: &str, name: &str, credit: &str, marks: [&str; 8]) -> Vec<String> {
    let mut row: Vec<String> = vec!["", "", "", code, name, "", "", credit]
        .into_iter()
        .map(str::to_string)
        .collect();
    row.extend(marks.iter().map(|s| s.to_string()));
    row
}

/// Builds a 17 column row for [course_layout].
fn course_row(code: &str, name: &str, type_cell: &str, credit: &str, marks: [&str; 8]) -> Vec<String> {
    let mut row: Vec<String> = vec!["", code, name, type_cell]
        .into_iter()
        .map(str::to_string)
        .collect();
    row.extend(marks.iter().map(|s| s.to_string()));
    row.extend(["", "", "", ""].map(str::to_string));
    row.push(credit.to_string());
    row
}

fn grade_semesters(records: &[CourseRecord]) -> Vec<(u32, u32)> {
    records.iter().map(|r| (r.grade, r.semester)).collect()
}

const NO_MARKS: [&str; 8] = ["", "", "", "", "", "", "", ""];

fn record(
    grade: u32,
    semester: u32,
    name: &str,
    category: Category,
    requirement: Requirement,
    code: &str,
    credit: &str,
) -> CourseRecord {
    CourseRecord {
        year: 2024,
        grade,
        semester,
        name: name.to_string(),
        category,
        requirement,
        code: code.to_string(),
        credit: credit.to_string(),
    }
}

#[gtest]
fn test_skips_header_row() {
    let mut header = curriculum_row("CSE1010", "헤더", "3", NO_MARKS);
    header[8] = "○".to_string();
    let table = Table::from([header]);

    expect_that!(extract_courses(&curriculum_layout(), &table), ok(is_empty()));
}

#[gtest]
fn test_name_line_break_truncates_and_shifts_code_column() {
    let layout = TableLayout::new("t.csv", 2024, 3, 0, None, 1, 11);
    let row = |name: &str| -> Vec<String> {
        [name, "CSE1000", "CSE2010\n(3-0-0)", "", "○", "", "", "", "", "", "", "3"]
            .map(str::to_string)
            .to_vec()
    };
    let table = Table::from([header_row(12), row("자료구조\nData Structures"), row("자료구조")]);

    expect_that!(
        extract_courses(&layout, &table),
        ok(elements_are![
            eq(&record(1, 2, "자료구조", Category::Major, Requirement::Required, "CSE2010", "3")),
            eq(&record(1, 2, "자료구조", Category::Major, Requirement::Required, "CSE1000", "3")),
        ])
    );
}

#[gtest]
fn test_without_type_column_infers_category_from_code_prefix() {
    let table = Table::from([
        header_row(16),
        curriculum_row("CSE1010", "컴퓨터프로그래밍", "3", ["○", "", "", "", "", "", "", ""]),
        curriculum_row("GEN1001", "글쓰기", "2", ["○", "", "", "", "", "", "", ""]),
    ]);

    expect_that!(
        extract_courses(&curriculum_layout(), &table),
        ok(elements_are![
            eq(&record(
                1,
                1,
                "컴퓨터프로그래밍",
                Category::Major,
                Requirement::Required,
                "CSE1010",
                "3",
            )),
            eq(&record(
                1,
                1,
                "글쓰기",
                Category::General,
                Requirement::Required,
                "GEN1001",
                "2",
            )),
        ])
    );
}

const TYPE_CELL_CASES: &[(&str, Category, Requirement)] = &[
    ("전필", Category::Major, Requirement::Required),
    ("전선", Category::Major, Requirement::Elective),
    ("교필", Category::General, Requirement::Required),
    ("교선", Category::General, Requirement::Elective),
    (" 전필 ", Category::Major, Requirement::Required),
    ("전", Category::Major, Requirement::Elective),
    ("", Category::General, Requirement::Elective),
];

/// Checks the `test_casing` count in `test_type_column_sets_category_and_requirement`.
#[test]
fn test_type_column_sets_category_and_requirement_count() {
    assert_eq!(7, TYPE_CELL_CASES.iter().count());
}

#[test_casing(7, TYPE_CELL_CASES)]
fn test_type_column_sets_category_and_requirement(
    type_cell: &str,
    category: &Category,
    requirement: &Requirement,
) {
    let table = Table::from([
        header_row(17),
        // The code prefix is ignored when there is a type column.
        course_row("CSE3010", "알고리즘", type_cell, "3", ["", "", "", "", "○", "", "", ""]),
    ]);

    assert_that!(
        extract_courses(&course_layout(), &table),
        ok(elements_are![eq(&record(
            3,
            1,
            "알고리즘",
            *category,
            *requirement,
            "CSE3010",
            "3",
        ))])
    );
}

const SINGLE_MARK_CASES: &[(usize, u32, u32)] = &[
    (0, 1, 1),
    (1, 1, 2),
    (2, 2, 1),
    (3, 2, 2),
    (4, 3, 1),
    (5, 3, 2),
    (6, 4, 1),
    (7, 4, 2),
];

/// Checks the `test_casing` count in `test_single_mark_gives_grade_and_semester`.
#[test]
fn test_single_mark_gives_grade_and_semester_count() {
    assert_eq!(8, SINGLE_MARK_CASES.iter().count());
}

#[test_casing(8, SINGLE_MARK_CASES)]
fn test_single_mark_gives_grade_and_semester(offset: &usize, grade: &u32, semester: &u32) {
    let mut marks = NO_MARKS;
    marks[*offset] = "○";
    let table = Table::from([
        header_row(16),
        curriculum_row("CSE2020", "논리회로", "3", marks),
    ]);

    let records = extract_courses(&curriculum_layout(), &table).expect("should extract");
    assert_that!(grade_semesters(&records), elements_are![eq(&(*grade, *semester))]);
}

#[gtest]
fn test_multiple_marks_emit_in_row_then_column_order() {
    let table = Table::from([
        header_row(16),
        curriculum_row("CSE1010", "A", "3", ["", "○", "", "", "", "", "○", ""]),
        curriculum_row("CSE1020", "B", "3", NO_MARKS),
        curriculum_row("CSE1030", "C", "3", ["○", "", "", "", "", "", "", "○"]),
    ]);

    let records = extract_courses(&curriculum_layout(), &table).expect("should extract");
    let summary: Vec<(&str, u32, u32)> = records
        .iter()
        .map(|r| (r.name.as_str(), r.grade, r.semester))
        .collect();
    expect_that!(
        summary,
        elements_are![
            eq(&("A", 1, 2)),
            eq(&("A", 4, 1)),
            eq(&("C", 1, 1)),
            eq(&("C", 4, 2)),
        ]
    );
}

#[gtest]
fn test_marker_ignores_surrounding_whitespace_and_other_symbols() {
    let table = Table::from([
        header_row(16),
        curriculum_row("CSE1010", "A", "3", [" ○ ", "●", "O", "", "", "", "", ""]),
    ]);

    let records = extract_courses(&curriculum_layout(), &table).expect("should extract");
    expect_that!(grade_semesters(&records), elements_are![eq(&(1, 1))]);
}

#[gtest]
fn test_custom_marker_and_grades() {
    let layout = TableLayout {
        marker: "●".to_string(),
        grades: 2,
        ..curriculum_layout()
    };
    let table = Table::from([
        header_row(16),
        // Marks past the two grade window are ignored.
        curriculum_row("CSE1010", "A", "3", ["", "", "", "●", "●", "", "", ""]),
    ]);

    let records = extract_courses(&layout, &table).expect("should extract");
    expect_that!(grade_semesters(&records), elements_are![eq(&(2, 2))]);
}

#[gtest]
fn test_credit_is_verbatim_and_names_are_cleaned() {
    let table = Table::from([
        header_row(16),
        curriculum_row(" CSE1010 ", "  컴퓨터   구조 ", "3.0", ["○", "", "", "", "", "", "", ""]),
    ]);

    expect_that!(
        extract_courses(&curriculum_layout(), &table),
        ok(elements_are![eq(&record(
            1,
            1,
            "컴퓨터 구조",
            Category::Major,
            Requirement::Required,
            "CSE1010",
            "3.0",
        ))])
    );
}

#[gtest]
fn test_short_rows_read_as_empty_cells() {
    let table = Table::from([
        header_row(16),
        vec!["", "", "", "CSE1010", "A", "", "", "3", "○"]
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>(),
    ]);

    let records = extract_courses(&curriculum_layout(), &table).expect("should extract");
    expect_that!(grade_semesters(&records), elements_are![eq(&(1, 1))]);
}

#[gtest]
fn test_column_outside_table_is_error() {
    let table = Table::from([header_row(12), header_row(12)]);

    expect_that!(
        extract_courses(&curriculum_layout(), &table),
        err(eq(&CourseRowError::ColumnOutOfRange {
            row: 1,
            column: 12,
            width: 12,
        }))
    );
}
