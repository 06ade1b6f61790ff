//! Records of courses offered in a semester of a catalog year.

use serde::{Deserialize, Serialize};

/// Column headings of the curriculum map output, in order.
pub const HEADER: [&str; 8] = [
    "학년도",
    "학년",
    "학기",
    "교과목명",
    "구분",
    "필수 여부",
    "학수번호",
    "학점",
];

/// A course offered in a single semester of a single catalog year.
///
/// Field order matches [HEADER].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CourseRecord {
    #[serde(rename = "학년도")]
    pub year: i32,
    #[serde(rename = "학년")]
    pub grade: u32,
    #[serde(rename = "학기")]
    pub semester: u32,
    #[serde(rename = "교과목명")]
    pub name: String,
    #[serde(rename = "구분")]
    pub category: Category,
    #[serde(rename = "필수 여부")]
    pub requirement: Requirement,
    #[serde(rename = "학수번호")]
    pub code: String,
    #[serde(rename = "학점")]
    pub credit: String,
}

/// Whether a course belongs to the major or to general education.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Category {
    #[serde(rename = "전공")]
    #[strum(serialize = "전공")]
    Major,
    #[serde(rename = "교양")]
    #[strum(serialize = "교양")]
    General,
}

impl Category {
    /// Character that starts a combined category/requirement cell (e.g. "전필") for major
    /// courses.
    pub const MAJOR_MARK: char = '전';
}

/// Whether a course is required or elective.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Requirement {
    #[serde(rename = "필수")]
    #[strum(serialize = "필수")]
    Required,
    #[serde(rename = "선택")]
    #[strum(serialize = "선택")]
    Elective,
}

impl Requirement {
    /// Character in second position of a combined category/requirement cell (e.g. "전필") for
    /// required courses.
    pub const REQUIRED_MARK: char = '필';
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[gtest]
    fn test_labels_display_and_parse() {
        expect_that!(Category::Major.to_string(), eq("전공"));
        expect_that!(Category::General.to_string(), eq("교양"));
        expect_that!(Requirement::Required.to_string(), eq("필수"));
        expect_that!(Requirement::Elective.to_string(), eq("선택"));

        expect_that!("교양".parse::<Category>(), ok(eq(Category::General)));
        expect_that!("선택".parse::<Requirement>(), ok(eq(Requirement::Elective)));
        expect_that!("major".parse::<Category>(), err(anything()));
    }
}
