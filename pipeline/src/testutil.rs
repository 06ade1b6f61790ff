use crate::tabula_wrapper::{JsonCell, JsonRow, JsonTable};

/// Builds a [JsonTable] as Tabula would return it for `page_number`, with the given cell
/// texts.
pub fn json_table(page_number: i32, rows: &[&[&str]]) -> JsonTable {
    JsonTable {
        extraction_method: "lattice".to_string(),
        page_number,
        top: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
        right: 0.0,
        bottom: 0.0,
        data: rows
            .iter()
            .map(|row| {
                JsonRow(
                    row.iter()
                        .map(|text| JsonCell {
                            top: 0.0,
                            left: 0.0,
                            width: 0.0,
                            height: 0.0,
                            text: text.to_string(),
                        })
                        .collect(),
                )
            })
            .collect(),
    }
}
