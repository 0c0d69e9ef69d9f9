use crate::config::{
    BODY_FONT_PT, BORDER_COLOR, BORDER_SIZE, COLUMN_ORDINALS, COLUMN_WIDTH_TARGETS_IN,
    DOCUMENT_TITLE, FONT_NAME, GROUP_HEADER_FONT_PT, INFO_FONT_PT, OUTPUT_FILE_EXTENSION,
    OUTPUT_FILE_PREFIX, PAGE_HEIGHT_IN, PAGE_MARGIN_IN, PAGE_WIDTH_IN, TABLE_HEADERS,
    TABLE_WIDTH_IN, TITLE_FONT_PT,
};
use crate::domain::entities::document::{
    BorderSpec, Caption, PageSetup, TableDocument, TableRowSpec, TextStyle,
};
use crate::domain::entities::group::RowGroup;
use crate::domain::entities::plan::{PlannedRow, RowPlan};
use crate::domain::entities::sheet::{ColumnMapping, LogicalField, SheetRow};

/// Column widths in inches.
///
/// The first column keeps its target; the others share what is left of
/// `table_width` in proportion to their targets.
pub fn column_widths(targets: &[f64], table_width: f64) -> Vec<f64> {
    let Some((&first, rest)) = targets.split_first() else {
        return Vec::new();
    };
    let rest_total: f64 = rest.iter().sum();
    let remaining = table_width - first;

    let mut widths = Vec::with_capacity(targets.len());
    widths.push(first);
    widths.extend(rest.iter().map(|target| {
        if rest_total > 0.0 {
            target / rest_total * remaining
        } else {
            0.0
        }
    }));
    widths
}

/// Orders group headers and data rows, numbering data rows continuously
/// from 1 across groups.
pub fn plan_rows(groups: &[RowGroup]) -> RowPlan {
    let mut rows = Vec::new();
    let mut sequence = 0;
    for group in groups {
        if let Some(key) = &group.key {
            rows.push(PlannedRow::GroupHeader(key.clone()));
        }
        for &row_index in &group.indices {
            sequence += 1;
            rows.push(PlannedRow::Data {
                sequence,
                row_index,
            });
        }
    }
    RowPlan { rows }
}

fn data_cells(sequence: usize, row: &[String], mapping: &ColumnMapping) -> Vec<String> {
    vec![
        sequence.to_string(),
        mapping.value(row, LogicalField::DefectName).to_string(),
        String::new(),
        mapping.value(row, LogicalField::PhotoNumber).to_string(),
        mapping.value(row, LogicalField::ControlledParameter).to_string(),
        mapping.value(row, LogicalField::Note).to_string(),
    ]
}

fn fixed_row(texts: &[&str]) -> TableRowSpec {
    TableRowSpec::Cells {
        texts: texts.iter().map(|text| text.to_string()).collect(),
        style: TextStyle::bold(BODY_FONT_PT),
    }
}

pub fn render_document(
    rows: &[SheetRow],
    plan: &RowPlan,
    mapping: &ColumnMapping,
    source_name: &str,
) -> TableDocument {
    let mut table_rows = Vec::with_capacity(plan.table_row_count());
    table_rows.push(fixed_row(&TABLE_HEADERS));
    table_rows.push(fixed_row(&COLUMN_ORDINALS));

    let empty = SheetRow::new();
    for planned in &plan.rows {
        match planned {
            PlannedRow::GroupHeader(key) => table_rows.push(TableRowSpec::Merged {
                text: key.clone(),
                style: TextStyle::bold(GROUP_HEADER_FONT_PT),
            }),
            PlannedRow::Data {
                sequence,
                row_index,
            } => {
                let row = rows.get(*row_index).unwrap_or(&empty);
                table_rows.push(TableRowSpec::Cells {
                    texts: data_cells(*sequence, row, mapping),
                    style: TextStyle::regular(BODY_FONT_PT),
                });
            }
        }
    }

    TableDocument {
        page: PageSetup {
            width_in: PAGE_WIDTH_IN,
            height_in: PAGE_HEIGHT_IN,
            margin_in: PAGE_MARGIN_IN,
            landscape: true,
        },
        font_name: FONT_NAME.to_string(),
        captions: vec![
            Caption {
                text: DOCUMENT_TITLE.to_string(),
                style: TextStyle::bold(TITLE_FONT_PT),
            },
            Caption {
                text: format!(
                    "Source: {source_name} | Rows: {}",
                    plan.data_row_count()
                ),
                style: TextStyle::italic(INFO_FONT_PT),
            },
            Caption {
                text: String::new(),
                style: TextStyle::regular(BODY_FONT_PT),
            },
        ],
        column_widths_in: column_widths(&COLUMN_WIDTH_TARGETS_IN, TABLE_WIDTH_IN),
        rows: table_rows,
        border: BorderSpec {
            size: BORDER_SIZE,
            color: BORDER_COLOR,
        },
    }
}

/// `Defects_selection_<label>.docx`, labelled with the 1-based row number or
/// the first and last selected rows. `None` for an empty selection.
pub fn output_file_name(indices: &[usize]) -> Option<String> {
    let first = *indices.first()?;
    let last = *indices.last()?;
    let label = if indices.len() == 1 {
        (first + 1).to_string()
    } else {
        format!("{}-{}", first + 1, last + 1)
    };
    Some(format!(
        "{OUTPUT_FILE_PREFIX}{label}.{OUTPUT_FILE_EXTENSION}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn widths_keep_first_column_and_fill_remaining() {
        let widths = column_widths(&COLUMN_WIDTH_TARGETS_IN, TABLE_WIDTH_IN);

        assert_eq!(widths.len(), 6);
        assert!(approx(widths[0], 0.25));
        let rest: f64 = widths[1..].iter().sum();
        assert!(approx(rest, 9.02), "remaining columns sum to {rest}");
        assert!(approx(widths[1] / widths[3], 2.5));
        assert!(approx(widths[2] / widths[3], 1.5));
        assert!(approx(widths[4] / widths[3], 2.5));
        assert!(approx(widths[5] / widths[3], 1.5));
    }

    #[test]
    fn plan_numbers_data_rows_across_groups() {
        let groups = vec![
            RowGroup::new(Some("Beam".to_string()), vec![4, 7]),
            RowGroup::new(Some("Wall".to_string()), vec![0, 1, 2]),
        ];

        let plan = plan_rows(&groups);

        let sequences: Vec<usize> = plan
            .rows
            .iter()
            .filter_map(|row| match row {
                PlannedRow::Data { sequence, .. } => Some(*sequence),
                PlannedRow::GroupHeader(_) => None,
            })
            .collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
        assert_eq!(plan.group_header_count(), 2);
        assert_eq!(plan.table_row_count(), 9);
        assert_eq!(plan.rows[0], PlannedRow::GroupHeader("Beam".to_string()));
        assert_eq!(
            plan.rows[3],
            PlannedRow::GroupHeader("Wall".to_string())
        );
    }

    #[test]
    fn plan_skips_header_for_unnamed_group() {
        let groups = vec![
            RowGroup::new(Some("A".to_string()), vec![1]),
            RowGroup::new(None, vec![0]),
        ];

        let plan = plan_rows(&groups);

        assert_eq!(
            plan.rows,
            vec![
                PlannedRow::GroupHeader("A".to_string()),
                PlannedRow::Data {
                    sequence: 1,
                    row_index: 1
                },
                PlannedRow::Data {
                    sequence: 2,
                    row_index: 0
                },
            ]
        );
    }

    #[test]
    fn render_fills_mapped_columns_and_leaves_location_blank() {
        let rows = vec![vec![
            "Crack".to_string(),
            "Wall".to_string(),
            "12".to_string(),
            "0.3 mm".to_string(),
        ]];
        let mapping = ColumnMapping {
            defect_name: Some(0),
            photo_number: Some(2),
            controlled_parameter: Some(3),
            note: None,
        };
        let plan = plan_rows(&[RowGroup::new(Some("Wall".to_string()), vec![0])]);

        let document = render_document(&rows, &plan, &mapping, "survey.xlsx");

        assert_eq!(document.rows.len(), 4);
        assert_eq!(
            document.rows[2],
            TableRowSpec::Merged {
                text: "Wall".to_string(),
                style: TextStyle::bold(GROUP_HEADER_FONT_PT),
            }
        );
        let TableRowSpec::Cells { texts, style } = &document.rows[3] else {
            panic!("data row should have one cell per column");
        };
        assert_eq!(texts, &["1", "Crack", "", "12", "0.3 mm", ""]);
        assert!(!style.bold);
        assert_eq!(document.captions[1].text, "Source: survey.xlsx | Rows: 1");
        assert!(document.page.landscape);
    }

    #[test]
    fn render_header_rows_are_bold() {
        let document = render_document(&[], &RowPlan::default(), &ColumnMapping::default(), "x");

        assert_eq!(document.rows.len(), 2);
        for row in &document.rows {
            assert!(row.style().bold);
        }
        let TableRowSpec::Cells { texts, .. } = &document.rows[1] else {
            panic!("ordinal row should have one cell per column");
        };
        assert_eq!(texts, &["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn file_name_uses_single_row_or_span() {
        assert_eq!(output_file_name(&[4]).as_deref(), Some("Defects_selection_5.docx"));
        assert_eq!(
            output_file_name(&[1, 3, 8]).as_deref(),
            Some("Defects_selection_2-9.docx")
        );
        assert_eq!(output_file_name(&[]), None);
    }
}
