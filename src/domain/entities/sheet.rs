pub type SheetRow = Vec<String>;

/// Output-table columns that can be filled from a spreadsheet column.
///
/// The sequence-number column is generated and the location column is left
/// blank for manual fill-in, so neither appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    DefectName,
    PhotoNumber,
    ControlledParameter,
    Note,
}

impl LogicalField {
    pub const ALL: [LogicalField; 4] = [
        LogicalField::DefectName,
        LogicalField::PhotoNumber,
        LogicalField::ControlledParameter,
        LogicalField::Note,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LogicalField::DefectName => "name of defect/damage",
            LogicalField::PhotoNumber => "photo number",
            LogicalField::ControlledParameter => "controlled defect parameter",
            LogicalField::Note => "note",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub defect_name: Option<usize>,
    pub photo_number: Option<usize>,
    pub controlled_parameter: Option<usize>,
    pub note: Option<usize>,
}

impl ColumnMapping {
    pub fn get(&self, field: LogicalField) -> Option<usize> {
        match field {
            LogicalField::DefectName => self.defect_name,
            LogicalField::PhotoNumber => self.photo_number,
            LogicalField::ControlledParameter => self.controlled_parameter,
            LogicalField::Note => self.note,
        }
    }

    pub fn set(&mut self, field: LogicalField, column: Option<usize>) {
        let slot = match field {
            LogicalField::DefectName => &mut self.defect_name,
            LogicalField::PhotoNumber => &mut self.photo_number,
            LogicalField::ControlledParameter => &mut self.controlled_parameter,
            LogicalField::Note => &mut self.note,
        };
        *slot = column;
    }

    /// Text of `field` in `row`, empty when the field is unmapped or the row
    /// is shorter than the mapped column.
    pub fn value<'a>(&self, row: &'a [String], field: LogicalField) -> &'a str {
        self.get(field)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSheet {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
    pub mapping: ColumnMapping,
    pub group_column: Option<usize>,
}
