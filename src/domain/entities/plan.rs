/// One table row below the two fixed header rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedRow {
    /// Full-width merged row naming a group.
    GroupHeader(String),
    /// A data row: running 1-based sequence number and original row index.
    Data { sequence: usize, row_index: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPlan {
    pub rows: Vec<PlannedRow>,
}

impl RowPlan {
    pub fn group_header_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, PlannedRow::GroupHeader(_)))
            .count()
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len() - self.group_header_count()
    }

    pub fn table_row_count(&self) -> usize {
        2 + self.rows.len()
    }
}
