#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    pub key: Option<String>,
    pub indices: Vec<usize>,
}

impl RowGroup {
    pub fn new(key: Option<String>, indices: Vec<usize>) -> Self {
        Self { key, indices }
    }
}

/// Group key of `row`: the trimmed cell text, or `None` when blank or absent.
pub fn group_key(row: &[String], group_column: usize) -> Option<&str> {
    row.get(group_column)
        .map(|cell| cell.trim())
        .filter(|value| !value.is_empty())
}
