use std::collections::BTreeMap;

use crate::domain::entities::group::{group_key, RowGroup};
use crate::domain::entities::sheet::SheetRow;

/// Partitions `indices` by group value.
///
/// Named groups come first in ascending key order, each with ascending
/// indices; rows with a blank or missing group cell form a trailing unnamed
/// group. Without a group column every index lands in one unnamed group in
/// the order given.
pub fn group_rows(
    rows: &[SheetRow],
    indices: &[usize],
    group_column: Option<usize>,
) -> Vec<RowGroup> {
    let Some(column) = group_column else {
        return vec![RowGroup::new(None, indices.to_vec())];
    };

    let mut named: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut ungrouped = Vec::new();
    for &idx in indices {
        match rows.get(idx).and_then(|row| group_key(row, column)) {
            Some(key) => named.entry(key.to_string()).or_default().push(idx),
            None => ungrouped.push(idx),
        }
    }

    let mut groups: Vec<RowGroup> = named
        .into_iter()
        .map(|(key, mut members)| {
            members.sort_unstable();
            RowGroup::new(Some(key), members)
        })
        .collect();
    if !ungrouped.is_empty() {
        ungrouped.sort_unstable();
        groups.push(RowGroup::new(None, ungrouped));
    }
    groups
}
