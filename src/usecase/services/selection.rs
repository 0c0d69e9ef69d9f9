use std::collections::BTreeSet;

use crate::domain::entities::group::group_key;
use crate::domain::entities::sheet::SheetRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedToken {
    InvalidNumber(String),
    InvalidRange(String),
    OutOfRange { token: String, total: usize },
}

impl std::fmt::Display for RejectedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectedToken::InvalidNumber(token) => write!(f, "invalid number: {token}"),
            RejectedToken::InvalidRange(token) => write!(f, "invalid range: {token}"),
            RejectedToken::OutOfRange { token, total } => {
                write!(f, "{token} is out of range (1-{total})")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// 0-based, ascending, deduplicated.
    pub indices: Vec<usize>,
    pub rejected: Vec<RejectedToken>,
}

fn parse_number(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Parses `all`, `N`, `A-B` and comma lists of those into 0-based indices
/// below `total`.
///
/// Numbers are 1-based. Out-of-range numbers and malformed tokens are
/// rejected individually. Ranges are clamped to `[0, total)` and never
/// rejected for their bounds, so `5-2` selects nothing.
pub fn parse_selection_detailed(expr: &str, total: usize) -> Selection {
    let expr = expr.trim().to_lowercase();
    if expr == "all" {
        return Selection {
            indices: (0..total).collect(),
            rejected: Vec::new(),
        };
    }

    let total_i = total as i64;
    let mut picked = BTreeSet::new();
    let mut rejected = Vec::new();

    for part in expr.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            match (parse_number(start), parse_number(end)) {
                (Some(start), Some(end)) => {
                    let start = (start - 1).max(0);
                    let end = end.min(total_i);
                    picked.extend((start..end).map(|idx| idx as usize));
                }
                _ => rejected.push(RejectedToken::InvalidRange(part.to_string())),
            }
        } else {
            match parse_number(part) {
                Some(number) if (1..=total_i).contains(&number) => {
                    picked.insert((number - 1) as usize);
                }
                Some(_) => rejected.push(RejectedToken::OutOfRange {
                    token: part.to_string(),
                    total,
                }),
                None => rejected.push(RejectedToken::InvalidNumber(part.to_string())),
            }
        }
    }

    Selection {
        indices: picked.into_iter().collect(),
        rejected,
    }
}

/// Like [`parse_selection_detailed`], logging each dropped token.
pub fn parse_selection(expr: &str, total: usize) -> Vec<usize> {
    let selection = parse_selection_detailed(expr, total);
    for token in &selection.rejected {
        log::warn!("selection token dropped: {token}");
    }
    selection.indices
}

/// Keeps the indices whose group cell is one of `selected_groups`.
///
/// Without a group column or a group filter, `indices` pass unchanged.
pub fn filter_by_groups(
    rows: &[SheetRow],
    indices: &[usize],
    group_column: Option<usize>,
    selected_groups: Option<&[String]>,
) -> Vec<usize> {
    let (Some(column), Some(selected)) = (group_column, selected_groups) else {
        return indices.to_vec();
    };

    indices
        .iter()
        .copied()
        .filter(|&idx| {
            rows.get(idx)
                .and_then(|row| group_key(row, column))
                .is_some_and(|key| selected.iter().any(|group| group == key))
        })
        .collect()
}

pub fn available_groups(rows: &[SheetRow], group_column: Option<usize>) -> Vec<String> {
    let Some(column) = group_column else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| group_key(row, column))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Groups picked by a selection expression over the 1-based group menu.
pub fn select_groups(groups: &[String], expr: &str) -> Vec<String> {
    parse_selection(expr, groups.len())
        .into_iter()
        .map(|idx| groups[idx].clone())
        .collect()
}

pub fn resolve_view_positions(view: &[usize], positions: &[usize]) -> Vec<usize> {
    positions
        .iter()
        .filter_map(|&pos| view.get(pos).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(groups: &[&str]) -> Vec<SheetRow> {
        groups
            .iter()
            .map(|group| vec![format!("defect {group}"), group.to_string()])
            .collect()
    }

    #[test]
    fn parse_all_selects_everything() {
        assert_eq!(parse_selection("all", 10), (0..10).collect::<Vec<_>>());
        assert_eq!(parse_selection("  ALL ", 3), vec![0, 1, 2]);
    }

    #[test]
    fn parse_comma_list() {
        assert_eq!(parse_selection("1,3,7", 10), vec![0, 2, 6]);
    }

    #[test]
    fn parse_range_is_inclusive_one_based() {
        assert_eq!(parse_selection("2-5", 10), vec![1, 2, 3, 4]);
    }

    #[test]
    fn parse_range_clamps_to_bounds() {
        assert_eq!(parse_selection("0-2", 10), vec![0, 1]);
        assert_eq!(parse_selection("8-20", 10), vec![7, 8, 9]);
    }

    #[test]
    fn parse_reversed_range_selects_nothing() {
        let selection = parse_selection_detailed("5-2", 10);

        assert!(selection.indices.is_empty());
        assert!(selection.rejected.is_empty(), "clamping is permissive");
    }

    #[test]
    fn parse_drops_malformed_tokens() {
        let selection = parse_selection_detailed("x,2", 10);

        assert_eq!(selection.indices, vec![1]);
        assert_eq!(
            selection.rejected,
            vec![RejectedToken::InvalidNumber("x".to_string())]
        );
    }

    #[test]
    fn parse_reports_out_of_range_and_bad_ranges() {
        let selection = parse_selection_detailed("11, 0, a-3, 4", 10);

        assert_eq!(selection.indices, vec![3]);
        assert_eq!(
            selection.rejected,
            vec![
                RejectedToken::OutOfRange {
                    token: "11".to_string(),
                    total: 10
                },
                RejectedToken::OutOfRange {
                    token: "0".to_string(),
                    total: 10
                },
                RejectedToken::InvalidRange("a-3".to_string()),
            ]
        );
    }

    #[test]
    fn parse_deduplicates_and_sorts() {
        assert_eq!(parse_selection("5,1-3,2", 10), vec![0, 1, 2, 4]);
    }

    #[test]
    fn filter_without_column_or_groups_passes_through() {
        let data = rows(&["Wall", "Beam"]);
        let groups = vec!["Wall".to_string()];

        assert_eq!(filter_by_groups(&data, &[1, 0], None, Some(groups.as_slice())), vec![1, 0]);
        assert_eq!(filter_by_groups(&data, &[1, 0], Some(1), None), vec![1, 0]);
    }

    #[test]
    fn filter_keeps_selected_groups_in_order() {
        let data = rows(&["Wall", "Beam", " Wall ", "", "Slab"]);
        let groups = vec!["Wall".to_string(), "Slab".to_string()];

        let kept = filter_by_groups(&data, &[0, 1, 2, 3, 4], Some(1), Some(groups.as_slice()));

        assert_eq!(kept, vec![0, 2, 4]);
    }

    #[test]
    fn available_groups_are_sorted_and_distinct() {
        let data = rows(&["Wall", "Beam", "Wall", "  ", "Column"]);

        assert_eq!(
            available_groups(&data, Some(1)),
            vec!["Beam".to_string(), "Column".to_string(), "Wall".to_string()]
        );
        assert!(available_groups(&data, None).is_empty());
    }

    #[test]
    fn select_groups_uses_menu_numbers() {
        let groups = vec!["Beam".to_string(), "Column".to_string(), "Wall".to_string()];

        assert_eq!(
            select_groups(&groups, "1,3"),
            vec!["Beam".to_string(), "Wall".to_string()]
        );
        assert_eq!(select_groups(&groups, "all"), groups);
    }

    #[test]
    fn view_positions_map_back_to_original_rows() {
        let view = vec![2, 5, 9];

        assert_eq!(resolve_view_positions(&view, &[0, 2]), vec![2, 9]);
        assert_eq!(resolve_view_positions(&view, &[4]), Vec::<usize>::new());
    }
}
