use std::path::{Path, PathBuf};

use crate::config::{PREVIEW_CELL_CHARS, PREVIEW_MAX_COLUMNS, PREVIEW_MAX_ROWS};
use crate::domain::entities::sheet::SheetRow;
use crate::error::WizardAbort;
use crate::ui::console::prompt::{Prompter, RULE};
use crate::usecase::services::selection::{parse_selection_detailed, resolve_view_positions};

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Picks a workbook from `files`. `None` when there is nothing to pick.
pub fn choose_workbook(
    prompter: &mut dyn Prompter,
    files: &[PathBuf],
    data_dir: &Path,
) -> Result<Option<PathBuf>, WizardAbort> {
    if files.is_empty() {
        prompter.say(RULE);
        prompter.say("No Excel files found");
        prompter.say(RULE);
        prompter.say(&format!("Folder for Excel files: {}", data_dir.display()));
        prompter.say("Put an .xlsx or .xls file into that folder and run again.");
        prompter.say("Recommended columns:");
        prompter.say("  - Name of defect/damage");
        prompter.say("  - Name of structures");
        prompter.say("  - Photo number from photo materials");
        prompter.say("  - Controlled defect parameter");
        prompter.say("  - Note");
        prompter.say(RULE);
        return Ok(None);
    }

    prompter.say(RULE);
    prompter.say("AVAILABLE EXCEL FILES:");
    prompter.say(RULE);
    for (idx, path) in files.iter().enumerate() {
        prompter.say(&format!("{}. {}", idx + 1, file_label(path)));
    }

    loop {
        let answer = prompter.ask(&format!("Choose a file number (1-{}): ", files.len()))?;
        match answer.parse::<usize>() {
            Ok(number) if (1..=files.len()).contains(&number) => {
                let chosen = files[number - 1].clone();
                prompter.say(&format!("Selected file: {}", file_label(&chosen)));
                return Ok(Some(chosen));
            }
            Ok(_) => prompter.say(&format!(
                "Invalid number. Enter a number from 1 to {}",
                files.len()
            )),
            Err(_) => prompter.say("Enter a valid number"),
        }
    }
}

pub fn choose_sheet(
    prompter: &mut dyn Prompter,
    names: &[String],
    default: &str,
) -> Result<String, WizardAbort> {
    if names.len() <= 1 {
        return Ok(default.to_string());
    }

    prompter.say(&format!("The file has {} sheets:", names.len()));
    for (idx, name) in names.iter().enumerate() {
        let marker = if name == default { " <- selected" } else { "" };
        prompter.say(&format!("  {}. {name}{marker}", idx + 1));
    }

    let answer = prompter.ask(&format!(
        "Use sheet '{default}'? (Enter = yes, or type another sheet number): "
    ))?;
    if answer.is_empty() {
        return Ok(default.to_string());
    }
    match answer.parse::<usize>() {
        Ok(number) if (1..=names.len()).contains(&number) => Ok(names[number - 1].clone()),
        _ => {
            prompter.say(&format!("Invalid choice. Using sheet '{default}'"));
            Ok(default.to_string())
        }
    }
}

fn report_rejected(prompter: &mut dyn Prompter, expr: &str, total: usize) -> Vec<usize> {
    let selection = parse_selection_detailed(expr, total);
    for token in &selection.rejected {
        prompter.say(&format!("Skipped {token}"));
    }
    selection.indices
}

/// Picks the groups to include. `None` means no group filtering.
pub fn choose_groups(
    prompter: &mut dyn Prompter,
    groups: &[String],
    has_group_column: bool,
) -> Result<Option<Vec<String>>, WizardAbort> {
    if !has_group_column {
        prompter.say(RULE);
        prompter.say("The sheet has no 'Name of structures' column.");
        prompter.say("All rows will be processed without filtering by structure.");
        prompter.say(RULE);
        return Ok(None);
    }
    if groups.is_empty() {
        prompter.say(RULE);
        prompter.say("No structures found in the data. All rows will be processed.");
        prompter.say(RULE);
        return Ok(None);
    }

    prompter.say(RULE);
    prompter.say("CHOOSE STRUCTURES TO DESCRIBE DEFECTS FOR");
    prompter.say(RULE);
    for (idx, group) in groups.iter().enumerate() {
        prompter.say(&format!("  {}. {group}", idx + 1));
    }
    prompter.say(RULE);
    prompter.say("  One structure: a number (e.g. 1)");
    prompter.say("  Several: numbers separated by commas (e.g. 1,3,5)");
    prompter.say("  Range: e.g. 1-3");
    prompter.say("  Everything: all");
    prompter.say(RULE);

    loop {
        let answer = prompter.ask(&format!("Structures to process (1-{}): ", groups.len()))?;
        if answer.is_empty() {
            prompter.say("Please enter a selection");
            continue;
        }

        let picked = report_rejected(prompter, &answer, groups.len());
        if picked.is_empty() {
            prompter.say(&format!(
                "No structure selected. Enter a number from 1 to {} or 'all'.",
                groups.len()
            ));
            continue;
        }

        let chosen: Vec<String> = picked.into_iter().map(|idx| groups[idx].clone()).collect();
        prompter.say(&format!("Selected {} structure(s):", chosen.len()));
        for group in &chosen {
            prompter.say(&format!("  - {group}"));
        }
        return Ok(Some(chosen));
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

pub fn format_preview(rows: &[SheetRow], view: &[usize]) -> Vec<String> {
    let mut lines: Vec<String> = view
        .iter()
        .take(PREVIEW_MAX_ROWS)
        .enumerate()
        .map(|(pos, &idx)| {
            let cells: Vec<String> = rows
                .get(idx)
                .map(|row| {
                    row.iter()
                        .take(PREVIEW_MAX_COLUMNS)
                        .map(|cell| truncate_chars(cell, PREVIEW_CELL_CHARS))
                        .collect()
                })
                .unwrap_or_default();
            format!("{:>3}. {}", pos + 1, cells.join(" | "))
        })
        .collect();
    if view.len() > PREVIEW_MAX_ROWS {
        lines.push(format!("... and {} more rows", view.len() - PREVIEW_MAX_ROWS));
    }
    lines
}

/// Picks rows among `view` (1-based positions in the view) and returns their
/// original indices.
pub fn choose_rows(
    prompter: &mut dyn Prompter,
    rows: &[SheetRow],
    view: &[usize],
) -> Result<Vec<usize>, WizardAbort> {
    if view.is_empty() {
        return Ok(Vec::new());
    }

    prompter.say(RULE);
    prompter.say("DATA PREVIEW (first columns):");
    prompter.say(RULE);
    for line in format_preview(rows, view) {
        prompter.say(&line);
    }
    prompter.say(RULE);
    prompter.say("Examples: 1 | 2-5 | 1,3,7 | all");
    prompter.say(RULE);

    loop {
        let answer = prompter.ask(&format!("Row numbers (1-{}): ", view.len()))?;
        if answer.is_empty() {
            prompter.say("Please enter a selection");
            continue;
        }

        let positions = report_rejected(prompter, &answer, view.len());
        if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
            prompter.say(&format!(
                "Selected {} row(s): {}-{}",
                positions.len(),
                first + 1,
                last + 1
            ));
            return Ok(resolve_view_positions(view, &positions));
        }
        prompter.say("No row selected. Try again.");
    }
}
