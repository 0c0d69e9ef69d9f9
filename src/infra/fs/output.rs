use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::config::WORKBOOK_EXTENSIONS;

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted))
        })
}

/// `.xlsx` / `.xls` files directly inside `data_dir`, sorted by path.
/// A missing directory is created and yields an empty list.
pub fn list_workbooks(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data dir: {}", data_dir.display()))?;
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let entries = std::fs::read_dir(data_dir)
        .with_context(|| format!("failed to read data dir: {}", data_dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read entry in {}", data_dir.display()))?
            .path();
        if path.is_file() && is_workbook(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Inserts `_YYYYMMDD_HHMMSS` before the extension.
pub fn timestamped_file_name(file_name: &str, now: NaiveDateTime) -> String {
    let stamp = now.format("%Y%m%d_%H%M%S");
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{stamp}.{ext}"),
        None => format!("{file_name}_{stamp}"),
    }
}

/// Where to save `file_name` inside `output_dir`.
///
/// An existing file is deleted first; when it cannot be deleted (typically
/// because another program holds it open) a timestamped name is used
/// instead.
pub fn resolve_output_path(output_dir: &Path, file_name: &str, now: NaiveDateTime) -> PathBuf {
    let path = output_dir.join(file_name);
    if !path.exists() {
        return path;
    }

    match std::fs::remove_file(&path) {
        Ok(()) => path,
        Err(err) => {
            let fallback = output_dir.join(timestamped_file_name(file_name, now));
            log::warn!(
                "{} cannot be replaced ({err}), saving as {} instead",
                path.display(),
                fallback.display()
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::NaiveDate;

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("defect-table-{prefix}-{nanos}"))
    }

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 7))
            .expect("valid timestamp")
    }

    #[test]
    fn timestamp_goes_before_extension() {
        assert_eq!(
            timestamped_file_name("Defects_selection_1-3.docx", fixed_now()),
            "Defects_selection_1-3_20240309_140507.docx"
        );
        assert_eq!(
            timestamped_file_name("report", fixed_now()),
            "report_20240309_140507"
        );
    }

    #[test]
    fn free_path_is_used_unchanged() {
        let temp_dir = unique_test_dir("free-path");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");

        let path = resolve_output_path(&temp_dir, "out.docx", fixed_now());

        assert_eq!(path, temp_dir.join("out.docx"));
        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn existing_file_is_replaced() {
        let temp_dir = unique_test_dir("replace");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        fs::write(temp_dir.join("out.docx"), b"old").expect("should write old file");

        let path = resolve_output_path(&temp_dir, "out.docx", fixed_now());

        assert_eq!(path, temp_dir.join("out.docx"));
        assert!(!path.exists(), "old file should have been deleted");
        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn undeletable_target_falls_back_to_timestamped_name() {
        let temp_dir = unique_test_dir("locked");
        // A directory cannot be removed with remove_file, standing in for a
        // file locked by another program.
        fs::create_dir_all(temp_dir.join("out.docx")).expect("should create blocking dir");

        let path = resolve_output_path(&temp_dir, "out.docx", fixed_now());

        assert_eq!(path, temp_dir.join("out_20240309_140507.docx"));
        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn lists_only_workbooks_sorted() {
        let temp_dir = unique_test_dir("list");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        for name in ["b.xlsx", "a.XLS", "notes.txt", "c.docx"] {
            fs::write(temp_dir.join(name), b"").expect("should write fixture");
        }
        fs::create_dir_all(temp_dir.join("nested.xlsx")).expect("should create dir");

        let files = list_workbooks(&temp_dir).expect("listing should succeed");

        assert_eq!(files, vec![temp_dir.join("a.XLS"), temp_dir.join("b.xlsx")]);
        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn missing_data_dir_is_created() {
        let temp_dir = unique_test_dir("missing").join("data");

        let files = list_workbooks(&temp_dir).expect("listing should succeed");

        assert!(files.is_empty());
        assert!(temp_dir.is_dir());
        fs::remove_dir_all(temp_dir.parent().expect("has parent")).expect("should cleanup");
    }
}
