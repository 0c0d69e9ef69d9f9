/// Trims, collapses whitespace runs to one space and lowercases.
pub fn normalize_header(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn compact(normalized: &str) -> String {
    normalized.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Index of the first header matching one of `candidates`.
///
/// Candidates are tried in priority order. For each candidate an exact match
/// on normalized text is looked for first, then a whitespace-insensitive
/// substring match in either direction. The lowest matching header index
/// wins. Blank headers never take part in substring matching.
pub fn find_column<S: AsRef<str>>(headers: &[S], candidates: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|header| normalize_header(header.as_ref()))
        .collect();
    let compacted: Vec<String> = normalized.iter().map(|header| compact(header)).collect();

    for candidate in candidates {
        let wanted = normalize_header(candidate);
        if let Some(idx) = normalized.iter().position(|header| *header == wanted) {
            return Some(idx);
        }

        let wanted = compact(&wanted);
        let hit = compacted.iter().position(|header| {
            !header.is_empty() && (header.contains(wanted.as_str()) || wanted.contains(header.as_str()))
        });
        if hit.is_some() {
            return hit;
        }
    }

    None
}
