use std::sync::OnceLock;

use regex::Regex;

fn summary_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)\*+\s*summary\s*\*+").expect("valid summary regex"))
}

fn heading() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"^\*+.*\*+$").expect("valid heading regex"))
}

pub fn has_summary_marker(line: &str) -> bool {
    summary_marker().is_match(line)
}

/// Extracts release notes from a pull request body.
///
/// Returns the lines between the first `**Summary**`-style marker and the
/// next bold heading. Bodies without a marker are returned untouched.
pub fn extract_release_notes(body: &str) -> String {
    if !body.split('\n').any(has_summary_marker) {
        return body.to_string();
    }

    let mut notes = Vec::new();
    let mut in_summary = false;
    for line in body.split('\n').map(str::trim_end) {
        if has_summary_marker(line) {
            in_summary = true;
            continue;
        }
        if !in_summary {
            continue;
        }
        if heading().is_match(line) {
            break;
        }
        notes.push(line);
    }

    notes.join("\n")
}
