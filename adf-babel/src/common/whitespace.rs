//! Indentation measurement and output whitespace normalisation.
//!
//! Indentation is counted in levels of two columns; a tab counts as two columns.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn columns(ch: char) -> Option<usize> {
    match ch {
        ' ' => Some(1),
        '\t' => Some(2),
        _ => None,
    }
}

/// Number of indentation levels at the start of `line`.
pub fn indent_level(line: &str) -> usize {
    line.chars().map_while(columns).sum::<usize>() / 2
}

/// Removes up to `levels` indentation levels from the start of `line`.
pub fn trim_indent(line: &str, levels: usize) -> &str {
    let target = levels * 2;
    let mut removed = 0;
    for (idx, ch) in line.char_indices() {
        if removed >= target {
            return &line[idx..];
        }
        match columns(ch) {
            Some(width) => removed += width,
            None => return &line[idx..],
        }
    }
    ""
}

/// Collapses blank runs to one blank line, strips trailing spaces and tabs on
/// every line and trims the whole text.
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = BLANK_RUN_RE.replace_all(text, "\n\n");
    let lines: Vec<&str> = collapsed
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect();
    lines.join("\n").trim().to_string()
}

pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
