//! Markdown character escaping.
//!
//! The pair is deliberately asymmetric: a backtick is escaped on the way out but
//! `\`` is left alone on the way in, so code spans are never unescaped by accident.

const ESCAPED: &str = "\\`*_{}[]()#+-.!|";
const UNESCAPED: &str = "\\*_{}[]()#+-.!|";

pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED.contains(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Removes backslash escapes. Unknown escapes and a trailing backslash are kept.
pub fn unescape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if UNESCAPED.contains(next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}
