//! Boxed confirmation message drawn after a submission.

use crate::utils::colors::{BOLD, GREEN, RESET};
use unicode_width::UnicodeWidthStr;

/// Draw `title` and `body` inside a box at most `width` columns wide.
pub fn render_box(title: &str, body: &str, width: usize) -> String {
    let inner = width.saturating_sub(4).max(10);
    let mut lines: Vec<String> = vec![title.to_string(), String::new()];
    lines.extend(textwrap::wrap(body, inner).into_iter().map(|l| l.into_owned()));

    let content_w = lines
        .iter()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("╭{}╮\n", "─".repeat(content_w + 2)));
    for (i, line) in lines.iter().enumerate() {
        let pad = content_w - UnicodeWidthStr::width(line.as_str());
        if i == 0 {
            out.push_str(&format!(
                "│ {GREEN}{BOLD}{}{RESET}{} │\n",
                line,
                " ".repeat(pad)
            ));
        } else {
            out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
        }
    }
    out.push_str(&format!("╰{}╯", "─".repeat(content_w + 2)));
    out
}
