//! Minimal Markdown → styled terminal lines for the analysis pane.
//!
//! Supports `#`/`##`/`###` headers, `**bold**`, `-`/`*` bullets, inline
//! `` `code` `` and fenced code blocks. Everything else is shown verbatim.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const H1_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);
const H2_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const H3_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const BOLD_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const CODE_STYLE: Style = Style::new().fg(Color::Cyan);
const CODE_BLOCK_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Rgb(30, 30, 40));

pub fn render(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code_block = false;

    for raw in text.lines() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            lines.push(Line::from(Span::styled(format!("  {raw}"), CODE_BLOCK_STYLE)));
            continue;
        }

        if let Some(rest) = raw.strip_prefix("### ") {
            lines.push(Line::from(styled_inline(rest, H3_STYLE)));
        } else if let Some(rest) = raw.strip_prefix("## ") {
            lines.push(Line::from(styled_inline(rest, H2_STYLE)));
        } else if let Some(rest) = raw.strip_prefix("# ") {
            lines.push(Line::from(styled_inline(rest, H1_STYLE)));
        } else if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let indent = " ".repeat(raw.len() - trimmed.len());
            let mut spans = vec![Span::raw(format!("{indent}  \u{2022} "))];
            spans.extend(styled_inline(rest, Style::default()));
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(styled_inline(raw, Style::default())));
        }
    }
    lines
}

/// Split a line into spans, applying `**bold**` and `` `code` `` on top of `base`.
fn styled_inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                flush(&mut spans, &mut plain, base);
                spans.push(Span::styled(after[..end].to_string(), base.patch(BOLD_STYLE)));
                rest = &after[end + 2..];
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                flush(&mut spans, &mut plain, base);
                spans.push(Span::styled(after[..end].to_string(), base.patch(CODE_STYLE)));
                rest = &after[end + 1..];
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }
    flush(&mut spans, &mut plain, base);
    spans
}

fn flush(spans: &mut Vec<Span<'static>>, plain: &mut String, base: Style) {
    if !plain.is_empty() {
        spans.push(Span::styled(std::mem::take(plain), base));
    }
}
