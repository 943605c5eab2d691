//! 终端显示工具函数

use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::posts::model::Post;
use crate::core::viewer::pagination::{ControlKind, PageControl};
use crate::core::viewer::render::ViewMode;

/// 按单词折行，超长单词按显示宽度截断
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let mut word = word.to_string();

        while word.width() > width {
            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            let (head, rest) = split_at_width(&word, width);
            lines.push(head);
            word = rest;
        }

        let word_width = word.width();
        let needed = if line_width == 0 {
            word_width
        } else {
            line_width + 1 + word_width
        };
        if needed > width && line_width > 0 {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(&word);
        line_width += word_width;
    }

    if line_width > 0 {
        lines.push(line);
    }
    lines
}

/// 按显示宽度切分，单个字符超宽时仍至少取一个字符
fn split_at_width(text: &str, width: usize) -> (String, String) {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            let end = if idx == 0 { ch.len_utf8() } else { idx };
            return (text[..end].to_string(), text[end..].to_string());
        }
        used += ch_width;
    }
    (text.to_string(), String::new())
}

type Style = fn(ColoredString) -> ColoredString;

fn paint(text: String, style: Style, use_color: bool) -> String {
    if use_color {
        style(text.normal()).to_string()
    } else {
        text
    }
}

/// 格式化单条帖子为终端行
pub fn format_post(
    post: &Post,
    view_mode: ViewMode,
    width: usize,
    use_color: bool,
) -> Vec<String> {
    let meta = format!("#{} · user {}", post.id, post.user_id);

    match view_mode {
        ViewMode::List => {
            let mut lines = vec![format!(
                "{}  {}",
                paint(meta, |s| s.bright_black(), use_color),
                paint(post.title.clone(), |s| s.bright_white().bold(), use_color)
            )];
            lines.extend(
                wrap_text(&post.body, width.saturating_sub(2))
                    .into_iter()
                    .map(|l| format!("  {l}")),
            );
            lines
        }
        ViewMode::Card => {
            let inner = width.saturating_sub(4).max(1);
            let border = "─".repeat(inner + 2);
            let row = |text: &str, styled: String| {
                // 使用 unicode-width 计算显示宽度
                let pad = inner.saturating_sub(text.width());
                format!("│ {styled}{} │", " ".repeat(pad))
            };

            let mut lines = vec![format!("┌{border}┐")];
            lines.push(row(&meta, paint(meta.clone(), |s| s.bright_black(), use_color)));
            for title in wrap_text(&post.title, inner) {
                lines.push(row(
                    &title,
                    paint(title.clone(), |s| s.bright_white().bold(), use_color),
                ));
            }
            for body in wrap_text(&post.body, inner) {
                lines.push(row(&body, body.clone()));
            }
            lines.push(format!("└{border}┘"));
            lines
        }
    }
}

/// 格式化分页栏
pub fn format_pagination_bar(
    controls: &[PageControl],
    use_color: bool,
) -> String {
    controls
        .iter()
        .map(|c| {
            let text = format!("[{}]", c.label);
            match (use_color, c.active, c.kind) {
                (true, true, _) => text.black().on_bright_white().bold().to_string(),
                (true, false, ControlKind::Page) => text.bright_white().to_string(),
                (true, false, _) => text.bright_cyan().to_string(),
                (false, true, _) => format!("*{text}*"),
                (false, false, _) => text,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
