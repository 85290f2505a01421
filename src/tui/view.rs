//! Drawing the editor screen and modal dialogs

use crate::layout::{caret_cell, layout_rows, line_rows};
use crate::markers::Style as MarkerStyle;
use crate::render::{row_runs, TextRun};
use crate::shell::{Notice, NoticeLevel};
use crate::Editor;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

const MENU: &str = " File: ^N New  ^O Open  ^S Save  F12 Save As  ^Q Exit \u{2502} \
                    Edit: ^Z Undo  ^Y Redo  ^X Cut  ^C Copy  ^V Paste  ^A Select all";

/// Everything the main screen shows
pub struct Screen<'a> {
    pub editor: &'a Editor,
    pub title: &'a str,
    pub status: &'a str,
    /// First logical line in the text area
    pub top_line: usize,
}

/// Title, menu bar, toolbar, text area, status bar
pub fn screen_areas(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

pub fn render(frame: &mut Frame, screen: &Screen<'_>) {
    let [title, menu, toolbar, text, status] = screen_areas(frame.area());

    frame.render_widget(
        Paragraph::new(screen.title)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)),
        title,
    );
    frame.render_widget(
        Paragraph::new(MENU).style(Style::default().fg(Color::Black).bg(Color::Gray)),
        menu,
    );
    frame.render_widget(Paragraph::new(toolbar_line()), toolbar);
    render_text(frame, screen, text);
    frame.render_widget(
        Paragraph::new(Line::from(format!("{} ", screen.status)).right_aligned())
            .style(Style::default().add_modifier(Modifier::REVERSED)),
        status,
    );
}

fn toolbar_line() -> Line<'static> {
    let keys = [
        ("F2", MarkerStyle::Bold),
        ("F3", MarkerStyle::Italic),
        ("F4", MarkerStyle::Underline),
    ];
    let mut spans = vec![Span::raw(" ")];
    for (key, style) in keys {
        spans.push(Span::styled(
            format!("[{key} {}]", style.label()),
            Style::default().add_modifier(modifier_for(style)),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn modifier_for(style: MarkerStyle) -> Modifier {
    match style {
        MarkerStyle::Bold => Modifier::BOLD,
        MarkerStyle::Italic => Modifier::ITALIC,
        MarkerStyle::Underline => Modifier::UNDERLINED,
    }
}

fn run_span(run: TextRun) -> Span<'static> {
    let mut style = Style::default();
    for marker in &run.styles {
        style = style.add_modifier(modifier_for(*marker));
    }
    if run.selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(run.text, style)
}

fn render_text(frame: &mut Frame, screen: &Screen<'_>, area: Rect) {
    let editor = screen.editor;
    let document = editor.document();
    let selection = editor.selection();
    let rows = layout_rows(
        document,
        screen.top_line,
        area.width as usize,
        area.height as usize,
    );

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row_runs(document, &selection, row)
                .into_iter()
                .map(run_span)
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if let Some((x, y)) = caret_position(screen, area) {
        frame.set_cursor_position((x, y));
    }
}

/// Screen cell of the caret, if it is inside the text area
pub fn caret_position(screen: &Screen<'_>, area: Rect) -> Option<(u16, u16)> {
    let document = screen.editor.document();
    let caret = screen.editor.caret();
    let width = area.width as usize;
    let line = document.line_of(caret);
    if line < screen.top_line {
        return None;
    }

    let rows_above: usize = (screen.top_line..line)
        .map(|l| line_rows(document, l, width))
        .sum();
    let (row, column) = caret_cell(document, caret, width);
    let y = rows_above + row;
    if y >= area.height as usize {
        return None;
    }
    let x = column.min(width.saturating_sub(1));
    Some((area.x + x as u16, area.y + y as u16))
}

/// First line to show so the caret stays visible
pub fn scroll_to_caret(editor: &Editor, top_line: usize, area: Rect) -> usize {
    let document = editor.document();
    let caret = editor.caret();
    let width = area.width as usize;
    let height = (area.height as usize).max(1);
    let line = document.line_of(caret);

    let mut top = top_line.min(line);
    let (caret_row, _) = caret_cell(document, caret, width);
    let above: usize = (top..line).map(|l| line_rows(document, l, width)).sum();
    let mut needed = above + caret_row + 1;
    while needed > height && top < line {
        needed -= line_rows(document, top, width);
        top += 1;
    }
    top
}

/// A centred box over whatever is already drawn
fn dialog_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_notice(frame: &mut Frame, notice: &Notice) {
    let color = match notice.level {
        NoticeLevel::Info => Color::Blue,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    let area = dialog_area(frame.area(), 50, 6);
    let block = Block::bordered()
        .title(format!(" {} ", notice.title))
        .border_style(Style::default().fg(color));
    let body = vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from("[Enter] OK").centered(),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }).block(block), area);
}

/// A one-line text prompt; `label` explains what to type
pub fn render_prompt(frame: &mut Frame, title: &str, label: &str, input: &str) {
    let area = dialog_area(frame.area(), 60, 5);
    let block = Block::bordered().title(format!(" {title} "));
    let body = vec![
        Line::from(label),
        Line::from(vec![Span::raw("> "), Span::raw(input)]),
        Line::from("[Enter] OK  [Esc] Cancel").centered(),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(body).block(block), area);

    let inner = Block::bordered().inner(area);
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = inner.x.saturating_add(2).saturating_add(typed);
    if inner.height > 1 && cursor_x < inner.right() {
        frame.set_cursor_position((cursor_x, inner.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Motion;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_scroll_keeps_caret_visible() {
        let mut editor = Editor::with_text("a\nb\nc\nd\ne\nf");
        let area = Rect::new(0, 0, 10, 3);

        editor.move_cursor(Motion::DocumentEnd, false);
        assert_eq!(scroll_to_caret(&editor, 0, area), 3);

        editor.move_cursor(Motion::DocumentStart, false);
        assert_eq!(scroll_to_caret(&editor, 3, area), 0);
    }

    #[test]
    fn test_caret_position() {
        let editor = Editor::with_text("hello\nworld");
        let screen = Screen {
            editor: &editor,
            title: "",
            status: "",
            top_line: 0,
        };
        let area = Rect::new(0, 3, 10, 5);
        assert_eq!(caret_position(&screen, area), Some((0, 3)));

        let hidden = Screen {
            top_line: 1,
            ..screen
        };
        assert_eq!(caret_position(&hidden, area), None);
    }

    #[test]
    fn test_prompt_with_long_input() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let input = "x".repeat(70_000);
        terminal
            .draw(|frame| render_prompt(frame, "Open", "File to open:", &input))
            .unwrap();

        let mut short = Terminal::new(TestBackend::new(60, 12)).unwrap();
        short
            .draw(|frame| render_prompt(frame, "Open", "File to open:", "ab"))
            .unwrap();
        assert_eq!(short.get_cursor_position().unwrap(), (5, 5).into());
    }

    #[test]
    fn test_notice_is_drawn() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let notice = Notice::warning("Warning", "Please select text first to apply formatting.");
        terminal
            .draw(|frame| render_notice(frame, &notice))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains(" Warning "));
        assert!(text.contains("Please select text first to apply formatting."));
        assert!(text.contains("[Enter] OK"));
    }
}
