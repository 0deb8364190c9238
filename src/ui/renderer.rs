//! 画面描画
//!
//! メニューバー・テキストエリア・ステータスバーを描画する。
//! メニューが開いていればドロップダウンを重ねる。

use crate::editor::EditorState;
use crate::ui::menu::MenuBar;
use crate::ui::status::StatusInfo;
use crate::ui::viewport::{char_width, ViewportManager, TAB_WIDTH};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// 一フレーム分の描画対象
pub struct RenderView<'a> {
    pub state: &'a EditorState,
    pub menu: &'a MenuBar,
    /// メニューバー右側に一時表示するメッセージ
    pub message: Option<&'a str>,
}

/// 画面の三分割（メニューバー・テキストエリア・ステータスバー）
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// 画面描画
#[derive(Debug, Default)]
pub struct Renderer {
    viewport: ViewportManager,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &ViewportManager {
        &self.viewport
    }

    /// ドキュメントを切り替えたときに表示位置を戻す
    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, view: &RenderView<'_>) {
        let [menu_area, text_area, status_area] = screen_layout(frame.area());

        self.render_menu_bar(frame, menu_area, view);
        let cursor = self.render_text_area(frame, text_area, view.state);
        render_status_bar(frame, status_area, view.state);

        if view.menu.is_open() {
            render_dropdown(frame, menu_area, view.menu);
        } else if let Some((x, y)) = cursor {
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let bar_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        let open_menu = view.menu.selection().map(|(menu, _)| menu);

        let mut spans: Vec<Span> = view
            .menu
            .menus()
            .iter()
            .enumerate()
            .map(|(index, menu)| {
                let style = if Some(index) == open_menu {
                    bar_style.add_modifier(Modifier::REVERSED)
                } else {
                    bar_style
                };
                Span::styled(menu_title(menu.title, menu.access_key), style)
            })
            .collect();

        if let Some(message) = view.message {
            spans.push(Span::styled(
                format!("  {}", message),
                bar_style.fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
    }

    /// テキストエリアを描画し、キャレットの画面座標を返す
    fn render_text_area(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        state: &EditorState,
    ) -> Option<(u16, u16)> {
        let document = &state.document;
        let text = document.text();
        let caret = document.cursor_position();

        let caret_line_text = text.split('\n').nth(caret.line).unwrap_or("");
        let caret_column: usize = caret_line_text
            .chars()
            .take(caret.column)
            .map(char_width)
            .sum();

        self.viewport
            .set_dimensions(area.height as usize, area.width as usize);
        self.viewport.ensure_visible(caret.line, caret_column);

        let top = self.viewport.top_line();
        let left = self.viewport.left_column();
        let height = self.viewport.height();
        let width = self.viewport.width();

        let mut base = Style::default();
        if state.font.bold {
            base = base.add_modifier(Modifier::BOLD);
        }
        if state.font.italic {
            base = base.add_modifier(Modifier::ITALIC);
        }
        let selection = document.selection();

        let mut lines = Vec::with_capacity(height);
        let mut line_start = 0;
        for (index, line) in text.split('\n').enumerate() {
            if index >= top + height {
                break;
            }
            if index >= top {
                lines.push(visible_line(line, line_start, selection, left, width, base));
            }
            line_start += line.chars().count() + 1;
        }

        frame.render_widget(Paragraph::new(lines).style(base), area);

        let x = caret_column.checked_sub(left)?;
        let y = caret.line.checked_sub(top)?;
        if x < width && y < height {
            Some((area.x + x as u16, area.y + y as u16))
        } else {
            None
        }
    }
}

fn menu_title(title: &str, access_key: char) -> String {
    format!(" {}({}) ", title, access_key.to_ascii_uppercase())
}

/// 一行のうち画面に入る部分を、選択範囲を反転して組み立てる
fn visible_line(
    line: &str,
    line_start: usize,
    selection: Option<(usize, usize)>,
    left: usize,
    width: usize,
    base: Style,
) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_selected = false;
    let mut column = 0;

    for (offset, ch) in line.chars().enumerate() {
        let ch_width = char_width(ch);
        if column < left {
            column += ch_width;
            continue;
        }
        if column + ch_width > left + width {
            break;
        }
        column += ch_width;

        let position = line_start + offset;
        let selected = selection
            .map(|(start, end)| position >= start && position < end)
            .unwrap_or(false);
        if selected != current_selected && !current.is_empty() {
            spans.push(styled_segment(std::mem::take(&mut current), current_selected, base));
        }
        current_selected = selected;

        match ch {
            '\t' => current.push_str(&" ".repeat(TAB_WIDTH)),
            '\r' => {}
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        spans.push(styled_segment(current, current_selected, base));
    }
    Line::from(spans)
}

fn styled_segment(text: String, selected: bool, base: Style) -> Span<'static> {
    if selected {
        Span::styled(text, base.add_modifier(Modifier::REVERSED))
    } else {
        Span::styled(text, base)
    }
}

fn render_status_bar(frame: &mut Frame<'_>, area: Rect, state: &EditorState) {
    let info = StatusInfo::from_state(state);
    let status_text = format!(
        " {} │ {} │ {} │ {}",
        info.char_count,
        info.file_display(),
        info.caret,
        info.font
    );

    let style = if state.is_at_limit() {
        Style::default().bg(Color::Red).fg(Color::White)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    frame.render_widget(Paragraph::new(status_text).style(style), area);
}

fn render_dropdown(frame: &mut Frame<'_>, menu_area: Rect, bar: &MenuBar) {
    let Some((open, selected)) = bar.selection() else {
        return;
    };
    let menus = bar.menus();
    let x_offset: usize = menus[..open]
        .iter()
        .map(|menu| menu_title(menu.title, menu.access_key).width())
        .sum();

    let items = &menus[open].items;
    let label_width = items.iter().map(|item| item.label.width()).max().unwrap_or(0);
    let shortcut_width = items
        .iter()
        .map(|item| item.shortcut.map(UnicodeWidthStr::width).unwrap_or(0))
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let padding = label_width - item.label.width() + 2;
            let text = format!(
                " {}{}{:>width$} ",
                item.label,
                " ".repeat(padding),
                item.shortcut.unwrap_or(""),
                width = shortcut_width
            );
            let style = if index == selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let screen = frame.area();
    let width = (label_width + shortcut_width + 6) as u16;
    let height = items.len() as u16 + 2;
    let x = (menu_area.x + x_offset as u16).min(screen.width.saturating_sub(width));
    let y = menu_area.y + 1;
    let popup = Rect::new(
        x,
        y,
        width.min(screen.width),
        height.min(screen.height.saturating_sub(y)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        popup,
    );
}
