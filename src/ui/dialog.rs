//! モーダルダイアログ
//!
//! ファイル選択・フォント選択・保存確認・メッセージ表示を
//! キー入力で進む状態機械として実装する。描画は中央のポップアップ。

use crate::editor::FontSpec;
use crate::error::ErrorDisplay;
use crate::file::{expand_path, FileFilter};
use crate::platform::{DialogOutcome, SaveChoice};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use unicode_width::UnicodeWidthStr;

/// 一覧に表示する最大件数
const MAX_LISTED_ENTRIES: usize = 10;

/// キー入力一回分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalStep<T> {
    /// ダイアログを開いたまま
    Continue,
    /// ダイアログを閉じて値を返す
    Finish(T),
}

/// モーダルダイアログ
pub trait ModalDialog {
    type Output;

    /// キー入力を処理
    fn handle_key(&mut self, key: KeyEvent) -> ModalStep<Self::Output>;

    /// `area` の中央にポップアップを描画
    fn render(&self, frame: &mut Frame<'_>, area: Rect);
}

/// 一行入力欄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    /// 文字単位のカーソル位置
    cursor: usize,
}

impl LineInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 内容を置き換え、カーソルを末尾へ
    pub fn set(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn insert(&mut self, ch: char) {
        let index = self.byte_index(self.cursor);
        self.text.insert(index, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let index = self.byte_index(self.cursor);
        self.text.remove(index);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let index = self.byte_index(self.cursor);
        self.text.remove(index);
        true
    }

    /// 編集キーを処理する。内容が変わった場合は `true`
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.insert(ch);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.text.chars().count());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.text.chars().count();
                false
            }
            _ => false,
        }
    }

    /// カーソルより前の表示幅
    pub fn cursor_width(&self) -> usize {
        let index = self.byte_index(self.cursor);
        self.text[..index].width()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }
}

/// ファイルダイアログの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogMode {
    Open,
    Save,
}

/// ディレクトリ一覧の項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub is_dir: bool,
}

/// 開く／名前を付けて保存ダイアログ
#[derive(Debug, Clone)]
pub struct FileDialogState {
    mode: FileDialogMode,
    filters: Vec<FileFilter>,
    filter_index: usize,
    input: LineInput,
    /// 一覧を読んだディレクトリ
    listing_dir: Option<PathBuf>,
    entries: Vec<ListedEntry>,
    selected: Option<usize>,
    error: Option<String>,
}

impl FileDialogState {
    /// `initial` が無ければカレントディレクトリから始める
    pub fn new(mode: FileDialogMode, filters: &[FileFilter], initial: Option<&Path>) -> Self {
        let input = match initial {
            Some(path) => path.display().to_string(),
            None => std::env::current_dir()
                .map(|dir| directory_input(&dir))
                .unwrap_or_default(),
        };

        let mut state = Self {
            mode,
            filters: filters.to_vec(),
            filter_index: 0,
            input: LineInput::new(input),
            listing_dir: None,
            entries: Vec::new(),
            selected: None,
            error: None,
        };
        state.refresh();
        state
    }

    pub fn mode(&self) -> FileDialogMode {
        self.mode
    }

    pub fn input(&self) -> &str {
        self.input.text()
    }

    pub fn set_input(&mut self, text: &str) {
        self.input.set(text);
        self.refresh();
    }

    pub fn entries(&self) -> &[ListedEntry] {
        &self.entries
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 選択中のフィルター
    pub fn filter(&self) -> Option<&FileFilter> {
        self.filters.get(self.filter_index)
    }

    /// 次のフィルターへ切り替える
    pub fn cycle_filter(&mut self) {
        if !self.filters.is_empty() {
            self.filter_index = (self.filter_index + 1) % self.filters.len();
            self.refresh();
        }
    }

    /// 入力中のディレクトリを読み直す
    pub fn refresh(&mut self) {
        self.selected = None;
        match split_input(self.input.text()) {
            Some((dir, prefix)) => {
                self.entries = list_directory(&dir, &prefix, self.filter());
                self.listing_dir = Some(dir);
            }
            None => {
                self.entries = Vec::new();
                self.listing_dir = None;
            }
        }
    }

    fn select_entry(&mut self, forward: bool) {
        if self.entries.is_empty() {
            return;
        }
        let count = self.entries.len();
        let next = match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        };
        self.selected = Some(next);

        // 一覧は保ったまま入力欄だけ差し替える
        if let Some(dir) = &self.listing_dir {
            let entry = &self.entries[next];
            let mut text = dir.join(&entry.name).display().to_string();
            if entry.is_dir {
                text.push(MAIN_SEPARATOR);
            }
            self.input.set(text);
        }
    }

    /// 入力を確定する
    fn accept(&mut self) -> ModalStep<DialogOutcome<PathBuf>> {
        let path = match expand_path(self.input.text()) {
            Ok(path) => path,
            Err(err) => {
                self.error = Some(ErrorDisplay::new(&err).message);
                return ModalStep::Continue;
            }
        };

        if path.is_dir() {
            self.set_input(&directory_input(&path));
            self.error = None;
            return ModalStep::Continue;
        }

        match self.mode {
            FileDialogMode::Open => {
                if !path.is_file() {
                    self.error = Some(format!("ファイルが見つかりません: {}", path.display()));
                    return ModalStep::Continue;
                }
                ModalStep::Finish(DialogOutcome::Selected(path))
            }
            FileDialogMode::Save => {
                let path = match self.filter() {
                    Some(filter) => filter.apply_default_extension(path),
                    None => path,
                };
                if !path.parent().map(Path::is_dir).unwrap_or(false) {
                    self.error = Some(format!(
                        "保存先のフォルダーがありません: {}",
                        path.display()
                    ));
                    return ModalStep::Continue;
                }
                ModalStep::Finish(DialogOutcome::Selected(path))
            }
        }
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FileDialogMode::Open => "開く",
            FileDialogMode::Save => "名前を付けて保存",
        }
    }
}

impl ModalDialog for FileDialogState {
    type Output = DialogOutcome<PathBuf>;

    fn handle_key(&mut self, key: KeyEvent) -> ModalStep<Self::Output> {
        match key.code {
            KeyCode::Esc => ModalStep::Finish(DialogOutcome::Cancelled),
            KeyCode::Enter => self.accept(),
            KeyCode::Tab => {
                self.cycle_filter();
                ModalStep::Continue
            }
            KeyCode::Down => {
                self.select_entry(true);
                ModalStep::Continue
            }
            KeyCode::Up => {
                self.select_entry(false);
                ModalStep::Continue
            }
            _ => {
                if self.input.handle_key(&key) {
                    self.error = None;
                    self.refresh();
                }
                ModalStep::Continue
            }
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let listed = self.entries.len().min(MAX_LISTED_ENTRIES);
        let height = (listed as u16) + 6;
        let popup = centered_rect(area.width.saturating_sub(4).min(72), height, area);
        let block = popup_block(self.title(), Color::Cyan);
        let inner = block.inner(popup);

        let mut lines = vec![
            Line::from(self.input.text().to_string()),
            Line::from(Span::styled(
                format!(
                    "種類: {}  [Tab]切替  [Enter]決定  [Esc]キャンセル",
                    self.filter().map(|f| f.label).unwrap_or("")
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        // 選択中の項目が見える範囲で一覧を切り出す
        let start = match self.selected {
            Some(index) if index >= MAX_LISTED_ENTRIES => index + 1 - MAX_LISTED_ENTRIES,
            _ => 0,
        };
        for (index, entry) in self.entries.iter().enumerate().skip(start).take(listed) {
            let name = if entry.is_dir {
                format!("{}{}", entry.name, MAIN_SEPARATOR)
            } else {
                entry.name.clone()
            };
            let style = if Some(index) == self.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if entry.is_dir {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {}", name), style)));
        }

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
        set_input_cursor(frame, inner, &self.input);
    }
}

/// フォントダイアログ
#[derive(Debug, Clone)]
pub struct FontDialogState {
    input: LineInput,
    error: Option<String>,
}

impl FontDialogState {
    pub fn new(current: &FontSpec) -> Self {
        Self {
            input: LineInput::new(current.to_string()),
            error: None,
        }
    }

    pub fn input(&self) -> &str {
        self.input.text()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl ModalDialog for FontDialogState {
    type Output = DialogOutcome<FontSpec>;

    fn handle_key(&mut self, key: KeyEvent) -> ModalStep<Self::Output> {
        match key.code {
            KeyCode::Esc => ModalStep::Finish(DialogOutcome::Cancelled),
            KeyCode::Enter => match FontSpec::parse(self.input.text()) {
                Ok(font) => ModalStep::Finish(DialogOutcome::Selected(font)),
                Err(_) => {
                    self.error =
                        Some("書体名 サイズ [bold] [italic] の形式で入力してください".to_string());
                    ModalStep::Continue
                }
            },
            _ => {
                if self.input.handle_key(&key) {
                    self.error = None;
                }
                ModalStep::Continue
            }
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(area.width.saturating_sub(4).min(60), 6, area);
        let block = popup_block("フォント", Color::Cyan);
        let inner = block.inner(popup);

        let mut lines = vec![
            Line::from(self.input.text().to_string()),
            Line::from(Span::styled(
                "例: Consolas 12 bold italic",
                Style::default().fg(Color::Gray),
            )),
        ];
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
        set_input_cursor(frame, inner, &self.input);
    }
}

/// 保存確認（はい／いいえ／キャンセル）
#[derive(Debug, Clone)]
pub struct SavePromptState {
    message: String,
}

impl SavePromptState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ModalDialog for SavePromptState {
    type Output = SaveChoice;

    fn handle_key(&mut self, key: KeyEvent) -> ModalStep<Self::Output> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                ModalStep::Finish(SaveChoice::Yes)
            }
            KeyCode::Char('n') | KeyCode::Char('N') => ModalStep::Finish(SaveChoice::No),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                ModalStep::Finish(SaveChoice::Cancel)
            }
            _ => ModalStep::Continue,
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let width = (self.message.width() as u16 + 4).max(40);
        let popup = centered_rect(width.min(area.width), 5, area);
        let lines = vec![
            Line::from(self.message.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "[Y] はい   [N] いいえ   [C] キャンセル",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(popup_block("Note", Color::Yellow)),
            popup,
        );
    }
}

/// メッセージボックス
#[derive(Debug, Clone)]
pub struct MessageBox {
    title: String,
    body: String,
    is_error: bool,
}

impl MessageBox {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_error: false,
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "エラー".to_string(),
            body: body.into(),
            is_error: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl ModalDialog for MessageBox {
    type Output = ();

    fn handle_key(&mut self, _key: KeyEvent) -> ModalStep<()> {
        ModalStep::Finish(())
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let widest = self
            .body
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .max(self.title.width());
        let height = self.body.lines().count() as u16 + 4;
        let popup = centered_rect((widest as u16 + 4).max(30).min(area.width), height, area);
        let color = if self.is_error { Color::Red } else { Color::Green };

        let mut lines: Vec<Line> = self.body.lines().map(|line| Line::from(line.to_string())).collect();
        lines.push(Line::from(Span::styled(
            "何かキーを押すと閉じます",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(popup_block(&self.title, color)),
            popup,
        );
    }
}

/// `area` の中央に収まる矩形
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn popup_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
}

/// 入力欄は枠内の先頭行にある
fn set_input_cursor(frame: &mut Frame<'_>, inner: Rect, input: &LineInput) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let offset = (input.cursor_width() as u16).min(inner.width - 1);
    frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
}

fn directory_input(dir: &Path) -> String {
    let mut text = dir.display().to_string();
    if !text.ends_with(MAIN_SEPARATOR) {
        text.push(MAIN_SEPARATOR);
    }
    text
}

/// 入力をディレクトリと入力途中のファイル名に分ける
fn split_input(input: &str) -> Option<(PathBuf, String)> {
    let expanded = expand_path(input).ok()?;
    if input.ends_with('/') || input.ends_with(MAIN_SEPARATOR) {
        return Some((expanded, String::new()));
    }
    let prefix = expanded
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = expanded.parent()?.to_path_buf();
    Some((dir, prefix))
}

/// ディレクトリ内の項目を列挙する（隠しファイルは除く）
///
/// ディレクトリは常に表示し、ファイルはフィルターに一致するものだけ
fn list_directory(dir: &Path, prefix: &str, filter: Option<&FileFilter>) -> Vec<ListedEntry> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut entries: Vec<ListedEntry> = read_dir
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !name.starts_with(prefix) {
                return None;
            }
            let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
            if !is_dir && !filter.map(|f| f.matches(&entry.path())).unwrap_or(true) {
                return None;
            }
            Some(ListedEntry { name, is_dir })
        })
        .collect();

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    entries
}
