//! ドキュメントバッファ
//!
//! 編集中のテキスト全体、キャレット、選択範囲、保存状態を保持する。
//! テキストが変化するたびに、変更前のテキストをリスナーへ通知する。

use crate::buffer::cursor::{CursorPosition, Movement};
use std::path::{Path, PathBuf};

/// 変更イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// テキストが書き換えられた（`previous` は変更直前の全文）
    TextChanged { previous: String },
}

/// 変更通知リスナー
pub trait ChangeListener {
    fn on_change(&mut self, event: &ChangeEvent);
}

/// 変更通知システム
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// リスナーを追加
    pub fn add_listener(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    /// 変更を通知
    pub fn notify(&mut self, event: ChangeEvent) {
        for listener in &mut self.listeners {
            listener.on_change(&event);
        }
    }

    fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

/// 改行を除いた文字数
pub fn visible_char_count(text: &str) -> usize {
    text.chars().filter(|&ch| ch != '\n' && ch != '\r').count()
}

/// 編集中のドキュメント
pub struct Document {
    /// 全文
    text: String,
    /// キャレット位置（文字単位）
    caret: usize,
    /// 選択開始位置（選択中のみ）
    anchor: Option<usize>,
    /// 上下移動時に維持する列
    preferred_column: Option<usize>,
    /// 未保存の変更があるか
    modified: bool,
    /// 保存先ファイル
    path: Option<PathBuf>,
    /// 変更通知
    notifier: ChangeNotifier,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 空のドキュメントを作成
    pub fn new() -> Self {
        Self {
            text: String::new(),
            caret: 0,
            anchor: None,
            preferred_column: None,
            modified: false,
            path: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// 変更リスナーを登録
    pub fn add_change_listener(&mut self, listener: Box<dyn ChangeListener>) {
        self.notifier.add_listener(listener);
    }

    /// 内容を丸ごと読み込む（編集ではないので通知しない）
    pub fn load(&mut self, text: String, path: Option<PathBuf>) {
        self.text = text;
        self.path = path;
        self.caret = 0;
        self.anchor = None;
        self.preferred_column = None;
        self.modified = false;
    }

    /// 新規ドキュメントに戻す
    pub fn clear(&mut self) {
        self.load(String::new(), None);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// 改行を除いた文字数
    pub fn visible_char_count(&self) -> usize {
        visible_char_count(&self.text)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// 保存済みとしてマーク
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// 保存先のファイル名
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// キャレットの行・列
    pub fn cursor_position(&self) -> CursorPosition {
        CursorPosition::locate(&self.text, self.caret)
    }

    /// キャレットを移動（選択は解除）
    pub fn set_caret(&mut self, char_pos: usize) {
        self.caret = char_pos.min(self.len_chars());
        self.anchor = None;
        self.preferred_column = None;
    }

    /// 選択範囲（開始, 終了）。空の選択は `None`
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// 選択中のテキスト
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        Some(self.slice(start, end).to_string())
    }

    /// 全体を選択
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.len_chars();
        self.preferred_column = None;
    }

    /// 文字列を挿入（選択範囲があれば置き換える）
    ///
    /// テキストが変化した場合は `true`
    pub fn insert_str(&mut self, s: &str) -> bool {
        let (start, end) = self.selection().unwrap_or((self.caret, self.caret));
        self.splice(start, end, s)
    }

    /// 文字を挿入
    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    /// Backspace削除（選択範囲があればそれを削除）
    pub fn delete_backward(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            return self.splice(start, end, "");
        }
        if self.caret == 0 {
            return false;
        }
        self.splice(self.caret - 1, self.caret, "")
    }

    /// Delete削除（選択範囲があればそれを削除）
    pub fn delete_forward(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            return self.splice(start, end, "");
        }
        if self.caret >= self.len_chars() {
            return false;
        }
        self.splice(self.caret, self.caret + 1, "")
    }

    /// 選択範囲を削除して、その内容を返す
    pub fn delete_selection(&mut self) -> Option<String> {
        let (start, end) = self.selection()?;
        let removed = self.slice(start, end).to_string();
        self.splice(start, end, "");
        Some(removed)
    }

    /// 全文を置き換える
    ///
    /// キャレットは新しいテキストの範囲内に収める
    pub fn replace_all(&mut self, text: String) -> bool {
        if text == self.text {
            return false;
        }
        let previous = std::mem::replace(&mut self.text, text);
        self.caret = self.caret.min(self.len_chars());
        self.anchor = None;
        self.preferred_column = None;
        self.modified = true;
        self.notifier.notify(ChangeEvent::TextChanged { previous });
        true
    }

    /// キャレットを移動する
    ///
    /// `extend` が真なら選択範囲を伸ばす
    pub fn move_caret(&mut self, movement: Movement, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else if let Some((start, end)) = self.selection() {
            // 左右移動は選択の端で止まる
            match movement {
                Movement::Left => {
                    self.set_caret(start);
                    return;
                }
                Movement::Right => {
                    self.set_caret(end);
                    return;
                }
                _ => self.anchor = None,
            }
        } else {
            self.anchor = None;
        }

        let current = self.cursor_position();
        let target = match movement {
            Movement::Left => {
                self.preferred_column = None;
                self.caret.saturating_sub(1)
            }
            Movement::Right => {
                self.preferred_column = None;
                (self.caret + 1).min(self.len_chars())
            }
            Movement::Up | Movement::Down => {
                let column = *self.preferred_column.get_or_insert(current.column);
                let line = if movement == Movement::Up {
                    match current.line.checked_sub(1) {
                        Some(line) => line,
                        None => {
                            self.caret = 0;
                            return;
                        }
                    }
                } else if current.line + 1 >= self.line_count() {
                    self.caret = self.len_chars();
                    return;
                } else {
                    current.line + 1
                };
                self.char_pos_at(line, column)
            }
            Movement::LineStart => {
                self.preferred_column = None;
                current.char_pos - current.column
            }
            Movement::LineEnd => {
                self.preferred_column = None;
                current.char_pos - current.column + self.line_len(current.line)
            }
            Movement::DocumentStart => {
                self.preferred_column = None;
                0
            }
            Movement::DocumentEnd => {
                self.preferred_column = None;
                self.len_chars()
            }
        };
        self.caret = target;
    }

    /// 行数（空文書でも1行）
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// 行の長さ（文字単位、改行を除く）
    pub fn line_len(&self, line: usize) -> usize {
        self.text
            .split('\n')
            .nth(line)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    /// 行・列から文字位置を計算（列は行末に丸める）
    fn char_pos_at(&self, line: usize, column: usize) -> usize {
        let mut pos = 0;
        for (index, content) in self.text.split('\n').enumerate() {
            let len = content.chars().count();
            if index == line {
                return pos + column.min(len);
            }
            pos += len + 1;
        }
        self.len_chars()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.byte_index(start)..self.byte_index(end)]
    }

    fn splice(&mut self, start: usize, end: usize, insert: &str) -> bool {
        if start == end && insert.is_empty() {
            return false;
        }

        let previous = if self.notifier.has_listeners() {
            Some(self.text.clone())
        } else {
            None
        };

        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        self.text.replace_range(start_byte..end_byte, insert);

        self.caret = start + insert.chars().count();
        self.anchor = None;
        self.preferred_column = None;
        self.modified = true;

        if let Some(previous) = previous {
            self.notifier.notify(ChangeEvent::TextChanged { previous });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Collect(Rc<RefCell<Vec<String>>>);

    impl ChangeListener for Collect {
        fn on_change(&mut self, event: &ChangeEvent) {
            let ChangeEvent::TextChanged { previous } = event;
            self.0.borrow_mut().push(previous.clone());
        }
    }

    fn document_with(text: &str) -> Document {
        let mut doc = Document::new();
        doc.load(text.to_string(), None);
        doc
    }

    #[test]
    fn test_insert_notifies_previous_text() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut doc = Document::new();
        doc.add_change_listener(Box::new(Collect(seen.clone())));

        assert!(doc.insert_char('a'));
        assert!(doc.insert_char('b'));

        assert_eq!(doc.text(), "ab");
        assert_eq!(*seen.borrow(), vec!["".to_string(), "a".to_string()]);
        assert!(doc.is_modified());
    }

    #[test]
    fn test_noop_edits_do_not_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut doc = Document::new();
        doc.add_change_listener(Box::new(Collect(seen.clone())));

        assert!(!doc.delete_backward());
        assert!(!doc.delete_forward());
        assert!(!doc.insert_str(""));
        assert!(seen.borrow().is_empty());
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_load_is_not_an_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut doc = Document::new();
        doc.add_change_listener(Box::new(Collect(seen.clone())));

        doc.load("loaded".to_string(), Some(PathBuf::from("/tmp/a.txt")));
        assert!(seen.borrow().is_empty());
        assert!(!doc.is_modified());
        assert_eq!(doc.file_name().as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_selection_replace_and_delete() {
        let mut doc = document_with("hello world");
        doc.set_caret(6);
        doc.move_caret(Movement::LineEnd, true);
        assert_eq!(doc.selected_text().as_deref(), Some("world"));

        doc.insert_str("rust");
        assert_eq!(doc.text(), "hello rust");
        assert_eq!(doc.caret(), 10);
        assert!(doc.selection().is_none());

        doc.select_all();
        assert_eq!(doc.delete_selection().as_deref(), Some("hello rust"));
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut doc = document_with("日本語");
        doc.set_caret(1);
        doc.insert_char('x');
        assert_eq!(doc.text(), "日x本語");
        assert!(doc.delete_backward());
        assert!(doc.delete_forward());
        assert_eq!(doc.text(), "日語");
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut doc = document_with("abcdef\nab\nabcdef");
        doc.set_caret(5);
        doc.move_caret(Movement::Down, false);
        assert_eq!(doc.cursor_position().line, 1);
        assert_eq!(doc.cursor_position().column, 2);
        doc.move_caret(Movement::Down, false);
        assert_eq!(doc.cursor_position().line, 2);
        assert_eq!(doc.cursor_position().column, 5);
        doc.move_caret(Movement::Down, false);
        assert_eq!(doc.caret(), doc.len_chars());
    }

    #[test]
    fn test_left_right_collapse_selection() {
        let mut doc = document_with("abcdef");
        doc.set_caret(1);
        doc.move_caret(Movement::Right, true);
        doc.move_caret(Movement::Right, true);
        assert_eq!(doc.selection(), Some((1, 3)));

        doc.move_caret(Movement::Left, false);
        assert_eq!(doc.caret(), 1);
        assert!(doc.selection().is_none());
    }

    #[test]
    fn test_replace_all_clamps_caret() {
        let mut doc = document_with("long text here");
        doc.move_caret(Movement::DocumentEnd, false);
        assert!(doc.replace_all("ab".to_string()));
        assert_eq!(doc.caret(), 2);
        assert!(doc.is_modified());
    }

    #[test]
    fn test_visible_char_count_excludes_newlines() {
        assert_eq!(visible_char_count("abcde\n"), 5);
        assert_eq!(visible_char_count("ab\r\ncd"), 4);
    }
}
