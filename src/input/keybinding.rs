//! キーバインドシステム
//!
//! 端末のキー入力をコマンド・編集・カーソル移動へ対応付ける

use crate::buffer::Movement;
use crate::input::commands::{Command, EditAction};
use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers as CrosstermModifiers,
};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(ch),
        }
    }

    pub fn ctrl_shift(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                alt: false,
                shift: true,
            },
            code: KeyCode::Char(ch),
        }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }
}

impl From<&KeyEvent> for Key {
    fn from(event: &KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            // Ctrl との組み合わせは小文字に揃える（Ctrl+Shift+S → ctrl+shift+'s'）
            CrosstermKeyCode::Char(ch) if modifiers.ctrl || modifiers.alt => {
                KeyCode::Char(ch.to_ascii_lowercase())
            }
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Self { modifiers, code }
    }
}

/// キー入力から得られる操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// メニューコマンド
    Command(Command),
    /// 直接編集
    Edit(EditAction),
    /// キャレット移動
    Move { movement: Movement, extend: bool },
    /// 全選択
    SelectAll,
    /// メニューを開く（アクセスキー指定時はそのメニュー）
    OpenMenu(Option<char>),
    /// 対応なし
    Ignore,
}

/// キーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// 既定のキーマップを作成
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        let commands = [
            (Key::ctrl('n'), Command::New),
            (Key::ctrl('o'), Command::Open),
            (Key::ctrl('s'), Command::Save),
            (Key::ctrl_shift('s'), Command::SaveAs),
            (Key::plain(KeyCode::F(12)), Command::SaveAs),
            (Key::ctrl('q'), Command::Exit),
            (Key::ctrl('z'), Command::Undo),
            (Key::ctrl('y'), Command::Redo),
            (Key::ctrl('x'), Command::Cut),
            (Key::ctrl('c'), Command::Copy),
            (Key::ctrl('v'), Command::Paste),
            (Key::plain(KeyCode::F(7)), Command::Font),
            (Key::plain(KeyCode::F(5)), Command::InsertDate),
            (Key::plain(KeyCode::F(6)), Command::InsertTime),
        ];
        for (key, command) in commands {
            bindings.insert(key, Action::Command(command));
        }
        bindings.insert(Key::ctrl('a'), Action::SelectAll);
        bindings.insert(Key::plain(KeyCode::F(10)), Action::OpenMenu(None));

        Self { bindings }
    }

    /// 指定キーに割り当てられた操作
    pub fn binding(&self, key: &Key) -> Option<&Action> {
        self.bindings.get(key)
    }

    /// キーイベントを操作へ変換
    pub fn resolve(&self, event: &KeyEvent) -> Action {
        if event.kind == KeyEventKind::Release {
            return Action::Ignore;
        }

        let key = Key::from(event);
        if let Some(action) = self.bindings.get(&key) {
            return action.clone();
        }

        let KeyModifiers { ctrl, alt, shift } = key.modifiers;
        match key.code {
            KeyCode::Char(ch) if alt && !ctrl => Action::OpenMenu(Some(ch)),
            KeyCode::Char(ch) if key.is_insertable_char() => {
                Action::Edit(EditAction::InsertChar(ch))
            }
            KeyCode::Enter => Action::Edit(EditAction::Newline),
            KeyCode::Tab if !ctrl && !alt => Action::Edit(EditAction::InsertChar('\t')),
            KeyCode::Backspace => Action::Edit(EditAction::DeleteBackward),
            KeyCode::Delete => Action::Edit(EditAction::DeleteForward),
            KeyCode::Left => movement(Movement::Left, shift),
            KeyCode::Right => movement(Movement::Right, shift),
            KeyCode::Up => movement(Movement::Up, shift),
            KeyCode::Down => movement(Movement::Down, shift),
            KeyCode::Home if ctrl => movement(Movement::DocumentStart, shift),
            KeyCode::End if ctrl => movement(Movement::DocumentEnd, shift),
            KeyCode::Home => movement(Movement::LineStart, shift),
            KeyCode::End => movement(Movement::LineEnd, shift),
            _ => Action::Ignore,
        }
    }
}

fn movement(movement: Movement, extend: bool) -> Action {
    Action::Move { movement, extend }
}
