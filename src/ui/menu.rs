//! メニューバー
//!
//! アプリケーション／ファイル／編集／入力の四つのメニューと、その開閉・選択状態

use crate::input::commands::Command;

/// メニュー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub shortcut: Option<&'static str>,
    pub command: Command,
}

/// メニュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    /// Alt と組み合わせて開くキー
    pub access_key: char,
    pub items: Vec<MenuItem>,
}

const fn item(label: &'static str, shortcut: Option<&'static str>, command: Command) -> MenuItem {
    MenuItem {
        label,
        shortcut,
        command,
    }
}

/// 既定のメニュー構成
pub fn default_menus() -> Vec<Menu> {
    vec![
        Menu {
            title: "アプリケーション",
            access_key: 'a',
            items: vec![
                item("Noteについて", None, Command::About),
                item("アイコンについて", None, Command::AboutIcon),
                item("終了", Some("Ctrl+Q"), Command::Exit),
            ],
        },
        Menu {
            title: "ファイル",
            access_key: 'f',
            items: vec![
                item("新規", Some("Ctrl+N"), Command::New),
                item("開く...", Some("Ctrl+O"), Command::Open),
                item("保存", Some("Ctrl+S"), Command::Save),
                item("名前を付けて保存...", Some("F12"), Command::SaveAs),
                item("終了", Some("Ctrl+Q"), Command::Exit),
            ],
        },
        Menu {
            title: "編集",
            access_key: 'e',
            items: vec![
                item("元に戻す", Some("Ctrl+Z"), Command::Undo),
                item("やり直し", Some("Ctrl+Y"), Command::Redo),
                item("切り取り", Some("Ctrl+X"), Command::Cut),
                item("コピー", Some("Ctrl+C"), Command::Copy),
                item("貼り付け", Some("Ctrl+V"), Command::Paste),
                item("フォント...", Some("F7"), Command::Font),
            ],
        },
        Menu {
            title: "入力",
            access_key: 'i',
            items: vec![
                item("日付", Some("F5"), Command::InsertDate),
                item("時刻", Some("F6"), Command::InsertTime),
            ],
        },
    ]
}

/// メニュー操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// 何もしない（開いたまま）
    None,
    /// 閉じた
    Closed,
    /// コマンドが選ばれた（メニューは閉じる）
    Selected(Command),
}

/// メニューバーの状態
#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    /// 開いているメニューと選択中の項目
    open: Option<(usize, usize)>,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: default_menus(),
            open: None,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// 開いているメニューと選択中の項目
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.open
    }

    /// 指定メニューを開く
    pub fn open(&mut self, menu: usize) {
        if menu < self.menus.len() {
            self.open = Some((menu, 0));
        }
    }

    /// アクセスキーでメニューを開く
    pub fn open_by_key(&mut self, key: char) -> bool {
        let key = key.to_ascii_lowercase();
        match self.menus.iter().position(|menu| menu.access_key == key) {
            Some(index) => {
                self.open(index);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn next_menu(&mut self) {
        if let Some((menu, _)) = self.open {
            self.open = Some(((menu + 1) % self.menus.len(), 0));
        }
    }

    pub fn previous_menu(&mut self) {
        if let Some((menu, _)) = self.open {
            let count = self.menus.len();
            self.open = Some(((menu + count - 1) % count, 0));
        }
    }

    pub fn next_item(&mut self) {
        if let Some((menu, item)) = self.open {
            let count = self.menus[menu].items.len();
            self.open = Some((menu, (item + 1) % count));
        }
    }

    pub fn previous_item(&mut self) {
        if let Some((menu, item)) = self.open {
            let count = self.menus[menu].items.len();
            self.open = Some((menu, (item + count - 1) % count));
        }
    }

    /// 選択中の項目を確定する
    pub fn activate(&mut self) -> MenuEvent {
        match self.open.take() {
            Some((menu, item)) => MenuEvent::Selected(self.menus[menu].items[item].command),
            None => MenuEvent::None,
        }
    }

    /// 開いているメニューのキー操作
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> MenuEvent {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuEvent::Closed
            }
            KeyCode::Left => {
                self.previous_menu();
                MenuEvent::None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.next_menu();
                MenuEvent::None
            }
            KeyCode::Up => {
                self.previous_item();
                MenuEvent::None
            }
            KeyCode::Down => {
                self.next_item();
                MenuEvent::None
            }
            KeyCode::Enter => self.activate(),
            _ => MenuEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_surface_lists_every_command() {
        let menus = default_menus();
        let titles: Vec<_> = menus.iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["アプリケーション", "ファイル", "編集", "入力"]);

        for command in Command::ALL {
            assert!(
                menus
                    .iter()
                    .flat_map(|m| m.items.iter())
                    .any(|item| item.command == command),
                "{:?} is not reachable from the menu",
                command
            );
        }
    }

    #[test]
    fn test_navigate_and_activate() {
        let mut bar = MenuBar::new();
        assert!(bar.open_by_key('E'));
        assert_eq!(bar.selection(), Some((2, 0)));

        bar.handle_key(key(KeyCode::Down));
        bar.handle_key(key(KeyCode::Down));
        assert_eq!(bar.handle_key(key(KeyCode::Enter)), MenuEvent::Selected(Command::Cut));
        assert!(!bar.is_open());
    }

    #[test]
    fn test_wraparound_and_close() {
        let mut bar = MenuBar::new();
        bar.open(0);
        bar.handle_key(key(KeyCode::Left));
        assert_eq!(bar.selection(), Some((3, 0)));
        bar.handle_key(key(KeyCode::Up));
        assert_eq!(bar.selection(), Some((3, 1)));

        assert_eq!(bar.handle_key(key(KeyCode::Esc)), MenuEvent::Closed);
        assert_eq!(bar.activate(), MenuEvent::None);
    }
}
