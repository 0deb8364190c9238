//! 入力処理モジュール
//!
//! キー入力の解釈とコマンド定義

pub mod commands;
pub mod keybinding;

// 公開API
pub use commands::{Command, CommandResult, EditAction, Notice};
pub use keybinding::{Action, Key, KeyMap};
