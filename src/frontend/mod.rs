//! フロントエンド
//!
//! ターミナル上のイベントループとダイアログ

pub mod tui;

pub use tui::TuiApplication;
