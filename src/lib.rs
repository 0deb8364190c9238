//! note - minimal plain-text note editor
//!
//! 端末で動くシンプルなテキストエディタ。
//! 編集状態と履歴はUIから独立しており、ダイアログ・クリップボード・
//! ファイル入出力・時計は差し替え可能な機能として注入する。

// コアモジュール
pub mod app;
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod editor;

// ロジック層
pub mod input;
pub mod platform;

// 表示層
pub mod frontend;
pub mod ui;

// 公開API
pub use app::{App, Platform};
pub use config::{CliOptions, Config};
pub use error::{NoteError, Result};
pub use frontend::TuiApplication;
