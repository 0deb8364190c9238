//! プラットフォーム機能の抽象化
//!
//! ダイアログ、クリップボード、時計をトレイトとして定義し、
//! コントローラーへ注入する。端末が無くても偽物で差し替えられる。

pub mod clipboard;
pub mod clock;
pub mod dialogs;

// 公開API
pub use clipboard::{default_clipboard, Clipboard, MemoryClipboard, SystemClipboard};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dialogs::{DialogOutcome, FileDialog, FontDialog, SaveChoice, SavePrompt};
