//! バッファ管理モジュール
//!
//! テキストデータの管理、編集操作、カーソル位置管理を提供

pub mod cursor;
pub mod document;

// 公開API
pub use cursor::{CursorPosition, Movement};
pub use document::{visible_char_count, ChangeEvent, ChangeListener, ChangeNotifier, Document};
