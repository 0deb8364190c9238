//! エディタモジュール
//!
//! 編集履歴・エディタ状態・フォント・日時挿入を統合する

pub mod font;
pub mod history;
pub mod stamp;
pub mod state;

// 公開API
pub use font::FontSpec;
pub use history::{HistoryManager, HistoryRecorder};
pub use stamp::StampKind;
pub use state::EditorState;
