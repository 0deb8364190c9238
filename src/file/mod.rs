//! ファイル操作モジュール
//!
//! - 読み書きはファイル全体単位（ストリーミングなし）
//! - 権限不足などの失敗はエラーとして返し、エディタは継続する
//! - ダイアログのフィルターは `*.txt` と `*`

pub mod filter;
pub mod io;
pub mod path;

// 公開API
pub use filter::{FileFilter, ALL_FILES, DEFAULT_FILTERS, TEXT_FILES};
pub use io::{DiskFileStore, FileStore};
pub use path::{expand_path, normalize_path, to_absolute};
