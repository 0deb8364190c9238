//! ファイル種類フィルター
//!
//! 開く／保存ダイアログで選べる `*.txt` と `*` の二種類

use std::path::{Path, PathBuf};

/// ファイル種類フィルター
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    /// 表示名
    pub label: &'static str,
    /// 対象拡張子（`None` はすべて）
    pub extension: Option<&'static str>,
}

/// テキスト ファイル (*.txt)
pub const TEXT_FILES: FileFilter = FileFilter {
    label: "テキスト ファイル (*.txt)",
    extension: Some("txt"),
};

/// すべてのファイル (*)
pub const ALL_FILES: FileFilter = FileFilter {
    label: "すべてのファイル (*)",
    extension: None,
};

/// ダイアログの既定フィルター一覧
pub const DEFAULT_FILTERS: [FileFilter; 2] = [TEXT_FILES, ALL_FILES];

impl FileFilter {
    /// `*.txt` / `*` 形式のパターン
    pub fn pattern(&self) -> String {
        match self.extension {
            Some(ext) => format!("*.{}", ext),
            None => "*".to_string(),
        }
    }

    /// パスがフィルターに一致するか（拡張子は大文字小文字を区別しない）
    pub fn matches(&self, path: &Path) -> bool {
        match self.extension {
            Some(ext) => path
                .extension()
                .map(|actual| actual.to_string_lossy().eq_ignore_ascii_case(ext))
                .unwrap_or(false),
            None => true,
        }
    }

    /// 拡張子が無ければフィルターの拡張子を付ける
    pub fn apply_default_extension(&self, path: PathBuf) -> PathBuf {
        match self.extension {
            Some(ext) if path.extension().is_none() => path.with_extension(ext),
            _ => path,
        }
    }
}
