//! ダイアログの抽象化
//!
//! 結果は「選択」「キャンセル」「失敗（`Err`）」の三通り

use crate::editor::FontSpec;
use crate::error::Result;
use crate::file::FileFilter;
use std::path::{Path, PathBuf};

/// ダイアログの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    /// 値が選ばれた
    Selected(T),
    /// キャンセルされた
    Cancelled,
}

/// 未保存時の確認結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    /// 保存してから続行
    Yes,
    /// 保存せずに続行
    No,
    /// 操作を中止
    Cancel,
}

/// ファイル選択ダイアログ
///
/// 返すパスは絶対パス
pub trait FileDialog {
    /// 開くファイルを選ぶ
    fn pick_open(&mut self, filters: &[FileFilter]) -> Result<DialogOutcome<PathBuf>>;

    /// 保存先を選ぶ（`suggested` は現在のパス）
    fn pick_save(
        &mut self,
        filters: &[FileFilter],
        suggested: Option<&Path>,
    ) -> Result<DialogOutcome<PathBuf>>;
}

/// フォント選択ダイアログ
pub trait FontDialog {
    fn pick_font(&mut self, current: &FontSpec) -> Result<DialogOutcome<FontSpec>>;
}

/// 未保存確認（はい／いいえ／キャンセル）
pub trait SavePrompt {
    fn confirm_save(&mut self, message: &str) -> Result<SaveChoice>;
}
