//! エディタ状態
//!
//! 一つのドキュメントと、その表示・入力に関わる設定をまとめて保持する

use crate::buffer::{visible_char_count, Document};
use crate::config::Config;
use crate::editor::FontSpec;

/// コントローラーが所有するエディタ状態
pub struct EditorState {
    /// 編集中のドキュメント
    pub document: Document,
    /// テキストエリアのフォント
    pub font: FontSpec,
    /// 改行を除いた文字数の上限
    pub max_chars: usize,
    /// 日付挿入の書式
    pub date_format: String,
    /// 時刻挿入の書式
    pub time_format: String,
}

impl EditorState {
    pub fn new(config: &Config) -> Self {
        Self {
            document: Document::new(),
            font: config.font.clone(),
            max_chars: config.max_chars,
            date_format: config.date_format.clone(),
            time_format: config.time_format.clone(),
        }
    }

    /// `insert` を挿入（選択範囲は置換）した場合に上限を超えるか
    ///
    /// 既に上限を超えている場合も、文字数が増えない編集は許可する
    pub fn would_exceed_limit(&self, insert: &str) -> bool {
        let current = self.document.visible_char_count();
        let selected = self
            .document
            .selected_text()
            .map(|text| visible_char_count(&text))
            .unwrap_or(0);
        let after = current - selected + visible_char_count(insert);
        after > self.max_chars && after > current
    }

    /// 上限に達しているか
    pub fn is_at_limit(&self) -> bool {
        self.document.visible_char_count() >= self.max_chars
    }
}
