//! ステータスバー
//!
//! 文字数・ファイル名・キャレット位置・フォントを表示用の文字列にまとめる

use crate::editor::EditorState;

/// 保存先が無いときのファイル名表示
pub const UNTITLED_LABEL: &str = "無題";

/// ステータスバーの表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// 文字数（または上限到達メッセージ）
    pub char_count: String,
    /// ファイル名
    pub file_label: String,
    /// 未保存の変更があるか
    pub is_modified: bool,
    /// 行・列
    pub caret: String,
    /// フォント
    pub font: String,
}

impl StatusInfo {
    pub fn from_state(state: &EditorState) -> Self {
        let document = &state.document;
        let position = document.cursor_position();

        Self {
            char_count: char_count_label(document.visible_char_count(), state.max_chars),
            file_label: document
                .file_name()
                .unwrap_or_else(|| UNTITLED_LABEL.to_string()),
            is_modified: document.is_modified(),
            caret: format!(
                "行 {}, 列 {}",
                position.display_line(),
                position.display_column()
            ),
            font: state.font.label(),
        }
    }

    /// ファイル名（変更があれば `*` 付き）
    pub fn file_display(&self) -> String {
        if self.is_modified {
            format!("{} *", self.file_label)
        } else {
            self.file_label.clone()
        }
    }
}

/// 文字数表示
///
/// 上限に達したときは件数の代わりに上限到達を示す
pub fn char_count_label(count: usize, limit: usize) -> String {
    if count >= limit {
        format!("文字数: 上限に達しました ({})", limit)
    } else {
        format!("文字数: {}", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    fn state() -> EditorState {
        EditorState::new(&Config::default())
    }

    #[test]
    fn test_newlines_are_not_counted() {
        let mut state = state();
        state.document.load("abcde\n".to_string(), None);
        assert_eq!(StatusInfo::from_state(&state).char_count, "文字数: 5");
    }

    #[test]
    fn test_limit_message_boundary() {
        assert_eq!(char_count_label(99_999, 100_000), "文字数: 99999");
        assert_eq!(
            char_count_label(100_000, 100_000),
            "文字数: 上限に達しました (100000)"
        );
    }

    #[test]
    fn test_limit_reached_with_full_document() {
        let mut state = state();
        state.document.load("a".repeat(100_000), None);
        assert!(StatusInfo::from_state(&state).char_count.contains("上限"));

        state.document.load("a".repeat(99_999), None);
        assert!(!StatusInfo::from_state(&state).char_count.contains("上限"));
    }

    #[test]
    fn test_file_label_and_caret() {
        let mut state = state();
        let info = StatusInfo::from_state(&state);
        assert_eq!(info.file_label, UNTITLED_LABEL);
        assert_eq!(info.caret, "行 1, 列 1");

        state
            .document
            .load("one\ntwo".to_string(), Some(PathBuf::from("/notes/todo.txt")));
        state.document.set_caret(6);
        state.document.insert_char('!');
        let info = StatusInfo::from_state(&state);
        assert_eq!(info.file_label, "todo.txt");
        assert_eq!(info.file_display(), "todo.txt *");
        assert_eq!(info.caret, "行 2, 列 4");
    }
}
