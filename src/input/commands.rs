//! コマンドシステム
//!
//! メニューとショートカットから呼び出すコマンドの定義と実行結果

/// コマンドの種類
///
/// メニューから実行できる操作の閉じた集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // アプリケーション
    About,
    AboutIcon,
    Exit,

    // ファイル操作
    New,
    Open,
    Save,
    SaveAs,

    // 編集操作
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    Font,

    // 入力補助
    InsertDate,
    InsertTime,
}

impl Command {
    /// 全コマンド
    pub const ALL: [Command; 15] = [
        Command::About,
        Command::AboutIcon,
        Command::Exit,
        Command::New,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Undo,
        Command::Redo,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::Font,
        Command::InsertDate,
        Command::InsertTime,
    ];

    /// コマンド名
    pub fn id(&self) -> &'static str {
        match self {
            Command::About => "about",
            Command::AboutIcon => "about-icon",
            Command::Exit => "exit",
            Command::New => "new-file",
            Command::Open => "open-file",
            Command::Save => "save-file",
            Command::SaveAs => "save-file-as",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Cut => "cut",
            Command::Copy => "copy",
            Command::Paste => "paste",
            Command::Font => "choose-font",
            Command::InsertDate => "insert-date",
            Command::InsertTime => "insert-time",
        }
    }

    /// コマンド名からコマンドを作成
    pub fn from_string(cmd: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|command| command.id() == cmd)
    }

    /// コマンドの説明を取得
    pub fn description(&self) -> &'static str {
        match self {
            Command::About => "バージョン情報を表示",
            Command::AboutIcon => "アイコンのクレジットを表示",
            Command::Exit => "終了",
            Command::New => "新しいドキュメントを作成",
            Command::Open => "ファイルを開く",
            Command::Save => "ファイルを保存",
            Command::SaveAs => "名前を付けて保存",
            Command::Undo => "直前の操作を取り消し",
            Command::Redo => "取り消した操作をやり直し",
            Command::Cut => "選択範囲を切り取り",
            Command::Copy => "選択範囲をコピー",
            Command::Paste => "クリップボードから貼り付け",
            Command::Font => "フォントを変更",
            Command::InsertDate => "今日の日付を挿入",
            Command::InsertTime => "現在の時刻を挿入",
        }
    }
}

/// ユーザーによる直接編集
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    InsertChar(char),
    InsertText(String),
    Newline,
    DeleteBackward,
    DeleteForward,
}

/// 利用者への通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// ステータス領域に一時表示
    Status(String),
    /// 情報メッセージボックス
    Info { title: String, body: String },
    /// エラーメッセージボックス
    Error(String),
}

/// コマンド実行の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// 実行が成功したか
    pub success: bool,
    /// 通知内容
    pub notice: Option<Notice>,
    /// 画面更新が必要か
    pub needs_refresh: bool,
    /// アプリケーションを終了するか
    pub should_quit: bool,
}

impl CommandResult {
    /// 成功結果を作成
    pub fn success() -> Self {
        Self {
            success: true,
            notice: None,
            needs_refresh: true,
            should_quit: false,
        }
    }

    /// メッセージ付き成功結果を作成
    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::Status(message.into())),
            ..Self::success()
        }
    }

    /// 画面更新なしの成功結果を作成
    pub fn success_no_refresh() -> Self {
        Self {
            needs_refresh: false,
            ..Self::success()
        }
    }

    /// 情報ダイアログを表示する結果を作成
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::Info {
                title: title.into(),
                body: body.into(),
            }),
            ..Self::success()
        }
    }

    /// 操作を受け付けなかった結果を作成（ステータス表示のみ）
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            notice: Some(Notice::Status(message.into())),
            needs_refresh: false,
            should_quit: false,
        }
    }

    /// エラー結果を作成
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            notice: Some(Notice::Error(message.into())),
            needs_refresh: true,
            should_quit: false,
        }
    }

    /// 終了結果を作成
    pub fn quit() -> Self {
        Self {
            success: true,
            notice: None,
            needs_refresh: false,
            should_quit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_command_ids_are_unique_and_resolvable() {
        let ids: HashSet<_> = Command::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), Command::ALL.len());

        for command in Command::ALL {
            assert_eq!(Command::from_string(command.id()), Some(command));
            assert!(!command.description().is_empty());
        }
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(Command::from_string("kill-buffer"), None);
    }

    #[test]
    fn test_result_constructors() {
        assert!(CommandResult::quit().should_quit);
        assert!(!CommandResult::error("x").success);
        assert_eq!(
            CommandResult::rejected("limit").notice,
            Some(Notice::Status("limit".to_string()))
        );
    }
}
