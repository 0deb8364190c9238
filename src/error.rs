//! エラーハンドリングシステム
//!
//! note エディタ全体で使用される統一されたエラー型とユーティリティを定義
//! ファイル操作の失敗はユーザー向けメッセージとして表示し、エディタは継続する

use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoteError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// クリップボードエラー
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// ダイアログエラー
    #[error("Dialog error: {0}")]
    Dialog(String),

    /// パスエラー
    #[error("Path error: {0}")]
    Path(String),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Is a directory: {path}")]
    IsDirectory { path: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス付きのファイルエラーへ変換
    pub fn from_io(error: &std::io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => FileError::NotFound { path },
            ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            ErrorKind::InvalidData => FileError::Encoding {
                message: error.to_string(),
            },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
    Fatal,
}

/// エラー表示情報
///
/// ユーザーに見せるメッセージボックスの文面を組み立てる
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
}

impl ErrorDisplay {
    pub fn new(error: &NoteError) -> Self {
        let (message, level) = Self::format_error(error);
        Self { message, level }
    }

    fn format_error(error: &NoteError) -> (String, ErrorLevel) {
        match error {
            NoteError::File(FileError::NotFound { path }) => {
                (format!("ファイルが見つかりません: {}", path), ErrorLevel::Error)
            }
            NoteError::File(FileError::PermissionDenied { path }) => {
                (format!("アクセス権限がありません: {}", path), ErrorLevel::Error)
            }
            NoteError::File(FileError::InvalidPath { path }) => {
                (format!("無効なパスです: {}", path), ErrorLevel::Error)
            }
            NoteError::File(FileError::IsDirectory { path }) => {
                (format!("ディレクトリは開けません: {}", path), ErrorLevel::Error)
            }
            NoteError::File(FileError::Encoding { message }) => {
                (format!("文字エンコーディングエラー: {}", message), ErrorLevel::Error)
            }
            NoteError::File(FileError::Io { message }) => {
                (format!("ファイル入出力エラー: {}", message), ErrorLevel::Error)
            }
            NoteError::Clipboard(message) => {
                (format!("クリップボードを利用できません: {}", message), ErrorLevel::Warning)
            }
            NoteError::Ui(UiError::TerminalInit { .. }) => {
                ("ターミナル初期化に失敗しました".to_string(), ErrorLevel::Fatal)
            }
            _ => (format!("エラーが発生しました: {}", error), ErrorLevel::Error),
        }
    }
}

/// パニックハンドラの設定
///
/// 端末を通常モードへ戻してからパニック情報を出力する
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableBracketedPaste,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        log::error!("PANIC at {}", location);

        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, NoteError>;

// std::io::Error から NoteError への変換（パス情報なし）
impl From<std::io::Error> for NoteError {
    fn from(error: std::io::Error) -> Self {
        NoteError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}
