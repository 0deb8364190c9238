//! ロギングシステム
//!
//! `log` ファサードの出力先となるロガー。
//! TUI 実行中は端末に書き込めないため、ログはファイルへ追記する。

use crate::error::{NoteError, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// ファイル出力ロガー
#[derive(Debug, Clone)]
pub struct FileLogger {
    level: LevelFilter,
    output_file: Option<PathBuf>,
}

impl FileLogger {
    /// デフォルト構築（出力先なし）
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_file: None,
        }
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// ファイル出力先
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    fn should_log(&self, level: log::Level) -> bool {
        level <= self.level
    }

    fn format_record(record: &Record<'_>) -> String {
        format!(
            "{}: {} in {}",
            record.level(),
            record.args(),
            record.module_path().unwrap_or("unknown")
        )
    }

    fn write_line(&self, message: &str) {
        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.should_log(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.write_line(&Self::format_record(record));
        }
    }

    fn flush(&self) {}
}

/// グローバルロガーとして登録する
///
/// 出力先が一つもない場合はレベルを `Off` にする
pub fn init(logger: FileLogger) -> Result<()> {
    if let Some(path) = logger.output_file() {
        ensure_parent_dir(path)?;
    }

    let level = if logger.output_file.is_none() {
        LevelFilter::Off
    } else {
        logger.level
    };

    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| NoteError::Application(format!("logger init: {}", err)))?;
    log::set_max_level(level);
    Ok(())
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
