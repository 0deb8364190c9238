//! 設定とコマンドライン引数
//!
//! 設定ファイル（JSON）は `<config_dir>/note/config.json` から読み込む。
//! 全項目に既定値があり、ファイルが無ければ既定値のまま起動する。

use crate::editor::stamp::{is_valid_format, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use crate::editor::FontSpec;
use crate::error::{ConfigError, NoteError, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 文字数上限の既定値
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// エディタ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 改行を除いた文字数の上限
    pub max_chars: usize,
    /// 日付挿入の書式（strftime）
    pub date_format: String,
    /// 時刻挿入の書式（strftime）
    pub time_format: String,
    /// 起動時のフォント
    pub font: FontSpec,
    /// ログレベル（off / error / warn / info / debug / trace）
    pub log_level: String,
    /// ログ出力先（未指定時はログを書かない）
    pub log_file: Option<PathBuf>,
    /// OS のクリップボードを使うか
    pub system_clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            font: FontSpec::default(),
            log_level: "info".to_string(),
            log_file: None,
            system_clipboard: true,
        }
    }
}

impl Config {
    /// 指定ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&content).map_err(|err| ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 既定の場所から読み込む（ファイルが無ければ既定値）
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// 値の整合性を検査
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(invalid_value("max_chars", &self.max_chars.to_string()));
        }
        if !is_valid_format(&self.date_format) {
            return Err(invalid_value("date_format", &self.date_format));
        }
        if !is_valid_format(&self.time_format) {
            return Err(invalid_value("time_format", &self.time_format));
        }
        self.log_level_filter()?;
        Ok(())
    }

    /// ログレベルを解釈
    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| invalid_value("log_level", &self.log_level))
    }

    /// コマンドライン指定で上書きした設定を返す
    pub fn merged_with(&self, options: &CliOptions) -> Config {
        let mut merged = self.clone();
        if let Some(path) = &options.debug_log {
            merged.log_file = Some(path.clone());
            merged.log_level = "debug".to_string();
        }
        merged
    }
}

fn invalid_value(key: &str, value: &str) -> NoteError {
    NoteError::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// 既定の設定ファイルパス
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("note").join("config.json"))
}

/// コマンドライン引数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    /// 起動時に開くファイル
    pub initial_file: Option<PathBuf>,
    /// 設定ファイルの明示指定
    pub config_path: Option<PathBuf>,
    /// デバッグログの出力先
    pub debug_log: Option<PathBuf>,
    pub show_help: bool,
    pub show_version: bool,
}

impl CliOptions {
    /// 引数（プログラム名を除く）を解釈
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => options.show_help = true,
                "-V" | "--version" => options.show_version = true,
                "--config" => {
                    let value = iter.next().ok_or_else(|| missing_value(arg))?;
                    options.config_path = Some(PathBuf::from(value));
                }
                "--debug-log" => {
                    let value = iter.next().ok_or_else(|| missing_value(arg))?;
                    options.debug_log = Some(PathBuf::from(value));
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(NoteError::Config(ConfigError::InvalidArgument {
                        arg: flag.to_string(),
                    }));
                }
                path => {
                    if options.initial_file.is_some() {
                        return Err(NoteError::Config(ConfigError::InvalidArgument {
                            arg: path.to_string(),
                        }));
                    }
                    options.initial_file = Some(PathBuf::from(path));
                }
            }
        }

        Ok(options)
    }

    /// 設定を読み込む（明示指定があればそれを優先）
    pub fn load_config(&self) -> Result<Config> {
        let base = match &self.config_path {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };
        Ok(base.merged_with(self))
    }
}

fn missing_value(flag: &str) -> NoteError {
    NoteError::Config(ConfigError::InvalidArgument {
        arg: format!("{} requires a value", flag),
    })
}

/// `--help` の表示内容
pub const USAGE: &str = "\
usage: note [PATH] [--config FILE] [--debug-log FILE]

  PATH               起動時に開くテキストファイル
  --config FILE      設定ファイル（JSON）を指定
  --debug-log FILE   デバッグログをファイルへ出力
  -V, --version      バージョンを表示
  -h, --help         このヘルプを表示";

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_chars, 100_000);
        assert_eq!(config.date_format, "%Y %m/%d");
        assert_eq!(config.time_format, "%H:%M:%S");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "max_chars": 500, "font": { "family": "Consolas" } }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.max_chars, 500);
        assert_eq!(config.font.family, "Consolas");
        assert_eq!(config.font.size, 12);
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        match Config::load(&path) {
            Err(NoteError::Config(ConfigError::InvalidFile { path: reported, .. })) => {
                assert!(reported.ends_with("broken.json"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.max_chars = 0;
        assert!(config.validate().is_err());

        // 解釈はできてもローカル日時では描画できない書式
        let mut config = Config::default();
        config.date_format = "%Y %z".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_cli_arguments() {
        let options =
            CliOptions::parse(&args(&["memo.txt", "--debug-log", "/tmp/note.log"])).unwrap();
        assert_eq!(options.initial_file, Some(PathBuf::from("memo.txt")));
        assert_eq!(options.debug_log, Some(PathBuf::from("/tmp/note.log")));

        let merged = Config::default().merged_with(&options);
        assert_eq!(merged.log_file, Some(PathBuf::from("/tmp/note.log")));
        assert_eq!(merged.log_level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_cli_errors() {
        assert!(CliOptions::parse(&args(&["--config"])).is_err());
        assert!(CliOptions::parse(&args(&["--unknown"])).is_err());
        assert!(CliOptions::parse(&args(&["a.txt", "b.txt"])).is_err());
    }
}
