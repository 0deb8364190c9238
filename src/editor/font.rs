//! フォント設定
//!
//! テキストエリアの描画属性（書体名・サイズ・太字・斜体）

use crate::error::{ConfigError, NoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// サイズの上限（ポイント）
const MAX_FONT_SIZE: u16 = 400;

/// フォント指定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size: 12,
            bold: false,
            italic: false,
        }
    }
}

impl FontSpec {
    /// `書体名 サイズ [bold] [italic]` 形式を解釈する
    ///
    /// 書体名は空白を含んでよい（例: `Noto Sans Mono 11 bold`）
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || {
            NoteError::Config(ConfigError::InvalidValue {
                key: "font".to_string(),
                value: input.to_string(),
            })
        };

        let mut tokens: Vec<&str> = input.split_whitespace().collect();
        let mut bold = false;
        let mut italic = false;

        while let Some(last) = tokens.last() {
            match last.to_ascii_lowercase().as_str() {
                "bold" | "太字" => bold = true,
                "italic" | "斜体" => italic = true,
                _ => break,
            }
            tokens.pop();
        }

        let size = tokens
            .pop()
            .and_then(|token| token.trim_end_matches("pt").parse::<u16>().ok())
            .filter(|size| (1..=MAX_FONT_SIZE).contains(size))
            .ok_or_else(invalid)?;

        if tokens.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            family: tokens.join(" "),
            size,
            bold,
            italic,
        })
    }

    /// ステータスバー表示用のラベル
    pub fn label(&self) -> String {
        let mut label = format!("{} {}pt", self.family, self.size);
        if self.bold {
            label.push_str(" 太字");
        }
        if self.italic {
            label.push_str(" 斜体");
        }
        label
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size)?;
        if self.bold {
            write!(f, " bold")?;
        }
        if self.italic {
            write!(f, " italic")?;
        }
        Ok(())
    }
}
