//! 日付・時刻の挿入テキスト

use crate::error::{NoteError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// 既定の日付書式（`yyyy MM/dd`）
pub const DEFAULT_DATE_FORMAT: &str = "%Y %m/%d";

/// 既定の時刻書式（`HH:mm:ss`）
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// 挿入する種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    Date,
    Time,
}

/// 書式に従って日時を文字列化
///
/// タイムゾーン（`%z` など）はローカル日時から描画できないためエラー
pub fn format_stamp(moment: NaiveDateTime, format: &str) -> Result<String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(unrenderable(format));
    }
    let mut stamp = String::new();
    write!(&mut stamp, "{}", moment.format(format)).map_err(|_| unrenderable(format))?;
    Ok(stamp)
}

/// 書式として使えるか（実際に一度描画して確かめる）
pub fn is_valid_format(format: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2000, 1, 1).and_then(|date| date.and_hms_opt(0, 0, 0))
    else {
        return false;
    };
    !format.is_empty() && format_stamp(sample, format).is_ok()
}

fn unrenderable(format: &str) -> NoteError {
    NoteError::Application(format!("日時の書式を解釈できません: {}", format))
}
