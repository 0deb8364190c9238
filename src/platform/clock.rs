//! 時計

use chrono::{Local, NaiveDateTime};

/// 現在時刻の取得元
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// ローカルタイムゾーンの現在時刻
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 固定時刻（テスト向け）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
