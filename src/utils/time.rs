//! 时间工具
//!
//! 两种存储实现都只保留毫秒精度，关系型存储以 epoch 毫秒落库。

use chrono::{DateTime, TimeZone, Utc};

/// 截断到毫秒
pub fn truncate_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    from_millis(t.timestamp_millis())
}

/// 当前时间（毫秒精度）
pub fn now_millis() -> DateTime<Utc> {
    truncate_millis(Utc::now())
}

pub fn to_millis(t: DateTime<Utc>) -> i64 {
    t.timestamp_millis()
}

pub fn from_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_drops_sub_millis() {
        let t = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let truncated = truncate_millis(t);
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(from_millis(to_millis(truncated)), truncated);
    }
}
