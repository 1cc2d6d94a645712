//! 时间工具函数
//!
//! 排序统一使用 Unix millis；时间戳字符串 → `i64` 的转换只在
//! 这里完成，解析失败一律按 0（最旧）处理。

use chrono::{DateTime, NaiveDateTime};

/// RFC 3339 时间戳 → Unix millis，解析失败返回 0
///
/// 远程存储返回带时区的 RFC 3339；无时区的裸时间戳按 UTC 处理。
pub fn epoch_millis(timestamp: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.timestamp_millis();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc().timestamp_millis();
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339() {
        assert_eq!(epoch_millis("1970-01-01T00:00:01+00:00"), 1000);
    }

    #[test]
    fn parses_naive_as_utc() {
        assert_eq!(epoch_millis("1970-01-01T00:00:01"), 1000);
        assert_eq!(epoch_millis("1970-01-01T00:00:01.500"), 1500);
    }

    #[test]
    fn unparseable_is_oldest() {
        assert_eq!(epoch_millis("not a date"), 0);
        assert_eq!(epoch_millis(""), 0);
    }
}
