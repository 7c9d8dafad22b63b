use chrono::{DateTime, FixedOffset, Offset, Utc};

/// UTC+8, the offset all user-facing timestamps are rendered in
const BEIJING_OFFSET_SECS: i32 = 8 * 60 * 60;

pub fn beijing_offset() -> FixedOffset {
    FixedOffset::east_opt(BEIJING_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub fn beijing_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&beijing_offset())
}
