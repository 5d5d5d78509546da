use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, macros::format_description};

/// Parses a calendar day in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> crate::Result<Date> {
    Ok(Date::parse(
        value.trim(),
        format_description!("[year]-[month]-[day]"),
    )?)
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn utc_offset(hours: i8) -> crate::Result<UtcOffset> {
    Ok(UtcOffset::from_hms(hours, 0, 0)?)
}

/// Unix timestamp of a wall-clock time on `date` in the given offset.
pub fn timestamp_at(date: Date, time: Time, offset: UtcOffset) -> i64 {
    PrimitiveDateTime::new(date, time)
        .assume_offset(offset)
        .unix_timestamp()
}

/// Half-open `[start, end)` unix range covering `date` in the given offset.
pub fn day_bounds(date: Date, offset: UtcOffset) -> (i64, i64) {
    let start = timestamp_at(date, Time::MIDNIGHT, offset);

    (start, start + 86_400)
}

/// Wall-clock time of a unix timestamp seen from the given offset.
pub fn time_of_day(timestamp: i64, offset: UtcOffset) -> crate::Result<Time> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?
        .to_offset(offset)
        .time())
}

pub fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
