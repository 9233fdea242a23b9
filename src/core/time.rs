use time::{macros::format_description, Date, Time};

/// Parses a `YYYY-MM-DD` exam date.
pub(crate) fn parse_exam_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Parses an `HH:MM` clock time.
pub(crate) fn parse_clock(raw: &str) -> Option<Time> {
    Time::parse(raw.trim(), format_description!("[hour]:[minute]")).ok()
}

pub(crate) fn format_exam_date(value: Date) -> String {
    value
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| value.to_string())
}

pub(crate) fn format_clock(value: Time) -> String {
    value.format(format_description!("[hour]:[minute]")).unwrap_or_else(|_| value.to_string())
}

/// Servers often return the exam date as a full timestamp; the form only keeps the day.
pub(crate) fn date_part(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}
