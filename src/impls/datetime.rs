use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::error::MapError;
use crate::reflection::{FromPlain, Mapped, MappedRef};
use crate::value::PlainValue;

// The inverse of the export formats: ISO-8601 with an explicit offset, or
// the offsetless `Y-m-d H:M:S` form read as UTC.
const UTC_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, UTC_FORMAT) {
        return Some(parsed.and_utc().fixed_offset());
    }
    None
}

impl Mapped for DateTime<FixedOffset> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Date(*self)
    }
}

impl FromPlain for DateTime<FixedOffset> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value.as_str().and_then(parse_datetime) {
            Some(parsed) => Ok(parsed),
            None => Err(MapError::invalid_cast(
                value,
                "chrono::DateTime<chrono::FixedOffset>",
            )),
        }
    }
}

impl Mapped for DateTime<Utc> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Date(self.fixed_offset())
    }
}

impl FromPlain for DateTime<Utc> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value.as_str().and_then(parse_datetime) {
            Some(parsed) => Ok(parsed.with_timezone(&Utc)),
            None => Err(MapError::invalid_cast(
                value,
                "chrono::DateTime<chrono::Utc>",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_offset_form() {
        let parsed =
            DateTime::<FixedOffset>::from_plain(PlainValue::from("2000-01-01T00:00:00-02:00"))
                .unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), -2 * 3600);
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn parses_offsetless_form_as_utc() {
        let parsed =
            DateTime::<Utc>::from_plain(PlainValue::from("2000-01-01 00:00:00")).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_non_date_input() {
        assert!(DateTime::<Utc>::from_plain(PlainValue::from("not a date")).is_err());
        assert!(DateTime::<Utc>::from_plain(PlainValue::Int(0)).is_err());
    }
}
