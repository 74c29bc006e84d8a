use chrono::{DateTime, FixedOffset};

use crate::info::Backing;
use crate::reflection::EnumMapped;
use crate::value::PlainValue;

/// Exports an enum case: the backing value for backed enums, the symbolic
/// case name otherwise.
pub fn enum_to_plain(value: &dyn EnumMapped) -> PlainValue {
    match value.backing() {
        Some(Backing::Int(backing)) => PlainValue::Int(backing),
        Some(Backing::Str(backing)) => PlainValue::Str(backing.to_owned()),
        None => PlainValue::Str(value.case_name().to_owned()),
    }
}

/// Formats a date/time instant for export.
///
/// Instants at offset zero format as `Y-m-d H:M:S` with no offset suffix;
/// any other offset formats as ISO-8601 with the offset. The dual rule is
/// load-bearing: consumers distinguish UTC timestamps by the absence of the
/// suffix.
pub fn format_datetime(value: DateTime<FixedOffset>) -> String {
    if value.offset().local_minus_utc() == 0 {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_formats_without_offset_suffix() {
        let utc = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
            .unwrap();
        assert_eq!(format_datetime(utc), "2000-01-01 00:00:00");
    }

    #[test]
    fn non_zero_offset_formats_as_iso8601() {
        let sao_paulo = FixedOffset::west_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
            .unwrap();
        assert_eq!(format_datetime(sao_paulo), "2000-01-01T00:00:00-02:00");
    }
}
