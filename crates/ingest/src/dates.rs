use chrono::NaiveDateTime;

/// Layout of the export's timestamps once month names are in English, e.g. `01-Jan-24 10:00`.
pub const TIMESTAMP_FORMAT: &str = "%d-%b-%y %H:%M";

/// Portuguese month abbreviations and their English replacements.
///
/// Applied in this order as plain substring replacements over the lowercased
/// field, so a pattern also fires inside longer words (`outono` becomes `Octono`).
pub const MONTH_TRANSLATIONS: [(&str, &str); 12] = [
    ("jan", "Jan"),
    ("fev", "Feb"),
    ("mar", "Mar"),
    ("abr", "Apr"),
    ("mai", "May"),
    ("jun", "Jun"),
    ("jul", "Jul"),
    ("ago", "Aug"),
    ("set", "Sep"),
    ("out", "Oct"),
    ("nov", "Nov"),
    ("dez", "Dec"),
];

/// Lowercases `raw` and rewrites every Portuguese month abbreviation to English.
pub fn translate_months(raw: &str) -> String {
    MONTH_TRANSLATIONS
        .iter()
        .fold(raw.to_lowercase(), |text, (from, to)| text.replace(from, to))
}

/// Parses a timestamp field of the export. Returns `None` when the field does
/// not follow [`TIMESTAMP_FORMAT`] after month translation.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&translate_months(raw), TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn portuguese_months_are_translated() {
        assert_eq!(translate_months("05-Fev-24 21:30"), "05-Feb-24 21:30");
        assert_eq!(translate_months("12-DEZ-23 08:00"), "12-Dec-23 08:00");
    }

    #[test]
    fn replacement_is_not_token_aware() {
        assert_eq!(translate_months("outono"), "Octono");
        assert_eq!(translate_months("setembro"), "Sepembro");
    }

    #[test]
    fn parses_every_translated_month() {
        let months = [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ];
        for (i, month) in months.iter().enumerate() {
            let raw = format!("15-{month}-24 13:45");
            assert_eq!(
                parse_timestamp(&raw),
                Some(at(2024, i as u32 + 1, 15, 13, 45)),
                "failed for {raw}"
            );
        }
    }

    #[test]
    fn english_abbreviations_still_parse() {
        assert_eq!(parse_timestamp("01-Jan-24 10:00"), Some(at(2024, 1, 1, 10, 0)));
        assert_eq!(parse_timestamp("02-Oct-24 23:59"), Some(at(2024, 10, 2, 23, 59)));
    }

    #[test]
    fn malformed_timestamps_are_rejected() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("nan"), None);
        assert_eq!(parse_timestamp("2024-01-01 10:00"), None);
        assert_eq!(parse_timestamp("32-jan-24 10:00"), None);
        assert_eq!(parse_timestamp("01-jan-24 25:00"), None);
    }
}
