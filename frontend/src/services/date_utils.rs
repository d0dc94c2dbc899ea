use shared::{iso_date, month_name, MonthCursor};
use wasm_bindgen::JsValue;

/// Today's date as `YYYY-MM-DD`, using the browser clock's calendar fields
pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    iso_date(year, month, day)
}

/// The month to show when the popup opens
pub fn current_month_cursor() -> MonthCursor {
    let now = js_sys::Date::new_0();
    MonthCursor::new(now.get_full_year() as i32, now.get_month() + 1)
}

/// Check if a date string represents today
pub fn is_today(date_str: &str) -> bool {
    date_str == today_iso()
}

/// Meeting start time rendered in the viewer's locale, e.g. "2:00:00 PM".
/// Returns `None` when the timestamp is missing the pieces a `Date` needs.
pub fn format_start_time(rfc3339: &str) -> Option<String> {
    let parsed = js_sys::Date::new(&JsValue::from_str(rfc3339));
    if parsed.get_time().is_nan() {
        return None;
    }
    Some(parsed.to_locale_time_string("default").into())
}

/// Format a `YYYY-MM-DD` day for display, e.g. "March 15, 2024"
pub fn format_day_heading(date_str: &str) -> String {
    if let Some((year, month, day)) = parse_date_string(date_str) {
        format!("{} {}, {}", month_name(month), day, year)
    } else {
        date_str.to_string()
    }
}

/// Parse YYYY-MM-DD date string into components
pub fn parse_date_string(date_str: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let year = parts[0].parse::<u32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;

    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some((year, month, day))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_date_string() {
        assert_eq!(parse_date_string("2024-03-15"), Some((2024, 3, 15)));
        assert_eq!(parse_date_string("2024-13-01"), None);
        assert_eq!(parse_date_string("2024-03"), None);
        assert_eq!(parse_date_string("not-a-date"), None);
    }

    #[wasm_bindgen_test]
    fn test_format_day_heading() {
        assert_eq!(format_day_heading("2024-03-15"), "March 15, 2024");
        assert_eq!(format_day_heading("garbage"), "garbage");
    }

    #[wasm_bindgen_test]
    fn test_format_start_time_invalid_input() {
        assert_eq!(format_start_time("not a timestamp"), None);
        assert!(format_start_time("2024-03-15T14:00:00Z").is_some());
    }
}
