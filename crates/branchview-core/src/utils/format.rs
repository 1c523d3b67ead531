/// Check whether `haystack` contains `needle_lower`, ignoring case.
/// The needle should already be lowercased.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle_lower)
}

/// Format a phone number for display
/// Norwegian 8-digit numbers become "12 34 56 78", with "+47 " kept if present
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let grouped = |d: &str| {
        format!("{} {} {} {}", &d[0..2], &d[2..4], &d[4..6], &d[6..8])
    };

    match digits.len() {
        8 => grouped(&digits),
        10 if digits.starts_with("47") => format!("+47 {}", grouped(&digits[2..])),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try to parse ISO format and convert to readable
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%d.%m.%Y").to_string()
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d") {
        d.format("%d.%m.%Y").to_string()
    } else {
        date.to_string()
    }
}
