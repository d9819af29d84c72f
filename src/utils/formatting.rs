//! Text formatting utilities for announcements and tool output.

/// Formats a count with thousands separators for readability.
///
/// # Examples
/// ```
/// use treecombo::utils::format_count;
///
/// assert_eq!(format_count(1000), "1,000");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(count: usize) -> String {
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let len = s.len();
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Formats the live-region announcement for a result count.
///
/// # Examples
/// ```
/// use treecombo::utils::format_result_count;
///
/// assert_eq!(format_result_count(1), "1 result available.");
/// assert_eq!(format_result_count(0), "0 results available.");
/// ```
pub fn format_result_count(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} result{plural} available.")
}
