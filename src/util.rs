use time::Date;
use time::macros::format_description;

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn format_journal_date(raw: &str) -> String {
    let input = format_description!("[year]-[month]-[day]");
    let output = format_description!("[month repr:short] [day padding:none], [year]");

    let trimmed = raw.trim();
    trimmed
        .get(..10)
        .and_then(|day| Date::parse(day, input).ok())
        .and_then(|date| date.format(output).ok())
        .unwrap_or_else(|| trimmed.to_string())
}
