use chrono::NaiveDate;

/// "HH:MM" from a minute-of-day (0..=1439).
pub fn format_time_of_day(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// "DD-Mon-YYYY", e.g. "05-Jan-2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// "Xh Ym", e.g. "2h 35m". Durations under an hour drop the hour part.
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// Fare with thousands grouping, e.g. 1234567.5 -> "1,234,567.50".
/// Whole amounts render without a fractional part.
pub fn format_fare(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let mut whole = amount.trunc() as u64;
    let mut cents = ((amount - amount.trunc()) * 100.0).round() as u64;
    if cents == 100 {
        whole += 1;
        cents = 0;
    }

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        out.push_str(&format!(".{:02}", cents));
    }
    out
}
