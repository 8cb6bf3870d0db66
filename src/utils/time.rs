// Formato de fechas para la lista de actividad reciente

use chrono::{DateTime, Local, Utc};

/// Distancia legible entre `timestamp` y `now` con sufijo ("5 minutes ago", "in 2 hours")
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(timestamp);
    let future = delta.num_seconds() < 0;
    let seconds = delta.num_seconds().unsigned_abs();
    let minutes = (seconds as f64 / 60.0).round() as u64;

    let distance = if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < 24 * 60 {
        format!("about {} hours", (minutes as f64 / 60.0).round() as u64)
    } else if minutes < 42 * 60 {
        "1 day".to_string()
    } else if minutes < 30 * 24 * 60 {
        format!("{} days", (minutes as f64 / (24.0 * 60.0)).round() as u64)
    } else if minutes < 45 * 24 * 60 {
        "about 1 month".to_string()
    } else if minutes < 365 * 24 * 60 {
        format!("{} months", (minutes as f64 / (30.0 * 24.0 * 60.0)).round() as u64)
    } else {
        let years = (minutes as f64 / (365.0 * 24.0 * 60.0)).floor() as u64;
        if years <= 1 {
            "about 1 year".to_string()
        } else {
            format!("about {} years", years)
        }
    };

    if future {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

/// Fecha y hora local completa (equivalente a toLocaleString)
pub fn format_local(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn relative_past() {
        let now = now();
        assert_eq!(format_relative(now - Duration::seconds(10), now), "less than a minute ago");
        assert_eq!(format_relative(now - Duration::seconds(70), now), "1 minute ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::minutes(60), now), "about 1 hour ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "about 3 hours ago");
        assert_eq!(format_relative(now - Duration::hours(30), now), "1 day ago");
        assert_eq!(format_relative(now - Duration::days(4), now), "4 days ago");
        assert_eq!(format_relative(now - Duration::days(400), now), "about 1 year ago");
    }

    #[test]
    fn relative_future_uses_in_prefix() {
        let now = now();
        assert_eq!(format_relative(now + Duration::hours(2), now), "in about 2 hours");
    }
}
