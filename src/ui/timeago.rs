use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Coarse relative age of an RFC 3339 timestamp, e.g. `5m ago`.
pub fn time_ago(timestamp: &str, now: OffsetDateTime) -> Option<String> {
    let then = OffsetDateTime::parse(timestamp.trim(), &Rfc3339).ok()?;
    let seconds = (now - then).whole_seconds();
    let label = match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    };
    Some(label)
}
