use serde_json::Value;

/// Format a duration in minutes for display.
///
/// `45` → `"45 min"`, `60` → `"1 hr"`, `90` → `"1 hr 30 min"`.
/// Negative input is a caller error and is clamped to `0` rather than
/// rejected, so it renders as `"0 min"`.
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{} hr {} min", hours, mins)
    } else {
        format!("{} hr", hours)
    }
}

/// Read a minute count from a loosely typed JSON value.
///
/// Integers are taken as-is, floats are truncated and numeric strings are
/// parsed. Missing, negative or non-numeric values count as `0`.
pub fn parse_minutes(value: &Value) -> u32 {
    let minutes = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    };

    u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)
}
