use chrono::Duration;

/// Remaining time to a target, decomposed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Decompose a remaining duration into days/hours/minutes/seconds.
///
/// Negative durations clamp to zero before decomposition.
pub fn split_remaining(remaining: Duration) -> CountdownParts {
    let total = remaining.num_seconds().max(0);

    CountdownParts {
        days: total / 86_400,
        hours: (total % 86_400) / 3_600,
        minutes: (total % 3_600) / 60,
        seconds: total % 60,
    }
}

/// Format countdown parts as `D hari · HH:MM:SS`, omitting the day segment
/// when it is zero.
pub fn countdown_label(parts: &CountdownParts) -> String {
    let clock = format!("{:02}:{:02}:{:02}", parts.hours, parts.minutes, parts.seconds);
    if parts.days > 0 {
        format!("{} hari · {}", parts.days, clock)
    } else {
        clock
    }
}
