use chrono::Utc;

/// Unix seconds. Record timestamps, token claims and metrics uptime all
/// read this clock.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}
