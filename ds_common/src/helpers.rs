use std::{env, str::FromStr, time::Duration};

/// Reads `name` from the environment and parses it. Returns `None` when the variable is missing, or the parse error
/// message when it is present but invalid, so that callers can log and fall back to a default.
pub fn env_value<T: FromStr>(name: &str) -> Option<Result<T, String>>
where T::Err: std::fmt::Display {
    env::var(name).ok().map(|s| s.trim().parse::<T>().map_err(|e| format!("'{s}' is not valid for {name}. {e}")))
}

/// Reads a duration expressed in milliseconds from the environment.
pub fn env_millis(name: &str) -> Option<Result<Duration, String>> {
    env_value::<u64>(name).map(|r| r.map(Duration::from_millis))
}
