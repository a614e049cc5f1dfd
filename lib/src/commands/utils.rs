use chrono::{DateTime, Duration, DurationRound, Utc};
use anyhow::anyhow;

/// Start of every one-minute slot of the `minutes` whole minutes that end one minute
/// before `current_time`, oldest first.
pub fn history_request_dates(current_time : &DateTime<Utc>, minutes : u32) -> anyhow::Result<Vec<DateTime<Utc>>> {
    let last_minute = (*current_time - Duration::minutes(1))
        .duration_trunc(Duration::minutes(1))
        .map_err(|err| anyhow!("Could not truncate {} to the minute: {}", current_time, err))?;
    let first_minute = last_minute - Duration::minutes(minutes as i64 - 1);

    Ok((0..minutes as i64).map(|i| first_minute + Duration::minutes(i)).collect())
}
