//! Playtime Manager.
//!
//! Accumulates time spent per [`Activity`] in SQLite. One activity runs at a
//! time; switching activity (or reading the counters) first books the time
//! elapsed since the running one started. Idle time is never booked.
//!
//! Every operation takes the current time in milliseconds since the epoch;
//! callers outside tests pass [`now_ms`].

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::PlaytimeError;
use crate::types::playtime::{Activity, Breakdown, PlaytimeStats};

/// Wall-clock milliseconds since the UNIX epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Human-readable duration. Negative input counts as zero.
///
/// Short form (`"2h 5m"`, `"3d 4h"`, `"45s"`) is for the navbar badge; the long
/// form (`"2 hours 5m"`, `"1 minute"`, `"0 seconds"`) for the stats panel.
pub fn format_time(ms: i64, short: bool) -> String {
    let seconds = ms.max(0) / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let plural = |n: i64| if n > 1 { "s" } else { "" };

    if short {
        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", seconds)
        }
    } else if days > 0 {
        format!("{} day{} {}h {}m", days, plural(days), hours % 24, minutes % 60)
    } else if hours > 0 {
        format!("{} hour{} {}m", hours, plural(hours), minutes % 60)
    } else if minutes > 0 {
        format!("{} minute{}", minutes, plural(minutes))
    } else {
        let unit = if seconds == 1 { "second" } else { "seconds" };
        format!("{} {}", seconds, unit)
    }
}

/// Trait defining playtime operations.
pub trait PlaytimeManagerTrait {
    /// Counts a new session and resets the running activity to idle.
    fn start_session(&mut self, now_ms: i64) -> Result<i64, PlaytimeError>;
    fn track_activity(&mut self, activity: Activity, now_ms: i64) -> Result<(), PlaytimeError>;
    fn current_activity(&self) -> Result<Activity, PlaytimeError>;
    /// Books the time elapsed in the running activity.
    fn flush(&mut self, now_ms: i64) -> Result<(), PlaytimeError>;
    fn total(&mut self, now_ms: i64) -> Result<i64, PlaytimeError>;
    fn breakdown(&mut self, now_ms: i64) -> Result<Breakdown, PlaytimeError>;
    fn stats(&mut self, now_ms: i64) -> Result<PlaytimeStats, PlaytimeError>;
}

/// Playtime manager backed by a SQLite connection.
pub struct PlaytimeManager<'a> {
    conn: &'a Connection,
}

impl<'a> PlaytimeManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn running(&self) -> Result<(Activity, i64), PlaytimeError> {
        let (name, start): (String, i64) = self.conn.query_row(
            "SELECT activity, activity_start FROM playtime WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok((Activity::from_name(&name), start))
    }

    fn read_breakdown(&self) -> Result<Breakdown, PlaytimeError> {
        let mut stmt = self
            .conn
            .prepare("SELECT activity, ms FROM playtime_breakdown")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut breakdown = Breakdown::default();
        for row in rows {
            let (name, ms) = row?;
            breakdown.set(Activity::from_name(&name), ms);
        }
        Ok(breakdown)
    }
}

impl<'a> PlaytimeManagerTrait for PlaytimeManager<'a> {
    fn start_session(&mut self, now_ms: i64) -> Result<i64, PlaytimeError> {
        self.conn.execute(
            "UPDATE playtime SET sessions = sessions + 1, activity = 'idle', activity_start = ?1 WHERE id = 1",
            params![now_ms],
        )?;
        let sessions: i64 =
            self.conn
                .query_row("SELECT sessions FROM playtime WHERE id = 1", [], |row| row.get(0))?;
        log::info!("[PLAYTIME] session {} started", sessions);
        Ok(sessions)
    }

    /// Switches the running activity. Re-tracking the running one is a no-op,
    /// so its start time is kept.
    fn track_activity(&mut self, activity: Activity, now_ms: i64) -> Result<(), PlaytimeError> {
        if self.current_activity()? == activity {
            return Ok(());
        }
        self.flush(now_ms)?;
        self.conn.execute(
            "UPDATE playtime SET activity = ?1, activity_start = ?2 WHERE id = 1",
            params![activity.as_str(), now_ms],
        )?;
        log::debug!("[PLAYTIME] now {}", activity);
        Ok(())
    }

    fn current_activity(&self) -> Result<Activity, PlaytimeError> {
        Ok(self.running()?.0)
    }

    /// A clock that went backwards books nothing.
    fn flush(&mut self, now_ms: i64) -> Result<(), PlaytimeError> {
        let (activity, start) = self.running()?;
        let elapsed = (now_ms - start).max(0);

        let tx = self.conn.unchecked_transaction()?;
        if activity != Activity::Idle && elapsed > 0 {
            tx.execute(
                "UPDATE playtime_breakdown SET ms = ms + ?1 WHERE activity = ?2",
                params![elapsed, activity.as_str()],
            )?;
            tx.execute(
                "UPDATE playtime SET total_ms = total_ms + ?1 WHERE id = 1",
                params![elapsed],
            )?;
        }
        tx.execute(
            "UPDATE playtime SET activity_start = ?1 WHERE id = 1",
            params![now_ms],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn total(&mut self, now_ms: i64) -> Result<i64, PlaytimeError> {
        self.flush(now_ms)?;
        Ok(self
            .conn
            .query_row("SELECT total_ms FROM playtime WHERE id = 1", [], |row| row.get(0))?)
    }

    fn breakdown(&mut self, now_ms: i64) -> Result<Breakdown, PlaytimeError> {
        self.flush(now_ms)?;
        self.read_breakdown()
    }

    fn stats(&mut self, now_ms: i64) -> Result<PlaytimeStats, PlaytimeError> {
        self.flush(now_ms)?;
        let (total_ms, sessions, first_visit): (i64, i64, String) = self.conn.query_row(
            "SELECT total_ms, sessions, first_visit FROM playtime WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(PlaytimeStats {
            total_ms,
            sessions,
            first_visit,
            breakdown: self.read_breakdown()?,
        })
    }
}
