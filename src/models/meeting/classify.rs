//! Time-relative classification of meetings and calendar projection.
//!
//! Everything here is pure: callers pass `now` explicitly so the same input
//! always yields the same buckets.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::types::Meeting;

/// Anything with a start and end time that can be bucketed.
pub trait Scheduled {
    fn starts_at(&self) -> NaiveDateTime;
    fn ends_at(&self) -> NaiveDateTime;
}

impl Scheduled for Meeting {
    fn starts_at(&self) -> NaiveDateTime {
        self.starts_at
    }

    fn ends_at(&self) -> NaiveDateTime {
        self.ends_at
    }
}

impl<T: Scheduled> Scheduled for &T {
    fn starts_at(&self) -> NaiveDateTime {
        (*self).starts_at()
    }

    fn ends_at(&self) -> NaiveDateTime {
        (*self).ends_at()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeetingBuckets<T> {
    /// `starts_at <= now <= ends_at`, ascending by start.
    pub ongoing: Vec<T>,
    /// `starts_at > now`, ascending by start.
    pub upcoming: Vec<T>,
    /// Everything else, most recent start first.
    pub previous: Vec<T>,
}

impl<T> Default for MeetingBuckets<T> {
    fn default() -> Self {
        Self { ongoing: Vec::new(), upcoming: Vec::new(), previous: Vec::new() }
    }
}

impl<T> MeetingBuckets<T> {
    pub fn len(&self) -> usize {
        self.ongoing.len() + self.upcoming.len() + self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `meetings` into ongoing, upcoming and previous relative to `now`.
///
/// The ongoing window is inclusive on both ends, so a meeting starting
/// exactly at `now` is ongoing rather than upcoming. `starts_at <= ends_at` is
/// not checked; inverted ranges simply fall through to upcoming or previous.
pub fn split_meetings<T: Scheduled>(meetings: Vec<T>, now: NaiveDateTime) -> MeetingBuckets<T> {
    let mut buckets = MeetingBuckets::default();

    for m in meetings {
        let (start, end) = (m.starts_at(), m.ends_at());
        if start <= now && now <= end {
            buckets.ongoing.push(m);
        } else if start > now {
            buckets.upcoming.push(m);
        } else {
            buckets.previous.push(m);
        }
    }

    // sort_by is stable, equal starts keep their input order
    buckets.ongoing.sort_by_key(|m| m.starts_at());
    buckets.upcoming.sort_by_key(|m| m.starts_at());
    buckets.previous.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));

    buckets
}

/// Title shown on every calendar event, independent of the meeting's title.
pub const CALENDAR_EVENT_TITLE: &str = "Meeting";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: &'static str,
    #[serde(with = "crate::models::timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "crate::models::timestamp")]
    pub end: NaiveDateTime,
}

pub fn to_calendar_events(meetings: &[Meeting]) -> Vec<CalendarEvent> {
    meetings
        .iter()
        .map(|m| CalendarEvent {
            id: m.id,
            title: CALENDAR_EVENT_TITLE,
            start: m.starts_at,
            end: m.ends_at,
        })
        .collect()
}

/// Group meetings by the calendar day they start on.
///
/// Days appear in first-seen order and meetings keep their input order
/// within a day.
pub fn group_by_day<T: Scheduled>(meetings: Vec<T>) -> Vec<(NaiveDate, Vec<T>)> {
    let mut groups: Vec<(NaiveDate, Vec<T>)> = Vec::new();
    for m in meetings {
        let day = m.starts_at().date();
        match groups.iter_mut().find(|(d, _)| *d == day) {
            Some((_, items)) => items.push(m),
            None => groups.push((day, vec![m])),
        }
    }
    groups
}
