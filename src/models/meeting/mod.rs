pub mod classify;
pub mod types;

pub use classify::{
    group_by_day, split_meetings, to_calendar_events, CalendarEvent, MeetingBuckets, Scheduled,
    CALENDAR_EVENT_TITLE,
};
pub use types::*;
