use askama::Template;

use super::PageContext;
use crate::models::meeting::Meeting;
use crate::models::minutes::ActionItem;
use crate::models::room::Room;
use crate::models::user::User;

#[derive(Template)]
#[template(path = "meetings/list.html")]
pub struct MeetingsListTemplate {
    pub ctx: PageContext,
    pub ongoing: Vec<Meeting>,
    pub upcoming: Vec<Meeting>,
    pub previous: Vec<Meeting>,
}

/// Values echoed back into the new-meeting form.
#[derive(Debug, Default)]
pub struct MeetingFormValues {
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub ends_at: String,
    pub room_id: Option<i64>,
    /// One agenda per line.
    pub agendas: String,
    pub attendees: Vec<i64>,
}

impl MeetingFormValues {
    pub fn is_room(&self, id: i64) -> bool {
        self.room_id == Some(id)
    }

    pub fn has_attendee(&self, id: i64) -> bool {
        self.attendees.contains(&id)
    }
}

#[derive(Template)]
#[template(path = "meetings/form.html")]
pub struct MeetingFormTemplate {
    pub ctx: PageContext,
    pub values: MeetingFormValues,
    pub rooms: Vec<Room>,
    pub users: Vec<User>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "meetings/detail.html")]
pub struct MeetingDetailTemplate {
    pub ctx: PageContext,
    pub meeting: Meeting,
    /// `min` for the action item due date input.
    pub today: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "meetings/calendar.html")]
pub struct CalendarTemplate {
    pub ctx: PageContext,
    /// `[{ id, title, start, end }]` for the month grid.
    pub events_json: String,
    /// Meeting details keyed by id, shown when an event is clicked.
    pub details_json: String,
}

#[derive(Template)]
#[template(path = "action_items/list.html")]
pub struct ActionItemsTemplate {
    pub ctx: PageContext,
    pub items: Vec<ActionItem>,
}
