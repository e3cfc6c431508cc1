/// Meeting handlers for the signed-in user.
///
/// - `list.rs`: GET the three-bucket meeting list
/// - `create.rs`: GET/POST the new meeting form
/// - `read.rs`: GET meeting detail
/// - `update.rs`: POST agendas, minutes, attachments and action items
/// - `calendar.rs`: GET the month calendar and its events feed
/// - `forms.rs`: form structures shared across handlers
pub mod calendar;
pub mod create;
pub mod forms;
pub mod list;
pub mod read;
pub mod update;

pub use calendar::{calendar, calendar_events};
pub use create::{create, new_form};
pub use list::list;
pub use read::detail;
pub use update::{add_action_item, save_agendas, save_minutes, upload_attachment};
