pub mod meeting;
pub mod minutes;
pub mod nav_item;
pub mod role;
pub mod room;
pub mod timestamp;
pub mod user;
