/// Admin user management.
///
/// - `list.rs`: GET filtered, paginated table
/// - `crud.rs`: create, edit, update and delete forms
/// - `helpers.rs`: form validation shared by create and update
pub mod crud;
pub mod helpers;
pub mod list;

pub use crud::{create, delete, edit_form, new_form, update};
pub use list::list;
