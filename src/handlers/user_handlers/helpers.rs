use crate::auth::validate;
use crate::models::user::UserForm;

/// Validate user form data (used in both create and update flows)
pub fn validate_user_form(form: &UserForm, require_password: bool) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 255));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_role(&form.role));
    if require_password {
        errors.extend(validate::validate_password(&form.password));
        if form.password != form.password_confirmation {
            errors.push("Passwords must match".to_string());
        }
    } else {
        errors.extend(validate::validate_password_change(
            &form.password,
            &form.password_confirmation,
        ));
    }
    errors
}
