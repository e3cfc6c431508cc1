//! `ApiClient` against the in-process booking API: envelope unwrapping,
//! paginators, and the mapping of failure answers onto `ApiError`.

mod common;

use common::{
    ADMIN_EMAIL, ADMIN_TOKEN, ARCHIVED_MEETING, EMPLOYEE_EMAIL, EMPLOYEE_TOKEN, GARBLED_MEETING,
    LAST_PAGE, MISSING_ID, PAGE_TOTAL, PASSWORD, REVOKED_TOKEN, TAKEN_EMAIL, UNTIDY_CALENDAR_USER,
    start_mock_backend,
};
use roomdesk::api::{ApiError, flatten_validation};
use roomdesk::models::minutes::ActionItemStatus;
use roomdesk::models::role::Role;
use roomdesk::models::room::RoomFilter;
use roomdesk::models::user::{NewUser, UserFilter, UserUpdate};

#[actix_rt::test]
async fn test_login_returns_token_and_user() {
    let backend = start_mock_backend();
    let api = backend.client();

    let login = api.login(EMPLOYEE_EMAIL, PASSWORD).await.expect("login succeeds");

    assert_eq!(login.token, EMPLOYEE_TOKEN);
    assert_eq!(login.user.id, 2);
    assert_eq!(login.user.role(), Some(Role::Employee));
    assert_eq!(login.user.profile_picture.as_deref(), Some("profile_pictures/eve.png"));

    let sent = backend.calls("POST", "login");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].authorization.is_none());
    assert!(sent[0].body.contains(EMPLOYEE_EMAIL));
}

#[actix_rt::test]
async fn test_wrong_password_is_unauthorized() {
    let backend = start_mock_backend();
    let err = backend.client().login(ADMIN_EMAIL, "wrong-pass").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized), "got {err:?}");
}

#[actix_rt::test]
async fn test_rejected_token_is_unauthorized() {
    let backend = start_mock_backend();
    let err = backend.client().profile(REVOKED_TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized), "got {err:?}");
}

#[actix_rt::test]
async fn test_requests_carry_bearer_token() {
    let backend = start_mock_backend();
    let user = backend.client().profile(ADMIN_TOKEN).await.expect("profile loads");

    assert_eq!(user.email, ADMIN_EMAIL);
    let sent = backend.calls("GET", "User/Profile");
    assert_eq!(sent[0].authorization.as_deref(), Some(ADMIN_TOKEN));
}

#[actix_rt::test]
async fn test_paginated_users_send_filter_and_page() {
    let backend = start_mock_backend();
    let filter = UserFilter { name: "Zed".to_string(), ..UserFilter::default() };

    let page = backend
        .client()
        .users(ADMIN_TOKEN, &filter, 2, 5)
        .await
        .expect("user page loads");

    assert_eq!(page.current_page, 2);
    assert_eq!(page.last_page, LAST_PAGE);
    assert_eq!(page.total, PAGE_TOTAL);
    assert!(page.has_previous());
    assert!(page.has_next());
    assert!(page.data.iter().any(|u| u.name == "Zed"));

    let query = &backend.calls("GET", "User")[0].query;
    assert!(query.contains("name=Zed"), "query was {query}");
    assert!(query.contains("page=2"), "query was {query}");
    assert!(query.contains("per_page=5"), "query was {query}");
}

#[actix_rt::test]
async fn test_room_filter_uses_api_field_names() {
    let backend = start_mock_backend();
    let filter = RoomFilter { min_capacity: "10".to_string(), ..RoomFilter::default() };

    let page = backend
        .client()
        .rooms(ADMIN_TOKEN, &filter, 1, 5)
        .await
        .expect("room page loads");

    assert_eq!(page.data[0].roomname, "Fjord");
    assert_eq!(page.data[0].feature_titles(), "Projector");
    assert!(!page.has_previous());
    let query = &backend.calls("GET", "Room")[0].query;
    assert!(query.contains("minCapacity=10"), "query was {query}");
}

#[actix_rt::test]
async fn test_validation_errors_are_flattened() {
    let backend = start_mock_backend();
    let user = NewUser {
        name: "Taken".to_string(),
        email: TAKEN_EMAIL.to_string(),
        role: "Employee".to_string(),
        password: "secret1".to_string(),
        password_confirmation: "secret1".to_string(),
    };

    let err = backend.client().create_user(ADMIN_TOKEN, &user).await.unwrap_err();

    match &err {
        ApiError::Validation(msgs) => {
            assert_eq!(msgs, &vec!["The email has already been taken.".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(err.is_user_facing());
    assert_eq!(err.messages(), ["The email has already been taken."]);
}

#[actix_rt::test]
async fn test_missing_record_is_not_found() {
    let backend = start_mock_backend();
    let err = backend.client().user(ADMIN_TOKEN, MISSING_ID).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound), "got {err:?}");
    assert!(!err.is_user_facing());
}

#[actix_rt::test]
async fn test_success_false_is_rejected_with_message() {
    let backend = start_mock_backend();
    let err = backend
        .client()
        .meeting(EMPLOYEE_TOKEN, ARCHIVED_MEETING)
        .await
        .unwrap_err();
    match &err {
        ApiError::Rejected { status, message } => {
            assert_eq!(*status, 200);
            assert_eq!(message, "Meeting is archived");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(err.messages(), ["Meeting is archived"]);
}

#[actix_rt::test]
async fn test_unparseable_body_is_decode_error() {
    let backend = start_mock_backend();
    let err = backend
        .client()
        .meeting(EMPLOYEE_TOKEN, GARBLED_MEETING)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[actix_rt::test]
async fn test_unreachable_api_is_transport_error() {
    let api = roomdesk::api::ApiClient::new(
        "http://127.0.0.1:9/api",
        std::time::Duration::from_secs(2),
    )
    .expect("client builds");
    let err = api.profile(ADMIN_TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[actix_rt::test]
async fn test_user_meetings_decode_nested_records() {
    let backend = start_mock_backend();
    let meetings = backend
        .client()
        .user_meetings(EMPLOYEE_TOKEN, 2)
        .await
        .expect("meetings load");

    assert_eq!(meetings.len(), 3);
    let standup = meetings.iter().find(|m| m.id == 10).expect("standup present");
    assert_eq!(standup.room_display(), "Fjord (Floor 2)");
    assert_eq!(standup.minutes_id(), Some(5));
    assert_eq!(standup.agendas[0].id, Some(100));
    assert_eq!(standup.attendee_names(), "Eve Employee");
    assert!(standup.starts_at < standup.ends_at);
}

#[actix_rt::test]
async fn test_unreadable_meeting_does_not_hide_the_rest() {
    let backend = start_mock_backend();
    let meetings = backend
        .client()
        .user_meetings(EMPLOYEE_TOKEN, UNTIDY_CALENDAR_USER)
        .await
        .expect("readable meetings still load");

    let ids: Vec<i64> = meetings.iter().map(|m| m.id).collect();
    assert_eq!(ids, [11, 10, 12]);
}

#[actix_rt::test]
async fn test_action_items_decode_status_and_due_date() {
    let backend = start_mock_backend();
    let items = backend
        .client()
        .user_action_items(EMPLOYEE_TOKEN, 2)
        .await
        .expect("action items load");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].status, ActionItemStatus::Pending);
    assert!(items[1].is_completed());
    assert_eq!(items[0].due_date, Some(common::day("2030-01-01")));
}

#[actix_rt::test]
async fn test_update_user_sends_method_override() {
    let backend = start_mock_backend();
    let update = UserUpdate {
        name: "Eve".to_string(),
        email: EMPLOYEE_EMAIL.to_string(),
        role: "Employee".to_string(),
        ..UserUpdate::default()
    };

    let saved = backend
        .client()
        .update_user(EMPLOYEE_TOKEN, 2, update)
        .await
        .expect("update succeeds");

    assert_eq!(saved.name, "Updated Name");
    let body = &backend.calls("POST", "User/2")[0].body;
    assert!(body.contains("name=\"_method\""), "body was {body}");
    assert!(body.contains("PUT"));
    assert!(!body.contains("name=\"password\""), "empty password must not be sent");
}

#[actix_rt::test]
async fn test_toggle_sends_target_status() {
    let backend = start_mock_backend();
    backend
        .client()
        .set_action_item_status(EMPLOYEE_TOKEN, 7, ActionItemStatus::Completed)
        .await
        .expect("toggle succeeds");

    let sent = backend.calls("PUT", "ActionItem/7/toggle");
    let body: serde_json::Value = serde_json::from_str(&sent[0].body).expect("json body");
    assert_eq!(body, serde_json::json!({ "status": "Completed" }));
}

#[actix_rt::test]
async fn test_delete_accepts_null_data() {
    let backend = start_mock_backend();
    backend
        .client()
        .delete_room(ADMIN_TOKEN, 4)
        .await
        .expect("delete succeeds");
    assert_eq!(backend.calls("DELETE", "Room/4").len(), 1);
}

#[test]
fn test_flatten_validation_keeps_every_message() {
    let data = serde_json::json!({
        "email": ["Email taken", "Email invalid"],
        "name": "Name required",
    });
    let msgs = flatten_validation(Some(&data));
    assert_eq!(msgs.len(), 3);
    assert!(msgs.contains(&"Name required".to_string()));
}

#[test]
fn test_flatten_validation_without_fields_falls_back() {
    assert_eq!(flatten_validation(None), ["Validation Error"]);
    assert_eq!(flatten_validation(Some(&serde_json::json!({}))), ["Validation Error"]);
}
