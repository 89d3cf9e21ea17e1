use super::*;

use shared::domain::AccountId;

fn credential(username: &str, password: &str) -> Credential {
    Credential {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn account(id: i64, username: &str) -> Account {
    Account {
        id: AccountId(id),
        username: username.to_string(),
    }
}

#[test]
fn begin_login_rejects_blank_inputs() {
    let mut session = SessionState::new();

    let err = session
        .begin_login(credential("", "hunter2"))
        .expect_err("empty username");
    assert!(matches!(err, ConsoleError::Validation(_)));

    let err = session
        .begin_login(credential("   ", "hunter2"))
        .expect_err("whitespace username");
    assert!(matches!(err, ConsoleError::Validation(_)));

    let err = session
        .begin_login(credential("carol", ""))
        .expect_err("empty password");
    assert!(matches!(err, ConsoleError::Validation(_)));

    assert!(session.credential().is_none());
}

#[test]
fn begin_login_trims_the_username() {
    let mut session = SessionState::new();

    let sent = session
        .begin_login(credential("  carol ", "hunter2"))
        .expect("valid credential");

    assert_eq!(sent.username, "carol");
    assert_eq!(sent.password, "hunter2");
    assert_eq!(session.credential().expect("live").username, "carol");
    assert!(session.auth_modal_open());
}

#[test]
fn complete_login_retires_the_credential_and_closes_the_modal() {
    let mut session = SessionState::new();
    session
        .begin_login(credential("carol", "hunter2"))
        .expect("valid credential");

    session.complete_login();

    assert!(session.credential().is_none());
    assert!(!session.auth_modal_open());
}

#[test]
fn failed_login_keeps_the_credential_for_retry() {
    let mut session = SessionState::new();
    session
        .begin_login(credential("carol", "hunter2"))
        .expect("valid credential");

    assert!(session.credential().is_some());
    assert!(session.auth_modal_open());
}

#[test]
fn cancel_login_drops_the_credential() {
    let mut session = SessionState::new();
    session.open_login();
    session
        .begin_login(credential("carol", "hunter2"))
        .expect("valid credential");

    session.cancel_login();

    assert!(session.credential().is_none());
    assert!(!session.auth_modal_open());
}

#[test]
fn select_rejects_an_empty_username() {
    let mut session = SessionState::new();
    let err = session.select("").expect_err("empty selection");
    assert!(matches!(err, ConsoleError::Validation(_)));
    assert!(session.selected().is_none());
}

#[test]
fn roster_replacement_leaves_the_selection_alone() {
    let mut session = SessionState::new();
    session.apply_roster(vec![account(1, "alice"), account(2, "bob")]);
    session.select("alice").expect("select");

    session.apply_roster(vec![account(2, "bob")]);

    assert_eq!(session.accounts().len(), 1);
    assert_eq!(session.selected(), Some("alice"));
}

#[test]
fn request_close_needs_a_selection() {
    let mut session = SessionState::new();

    let err = session.request_close().expect_err("nothing selected");
    assert!(matches!(err, ConsoleError::Validation(_)));
    assert!(!session.confirm_close_open());

    session.select("alice").expect("select");
    let username = session.request_close().expect("confirm opens");
    assert_eq!(username, "alice");
    assert!(session.confirm_close_open());
}

#[test]
fn begin_confirmed_close_requires_a_pending_confirmation() {
    let mut session = SessionState::new();
    session.select("alice").expect("select");

    let err = session
        .begin_confirmed_close()
        .expect_err("no confirmation pending");
    assert!(matches!(err, ConsoleError::Validation(_)));

    session.request_close().expect("confirm opens");
    assert_eq!(session.begin_confirmed_close().expect("target"), "alice");
}

#[test]
fn begin_confirmed_close_rejects_when_the_selection_is_gone() {
    let mut session = SessionState::new();
    session.select("alice").expect("select");
    session.request_close().expect("confirm opens");
    session.clear_selection();

    let err = session.begin_confirmed_close().expect_err("must reject");
    assert!(matches!(err, ConsoleError::Validation(_)));
}

#[test]
fn complete_close_clears_selection_and_confirmation() {
    let mut session = SessionState::new();
    session.select("alice").expect("select");
    session.request_close().expect("confirm opens");

    session.complete_close();

    assert!(session.selected().is_none());
    assert!(!session.confirm_close_open());
}

#[test]
fn cancel_close_keeps_the_selection() {
    let mut session = SessionState::new();
    session.select("alice").expect("select");
    session.request_close().expect("confirm opens");

    session.cancel_close();

    assert!(!session.confirm_close_open());
    assert_eq!(session.selected(), Some("alice"));
}
