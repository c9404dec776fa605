#![cfg(test)]

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone};
use clinic_triage::{
    base::config::ConfigInner,
    interaction::desk::{Desk, Reply},
    prelude::*,
    runtime::Runtime,
    service::{clock::GenericClock, identity::GenericIdentityProvider},
};
use mockall::mock;

// Mocks.

// Mock identity provider for testing.

mock! {
    pub Identity {}

    #[async_trait]
    impl GenericIdentityProvider for Identity {
        async fn register(&self, id: &str, password: &str, name: &str) -> Result<Account, IdentityError>;
        async fn authenticate(&self, id: &str, password: &str) -> Result<Account, IdentityError>;
    }
}

// Mock clock for testing.

mock! {
    pub Clock {}

    impl GenericClock for Clock {
        fn now(&self) -> DateTime<Local>;
    }
}

fn base_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
}

/// A clock that advances one minute per reading, starting at 10:00.
fn get_ticking_clock() -> MockClock {
    let mut mock = MockClock::new();
    let ticks = AtomicI64::new(0);

    mock.expect_now().returning(move || base_time() + Duration::minutes(ticks.fetch_add(1, Ordering::SeqCst)));

    mock
}

fn get_mock_identity() -> MockIdentity {
    let mut mock = MockIdentity::new();

    mock.expect_authenticate().returning(|id, password| match (id, password) {
        ("doc123", "admin123") => Ok(Account {
            id: "doc123".to_string(),
            name: "Dr. Juan Pérez".to_string(),
            role: Role::Staff { title: "Physician".to_string() },
        }),
        (_, "pw") => Ok(Account {
            id: id.to_string(),
            name: format!("Patient {id}"),
            role: Role::Patient,
        }),
        (_, _) => Err(IdentityError::WrongPassword),
    });
    mock.expect_register().returning(|_, _, _| Err(IdentityError::IdTaken("any".to_string())));

    mock
}

/// Helper function to setup the test environment.
fn setup_test_environment(inner: ConfigInner) -> Runtime {
    let config = Config::new(inner).expect("Invalid test config");

    Runtime {
        config,
        queue: QueueClient::memory(),
        identity: IdentityClient::new(Arc::new(get_mock_identity())),
        clock: Clock::new(Arc::new(get_ticking_clock())),
    }
}

async fn say(desk: &mut Desk, line: &str) -> String {
    desk.handle_line(line).await.expect("Expected a reply").text().to_string()
}

#[tokio::test]
async fn test_triage_order_scenario() {
    let runtime = setup_test_environment(ConfigInner {
        withdraw_on_logout: false,
        ..Default::default()
    });
    let mut desk = Desk::new(runtime.clone());

    // Submissions at 10:00, 10:01 and 10:02; the critical ones jump the regular one.
    for (patient, priority) in [("P1", "regular"), ("P3", "critical"), ("P2", "critical")] {
        say(&mut desk, &format!("login {patient} pw")).await;
        let reply = say(&mut desk, &format!("request {priority}")).await;
        assert!(reply.starts_with("Turn requested"), "unexpected reply: {reply}");
        say(&mut desk, "logout").await;
    }

    let order = runtime.queue.ordered_view().iter().map(|r| r.patient_id().to_string()).collect::<Vec<_>>();
    assert_eq!(order, vec!["P3", "P2", "P1"]);

    // Staff drains the queue in the same order.
    say(&mut desk, "login doc123 admin123").await;
    assert!(say(&mut desk, "next").await.contains("(P3)"));
    assert!(say(&mut desk, "next").await.contains("(P2)"));
    assert!(say(&mut desk, "next").await.contains("(P1)"));
    assert_eq!(say(&mut desk, "next").await, "No patients waiting.");
}

#[tokio::test]
async fn test_duplicate_request_is_rejected() {
    let runtime = setup_test_environment(ConfigInner::default());
    let mut desk = Desk::new(runtime.clone());

    say(&mut desk, "login P1 pw").await;
    say(&mut desk, "request 2").await;

    let reply = say(&mut desk, "request 1").await;

    assert!(reply.contains("already has a pending request"), "unexpected reply: {reply}");
    let view = runtime.queue.ordered_view();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].priority(), Priority::Urgent);
}

#[tokio::test]
async fn test_invalid_priority_is_rejected_at_the_desk() {
    let runtime = setup_test_environment(ConfigInner::default());
    let mut desk = Desk::new(runtime.clone());

    say(&mut desk, "login P1 pw").await;
    let reply = say(&mut desk, "request 7").await;

    assert!(reply.starts_with("Error: invalid priority 7"), "unexpected reply: {reply}");
    assert!(runtime.queue.is_empty());
}

#[tokio::test]
async fn test_logout_withdraws_pending_request() {
    let runtime = setup_test_environment(ConfigInner::default());
    let mut desk = Desk::new(runtime.clone());

    say(&mut desk, "login P1 pw").await;
    say(&mut desk, "request 3").await;
    let reply = say(&mut desk, "logout").await;

    assert_eq!(reply, "Your pending request was withdrawn. Logged out.");
    assert!(runtime.queue.is_empty());
    assert!(desk.session().is_none());
}

#[tokio::test]
async fn test_logout_keeps_request_when_configured() {
    let runtime = setup_test_environment(ConfigInner {
        withdraw_on_logout: false,
        ..Default::default()
    });
    let mut desk = Desk::new(runtime.clone());

    say(&mut desk, "login P1 pw").await;
    say(&mut desk, "request 3").await;
    assert_eq!(say(&mut desk, "logout").await, "Logged out.");

    assert_eq!(runtime.queue.len(), 1);
}

#[tokio::test]
async fn test_roles_are_enforced() {
    let runtime = setup_test_environment(ConfigInner::default());
    let mut desk = Desk::new(runtime);

    assert_eq!(say(&mut desk, "queue").await, "Error: please log in first");

    say(&mut desk, "login P1 pw").await;
    assert_eq!(say(&mut desk, "next").await, "Error: only staff may do that");
    assert_eq!(say(&mut desk, "login P2 pw").await, "Error: already logged in as `P1`; log out first");
    say(&mut desk, "logout").await;

    say(&mut desk, "login doc123 admin123").await;
    assert_eq!(say(&mut desk, "request 1").await, "Error: only patients may do that");
}

#[tokio::test]
async fn test_staff_serve_and_cancel_specific_patients() {
    let runtime = setup_test_environment(ConfigInner {
        withdraw_on_logout: false,
        ..Default::default()
    });
    let mut desk = Desk::new(runtime.clone());

    for patient in ["P1", "P2"] {
        say(&mut desk, &format!("login {patient} pw")).await;
        say(&mut desk, "request urgent").await;
        say(&mut desk, "logout").await;
    }

    say(&mut desk, "login doc123 admin123").await;

    let served = say(&mut desk, "serve P2").await;
    assert_eq!(served, "Now serving Patient P2 (P2), Urgent, submitted 2026-03-02 10:01:00.");

    assert_eq!(say(&mut desk, "cancel P1").await, "Withdrew the request of Patient P1 (P1).");
    assert_eq!(say(&mut desk, "serve P1").await, "Error: patient `P1` has no pending request");
    assert!(runtime.queue.is_empty());
}

#[tokio::test]
async fn test_queue_rendering_and_position() {
    let runtime = setup_test_environment(ConfigInner {
        withdraw_on_logout: false,
        ..Default::default()
    });
    let mut desk = Desk::new(runtime);

    say(&mut desk, "login P1 pw").await;
    say(&mut desk, "request 3").await;
    say(&mut desk, "logout").await;

    say(&mut desk, "login P2 pw").await;
    assert_eq!(say(&mut desk, "request 1").await, "Turn requested (Critical). You are #1 in the queue.");
    say(&mut desk, "logout").await;

    say(&mut desk, "login P1 pw").await;
    assert_eq!(say(&mut desk, "position").await, "You are #2 of 2 in the queue.");

    let table = say(&mut desk, "queue").await;
    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("1  P2") && lines[2].contains("Critical"));
    assert!(lines[3].starts_with("2  P1") && lines[3].contains("Regular"));

    let json: serde_json::Value = serde_json::from_str(&say(&mut desk, "queue --json").await).unwrap();
    assert_eq!(json[0]["patient_id"], "P2");
    assert_eq!(json[1]["submitted_at"], "2026-03-02 10:00:00");

    assert_eq!(say(&mut desk, "cancel").await, "Your request was withdrawn.");
    assert_eq!(say(&mut desk, "position").await, "You have no pending request.");
}

#[tokio::test]
async fn test_identity_errors_are_reported() {
    let runtime = setup_test_environment(ConfigInner::default());
    let mut desk = Desk::new(runtime);

    assert_eq!(say(&mut desk, "login P1 nope").await, "Error: wrong password");
    assert_eq!(say(&mut desk, "register 12345678 pw Ana").await, "Error: id `any` is already registered");
    assert!(desk.session().is_none());
}

#[tokio::test]
async fn test_blank_lines_and_quit() {
    let runtime = setup_test_environment(ConfigInner::default());
    let mut desk = Desk::new(runtime.clone());

    assert!(desk.handle_line("   ").await.is_none());

    say(&mut desk, "login P1 pw").await;
    say(&mut desk, "request 2").await;

    let reply = desk.handle_line("quit").await;

    assert_eq!(reply, Some(Reply::Quit("Your pending request was withdrawn. Goodbye.".to_string())));
    assert!(runtime.queue.is_empty());
}

#[tokio::test]
async fn test_in_memory_services_end_to_end() {
    let runtime = Runtime::new(Config::default());
    let mut desk = Desk::new(runtime.clone());

    assert_eq!(say(&mut desk, "register 12345678 secret Ana Ruiz").await, "Registered Ana Ruiz (12345678). You are now logged in.");
    assert_eq!(say(&mut desk, "whoami").await, "Ana Ruiz (12345678), patient");
    say(&mut desk, "request critical").await;
    assert_eq!(say(&mut desk, "logout").await, "Your pending request was withdrawn. Logged out.");

    assert_eq!(say(&mut desk, "register 1234 secret Luis").await, "Error: id must be at least 8 characters long");
    assert_eq!(say(&mut desk, "login doc456 admin456").await, "Welcome, Dra. María Gómez.");
    assert_eq!(say(&mut desk, "whoami").await, "Dra. María Gómez (doc456), Head Nurse");
    assert_eq!(say(&mut desk, "queue").await, "No patients waiting.");
}
