use backend::{AuthEvent, Outcome, SessionCommand, DEMO_PASSWORD};
use futures::channel::mpsc;
use pretty_assertions::assert_eq;
use shared_types::{routes, SessionSnapshot};

use crate::common;

#[tokio::test]
async fn test_loop_restores_then_serves_commands_and_unsubscribes() {
    let (backend, service) = common::demo_service();
    let events = service.init();
    assert_eq!(backend.subscriber_count(), 1);

    let (tx, rx) = mpsc::unbounded();
    let mut outcomes: Vec<Outcome> = Vec::new();

    futures::join!(service.run(events, rx, |o| outcomes.push(o)), async move {
        tx.unbounded_send(SessionCommand::SignIn {
            email: common::CITIZEN.into(),
            password: DEMO_PASSWORD.into(),
            redirect: None,
        })
        .expect("command channel open");
        drop(tx);
    });

    assert_eq!(backend.subscriber_count(), 0);
    assert_eq!(outcomes.first(), Some(&Outcome::none()));
    assert!(outcomes
        .iter()
        .any(|o| o.navigate.as_deref() == Some(routes::DASHBOARD_CITIZEN)));
    assert!(service.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_commands_are_served_in_arrival_order() {
    let (_backend, service) = common::demo_service();
    let events = service.init();
    let (tx, rx) = mpsc::unbounded();
    let mut navigations: Vec<String> = Vec::new();

    for command in [
        SessionCommand::SignIn {
            email: common::SECRETARY.into(),
            password: DEMO_PASSWORD.into(),
            redirect: None,
        },
        SessionCommand::SignOut,
        SessionCommand::SignIn {
            email: common::VILLAGE_HEAD.into(),
            password: DEMO_PASSWORD.into(),
            redirect: None,
        },
    ] {
        tx.unbounded_send(command).expect("command channel open");
    }
    drop(tx);

    service
        .run(events, rx, |o| navigations.extend(o.navigate))
        .await;

    assert_eq!(
        navigations,
        vec![
            routes::DASHBOARD_SECRETARY.to_string(),
            routes::LOGIN.to_string(),
            routes::DASHBOARD_VILLAGE_HEAD.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_backend_sign_out_event_reaches_the_session() {
    let (backend, service) = common::demo_service();
    backend.seed_session("demo-citizen");
    let events = service.init();
    let (tx, rx) = mpsc::unbounded::<SessionCommand>();

    futures::join!(service.run(events, rx, |_| {}), async {
        while !service.snapshot().is_authenticated() {
            tokio::task::yield_now().await;
        }
        backend.emit(AuthEvent::SignedOut);
        while service.snapshot().is_authenticated() {
            tokio::task::yield_now().await;
        }
        drop(tx);
    });

    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_dropping_the_subscription_unregisters() {
    let (backend, service) = common::demo_service();
    let first = service.init();
    let second = service.init();
    assert_eq!(backend.subscriber_count(), 2);

    first.unsubscribe();
    assert_eq!(backend.subscriber_count(), 1);
    drop(second);
    assert_eq!(backend.subscriber_count(), 0);
}

#[tokio::test]
async fn test_observer_sees_final_state_of_each_operation() {
    use std::cell::RefCell;
    use std::rc::Rc;

    common::init_tracing();
    let backend = std::sync::Arc::new(backend::MemoryBackend::with_demo_accounts());
    let seen: Rc<RefCell<Vec<SessionSnapshot>>> = Rc::default();
    let sink = seen.clone();
    let service = backend::SessionService::new(backend)
        .with_observer(move |s| sink.borrow_mut().push(s.clone()));

    service.restore().await;
    service.sign_in(common::CITIZEN, DEMO_PASSWORD, None).await;

    let seen = seen.borrow();
    assert_eq!(seen.first(), Some(&SessionSnapshot::signed_out()));
    assert!(seen.iter().any(|s| s.loading && s.is_authenticated()));
    assert_eq!(seen.last(), Some(&service.snapshot()));
}

fn sign_in(email: &str) -> SessionCommand {
    SessionCommand::SignIn {
        email: email.into(),
        password: DEMO_PASSWORD.into(),
        redirect: None,
    }
}

#[tokio::test]
async fn test_sign_out_queued_behind_sign_in_wins() {
    for _ in 0..50 {
        let (backend, service) = common::demo_service();
        let events = service.init();
        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(sign_in(common::SECRETARY))
            .expect("command channel open");
        tx.unbounded_send(SessionCommand::SignOut)
            .expect("command channel open");
        drop(tx);

        service.run(events, rx, |_| {}).await;

        assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
        assert_eq!(backend.subscriber_count(), 0);
    }
}

#[tokio::test]
async fn test_sign_in_queued_behind_sign_out_wins() {
    let (_backend, service) = common::demo_service();
    let events = service.init();
    let (tx, rx) = mpsc::unbounded();
    tx.unbounded_send(SessionCommand::SignOut)
        .expect("command channel open");
    tx.unbounded_send(sign_in(common::SECRETARY))
        .expect("command channel open");
    drop(tx);

    service.run(events, rx, |_| {}).await;

    let snapshot = service.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.role(), Some(shared_types::Role::Secretary));
}

#[tokio::test]
async fn test_events_queued_when_commands_close_are_applied() {
    let (backend, service) = common::demo_service();
    backend.seed_session("demo-citizen");
    let events = service.init();
    let (tx, rx) = mpsc::unbounded::<SessionCommand>();

    futures::join!(service.run(events, rx, |_| {}), async {
        while !service.snapshot().is_authenticated() {
            tokio::task::yield_now().await;
        }
        backend.emit(AuthEvent::SignedOut);
        drop(tx);
    });

    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}
