//! Live-update behavior of the direct-message view: timer lifecycle,
//! growth-rule refreshes, and teardown, all under mock time.

mod common;

use common::*;
use knowledge_hub::common::{ApiAction, AppCommand, AppEvent};

#[tokio::test(start_paused = true)]
async fn one_refresh_timer_survives_reselection() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2)); // partner 2's history
    backend.state.push_history(messages(3)); // partner 3's history, repeats for ticks

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;

    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    commands
        .send(AppCommand::SelectConversation(user(3)))
        .await
        .unwrap();
    settle().await;

    advance_intervals(3, POLL).await;

    let fetches = backend.state.conversation_fetches();
    assert_eq!(fetches[0], (1, 2));
    assert_eq!(fetches[1], (1, 3));
    // one refresh per interval, and only for the current partner: the
    // timer armed for partner 2 was replaced, not duplicated
    assert_eq!(fetches.len(), 5, "expected exactly 3 tick fetches: {fetches:?}");
    assert!(fetches[2..].iter().all(|pair| *pair == (1, 3)));

    let loads: Vec<_> = drain_events(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            AppEvent::ConversationLoaded { partner, messages } => {
                Some((partner.id, messages.len()))
            }
            AppEvent::ConversationUpdated { .. } => panic!("no growth was scripted"),
            _ => None,
        })
        .collect();
    // the displayed history ends on partner 3, never a merge of both
    assert_eq!(loads, vec![(2, 2), (3, 3)]);
}

#[tokio::test(start_paused = true)]
async fn whitespace_send_never_reaches_the_network() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2));

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;
    drain_events(&mut events);

    commands
        .send(AppCommand::SendMessage {
            body: "   \t  ".into(),
        })
        .await
        .unwrap();
    settle().await;

    assert!(backend.state.sent.lock().unwrap().is_empty());
    assert!(drain_events(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn equal_count_refresh_keeps_the_displayed_list() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(5));
    backend.state.push_history(messages(5));

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;
    drain_events(&mut events);

    advance_intervals(2, POLL).await;

    assert!(
        drain_events(&mut events).is_empty(),
        "a refresh returning the same count must not replace the list"
    );
}

#[tokio::test(start_paused = true)]
async fn growth_replaces_the_list_exactly_once() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(5));
    backend.state.push_history(messages(7)); // repeats for later ticks

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;
    drain_events(&mut events);

    advance_intervals(1, POLL).await;
    let updates: Vec<_> = drain_events(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            AppEvent::ConversationUpdated { messages } => Some(messages.len()),
            _ => None,
        })
        .collect();
    assert_eq!(updates, vec![7]);

    // the next tick sees 7 == 7 and stays quiet
    advance_intervals(2, POLL).await;
    assert!(drain_events(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn deselect_stops_all_polling() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2));

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;

    commands.send(AppCommand::DeselectConversation).await.unwrap();
    settle().await;
    drain_events(&mut events);

    advance_intervals(4, POLL).await;

    assert_eq!(
        backend.state.conversation_fetches().len(),
        1,
        "only the initial selection fetch may exist after teardown"
    );
    assert!(drain_events(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_ui_channel_ends_the_worker() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2));

    let (commands, mut events, worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;

    drop(commands);
    worker.await.unwrap();

    tokio::time::advance(POLL * 4).await;
    settle().await;
    assert_eq!(backend.state.conversation_fetches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn send_confirms_then_refreshes_contacts() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2));
    backend.state.contacts.lock().unwrap().push(user(2));

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;
    drain_events(&mut events);

    commands
        .send(AppCommand::SendMessage {
            body: "  hello there  ".into(),
        })
        .await
        .unwrap();
    settle().await;

    let drained = drain_events(&mut events);
    match &drained[..] {
        [AppEvent::MessageSent(message), AppEvent::ContactsLoaded(contacts)] => {
            assert_eq!(message.body, "hello there");
            assert_eq!(message.sender_id, 1);
            assert_eq!(message.receiver_id, 2);
            assert_eq!(contacts.len(), 1);
        }
        other => panic!("expected MessageSent then ContactsLoaded, got {other:?}"),
    }
    assert_eq!(
        backend.state.sent.lock().unwrap().as_slice(),
        &[(1, 2, "hello there".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_send_surfaces_the_error_and_appends_nothing() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2));
    backend
        .state
        .fail_send
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;
    drain_events(&mut events);

    commands
        .send(AppCommand::SendMessage {
            body: "hello".into(),
        })
        .await
        .unwrap();
    settle().await;

    match &drain_events(&mut events)[..] {
        [AppEvent::RequestFailed { action, .. }] => {
            assert_eq!(*action, ApiAction::SendMessage);
        }
        other => panic!("expected a single RequestFailed, got {other:?}"),
    }
    assert!(backend.state.sent.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_selection_keeps_the_previous_conversation() {
    let backend = FakeBackend::default();
    backend.state.push_history(messages(2));

    let (commands, mut events, _worker) = spawn_worker(backend.clone(), POLL);
    log_in(&commands, &mut events).await;
    commands
        .send(AppCommand::SelectConversation(user(2)))
        .await
        .unwrap();
    settle().await;
    drain_events(&mut events);

    backend
        .state
        .fail_conversation
        .store(true, std::sync::atomic::Ordering::SeqCst);
    commands
        .send(AppCommand::SelectConversation(user(3)))
        .await
        .unwrap();
    settle().await;
    match &drain_events(&mut events)[..] {
        [AppEvent::RequestFailed { action, .. }] => {
            assert_eq!(*action, ApiAction::LoadConversation);
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }

    // polling carries on against the old partner
    backend
        .state
        .fail_conversation
        .store(false, std::sync::atomic::Ordering::SeqCst);
    advance_intervals(1, POLL).await;

    let fetches = backend.state.conversation_fetches();
    assert_eq!(fetches.last(), Some(&(1, 2)));
}
