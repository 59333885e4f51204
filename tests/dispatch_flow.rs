//! End-to-end dispatch behavior through the public event API.

use std::collections::BTreeMap;

use finassist::api::{HttpMethod, OutboundRequest};
use finassist::worker::{DocumentWorker, WorkerMessage, WorkerResponse};
use finassist::{
    handle_event, initialize, Action, AppState, Config, DispatchTicket, Event, Mode, Permission,
    RequestOutcome,
};

fn state_in(mode: Mode) -> AppState {
    initialize(&Config {
        start_mode: mode,
        ..Default::default()
    })
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

fn dispatch(state: &mut AppState) -> Vec<Action> {
    handle_event(state, &Event::Dispatch).unwrap().1
}

fn sent_request(actions: &[Action]) -> &OutboundRequest {
    match actions.first() {
        Some(Action::SendRequest(request)) => request,
        other => panic!("expected a request, got {other:?}"),
    }
}

fn arrive(state: &mut AppState, ticket: DispatchTicket, status: u16, body: &[u8]) -> bool {
    handle_event(
        state,
        &Event::ResponseArrived {
            ticket: Some(ticket),
            status,
            body: body.to_vec(),
        },
    )
    .unwrap()
    .0
}

#[test]
fn empty_input_never_dispatches() {
    for mode in Mode::ALL {
        let mut state = state_in(mode);
        let (render, actions) = handle_event(&mut state, &Event::Dispatch).unwrap();
        assert!(!render, "{mode} rendered on empty dispatch");
        assert!(actions.is_empty(), "{mode} produced {actions:?}");
        assert_eq!(state.outcome, RequestOutcome::Idle);
        assert_eq!(state.generation, 0);
    }
}

#[test]
fn empty_input_after_a_settled_dispatch_changes_nothing() {
    let mut state = state_in(Mode::Stock);
    type_text(&mut state, "aapl");
    let ticket = sent_request(&dispatch(&mut state)).ticket;
    arrive(&mut state, ticket, 200, br#"{"info":"AAPL: $150"}"#);

    handle_event(&mut state, &Event::ClearInput).unwrap();
    let (render, actions) = handle_event(&mut state, &Event::Dispatch).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(state.outcome, RequestOutcome::Success("AAPL: $150".to_string()));
    assert_eq!(state.generation, 1);

    handle_event(&mut state, &Event::SwitchMode(Mode::News)).unwrap();
    type_text(&mut state, "xyz");
    let ticket = sent_request(&dispatch(&mut state)).ticket;
    arrive(&mut state, ticket, 404, br#"{"error":"No news found for xyz"}"#);

    handle_event(&mut state, &Event::ClearInput).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Dispatch).unwrap();
    assert!(actions.is_empty());
    assert_eq!(
        state.outcome,
        RequestOutcome::Failure("No news found for xyz".to_string())
    );
    assert_eq!(state.generation, 2);
}

#[test]
fn stock_lookup_uppercases_and_keeps_payload_newlines() {
    let mut state = state_in(Mode::Stock);
    type_text(&mut state, "aapl");
    assert_eq!(state.input.ticker_text, "AAPL");

    let actions = dispatch(&mut state);
    let request = sent_request(&actions);
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "http://localhost:5001/api/stock/AAPL");
    assert_eq!(state.outcome, RequestOutcome::Loading);

    let ticket = request.ticket;
    assert!(arrive(&mut state, ticket, 200, br#"{"info":"AAPL\nPrice: $150\n\nVolume: 1M"}"#));
    assert_eq!(
        state.outcome,
        RequestOutcome::Success("AAPL\nPrice: $150\n\nVolume: 1M".to_string())
    );
    assert!(state.in_flight.is_none());
    assert!(state.settled_at.is_some());
}

#[test]
fn news_query_is_stored_verbatim_and_encoded_on_the_wire() {
    let mut state = state_in(Mode::News);
    type_text(&mut state, "Tesla earnings");
    assert_eq!(state.input.news_query_text, "Tesla earnings");

    let actions = dispatch(&mut state);
    assert_eq!(
        sent_request(&actions).url,
        "http://localhost:5001/api/news/Tesla%20earnings"
    );
}

#[test]
fn backend_error_message_is_shown_verbatim() {
    let mut state = state_in(Mode::News);
    type_text(&mut state, "xyz");
    let ticket = sent_request(&dispatch(&mut state)).ticket;

    arrive(&mut state, ticket, 404, br#"{"error":"No news found for xyz"}"#);
    assert_eq!(
        state.outcome,
        RequestOutcome::Failure("No news found for xyz".to_string())
    );
}

#[test]
fn success_status_without_payload_field_is_a_generic_failure() {
    let mut state = state_in(Mode::Stock);
    type_text(&mut state, "msft");
    let ticket = sent_request(&dispatch(&mut state)).ticket;

    arrive(&mut state, ticket, 200, br#"{"news":"wrong field"}"#);
    assert_eq!(state.outcome, RequestOutcome::generic_failure());
}

#[test]
fn second_dispatch_while_in_flight_is_rejected() {
    let mut state = state_in(Mode::Stock);
    type_text(&mut state, "aapl");
    let first = sent_request(&dispatch(&mut state)).ticket;

    let (render, actions) = handle_event(&mut state, &Event::Dispatch).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(state.in_flight, Some(first));
    assert_eq!(state.generation, 1);
}

#[test]
fn denied_web_access_fails_at_once_and_does_not_block_retries() {
    let mut state = state_in(Mode::Stock);
    handle_event(&mut state, &Event::PermissionsRequested).unwrap();
    handle_event(
        &mut state,
        &Event::PermissionsResult {
            denied: vec![Permission::WebAccess, Permission::FullHdAccess],
        },
    )
    .unwrap();
    type_text(&mut state, "aapl");

    for attempt in 1..=2 {
        let (render, actions) = handle_event(&mut state, &Event::Dispatch).unwrap();
        assert!(render);
        assert!(actions.is_empty(), "attempt {attempt} produced {actions:?}");
        assert_eq!(state.outcome, RequestOutcome::generic_failure());
        assert!(state.in_flight.is_none());
        assert_eq!(state.generation, attempt);
    }
}

#[test]
fn denied_file_access_only_fails_document_dispatches() {
    let mut state = state_in(Mode::Document);
    handle_event(
        &mut state,
        &Event::PermissionsResult {
            denied: vec![Permission::FullHdAccess],
        },
    )
    .unwrap();
    type_text(&mut state, "~/q3.pdf");

    assert!(dispatch(&mut state).is_empty());
    assert_eq!(state.outcome, RequestOutcome::generic_failure());

    handle_event(&mut state, &Event::SwitchMode(Mode::News)).unwrap();
    type_text(&mut state, "oil");
    sent_request(&dispatch(&mut state));
    assert_eq!(state.outcome, RequestOutcome::Loading);
}

#[test]
fn dispatch_waits_for_the_permission_prompt() {
    let mut state = state_in(Mode::Stock);
    handle_event(&mut state, &Event::PermissionsRequested).unwrap();
    type_text(&mut state, "aapl");

    let (render, actions) = handle_event(&mut state, &Event::Dispatch).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(state.outcome, RequestOutcome::Idle);
    assert!(state.in_flight.is_none());

    handle_event(&mut state, &Event::PermissionsResult { denied: vec![] }).unwrap();
    sent_request(&dispatch(&mut state));
    assert!(state.in_flight.is_some());
}

#[test]
fn mode_switch_resets_outcome_keeps_input_and_drops_late_results() {
    let mut state = state_in(Mode::Stock);
    type_text(&mut state, "aapl");
    let stale = sent_request(&dispatch(&mut state)).ticket;

    handle_event(&mut state, &Event::SwitchMode(Mode::News)).unwrap();
    assert_eq!(state.outcome, RequestOutcome::Idle);
    assert!(state.in_flight.is_none());

    type_text(&mut state, "fed rates");
    let current = sent_request(&dispatch(&mut state)).ticket;

    assert!(!arrive(&mut state, stale, 200, br#"{"info":"AAPL: $150"}"#));
    assert_eq!(state.outcome, RequestOutcome::Loading);

    arrive(&mut state, current, 200, br#"{"news":"Rates held"}"#);
    assert_eq!(state.outcome, RequestOutcome::Success("Rates held".to_string()));

    handle_event(&mut state, &Event::SwitchMode(Mode::Stock)).unwrap();
    assert_eq!(state.input.ticker_text, "AAPL");
    assert_eq!(state.input.news_query_text, "fed rates");
    assert_eq!(state.outcome, RequestOutcome::Idle);
}

#[test]
fn switching_to_the_active_mode_still_resets() {
    let mut state = state_in(Mode::Stock);
    type_text(&mut state, "ibm");
    let ticket = sent_request(&dispatch(&mut state)).ticket;
    arrive(&mut state, ticket, 200, br#"{"info":"IBM"}"#);

    handle_event(&mut state, &Event::SwitchMode(Mode::Stock)).unwrap();
    assert_eq!(state.outcome, RequestOutcome::Idle);
}

#[test]
fn document_transport_failure_uses_generic_message() {
    let mut state = state_in(Mode::Document);
    handle_event(&mut state, &Event::SelectFile(Some("~/reports/q3.txt".to_string()))).unwrap();

    let actions = dispatch(&mut state);
    let Some(Action::PostToWorker(WorkerMessage::LoadDocument { ticket, path, .. })) = actions.first()
    else {
        panic!("expected a worker read, got {actions:?}");
    };
    assert_eq!(path, "~/reports/q3.txt");

    let loaded = WorkerResponse::DocumentLoaded {
        ticket: *ticket,
        file_name: "q3.txt".to_string(),
        content: b"Q3 revenue grew".to_vec(),
    };
    let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(loaded)).unwrap();
    let request = sent_request(&actions);
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "http://localhost:5001/api/upload");
    assert!(request.headers["Content-Type"].starts_with("multipart/form-data; boundary="));

    arrive(&mut state, request.ticket, 400, b"connection refused");
    assert_eq!(
        state.outcome,
        RequestOutcome::Failure("An error occurred".to_string())
    );
}

#[test]
fn unreadable_document_settles_through_the_worker() {
    let mut state = state_in(Mode::Document);
    type_text(&mut state, "/definitely/not/here/q3.pdf");
    let actions = dispatch(&mut state);
    let Some(Action::PostToWorker(message)) = actions.first() else {
        panic!("expected a worker read, got {actions:?}");
    };

    let response = DocumentWorker.handle_message(message.clone());
    assert!(matches!(response, WorkerResponse::DocumentUnreadable { .. }));

    handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    assert_eq!(state.outcome, RequestOutcome::generic_failure());
    assert!(state.in_flight.is_none());
}

#[test]
fn ticket_survives_the_request_context() {
    let mut state = state_in(Mode::News);
    type_text(&mut state, "oil");
    let request = sent_request(&dispatch(&mut state)).clone();

    let context = request.ticket.to_context();
    assert_eq!(DispatchTicket::from_context(&context), Some(request.ticket));
    assert_eq!(DispatchTicket::from_context(&BTreeMap::new()), None);
}
