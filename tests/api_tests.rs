//! Integration tests for the HTTP control surface.
//!
//! Requests go through the axum `Router` via `tower::ServiceExt` without a TCP
//! listener. Ticks are delivered by hand so timing is deterministic.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use matchclock::{create_router, AppState, Config, Notification, Tick, WallClock};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Debug)]
struct FixedClock(NaiveDateTime);

impl WallClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// State whose host-stamped operations all happen at noon
fn make_state(args: &[&str]) -> Arc<AppState> {
    let mut argv = vec!["matchclock"];
    argv.extend_from_slice(args);
    let config = Config::parse_from(argv);
    Arc::new(AppState::with_clock(config, Arc::new(FixedClock(noon()))).unwrap())
}

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 14)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn tick(secs: u64) -> Tick {
    Tick::new(Duration::from_secs(secs), noon())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = create_router(make_state(&[]));
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn timer_runs_to_finished_through_the_api() {
    let state = make_state(&[]);
    let app = create_router(Arc::clone(&state));

    let (status, body) = send(&app, "POST", "/widget/mode", Some(json!({"mode": "timer"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget"]["mode"], "timer");

    let (status, body) = send(&app, "POST", "/widget/timer", Some(json!({"seconds": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget"]["display"], "00:00:05");

    let (status, _) = send(&app, "POST", "/widget/start", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/widget/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_transition");

    for _ in 0..4 {
        assert!(state.deliver_tick(&tick(1)).unwrap().is_empty());
    }
    let produced = state.deliver_tick(&tick(1)).unwrap();
    assert_eq!(produced.len(), 1);
    assert_eq!(produced[0].name(), "finished");

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["widget"]["state"], "finished");
    assert_eq!(body["widget"]["elapsed_secs"], 5);
    assert_eq!(body["widget"]["remaining_secs"], 0);
}

#[tokio::test]
async fn zero_timer_is_rejected() {
    let app = create_router(make_state(&["--mode", "timer"]));
    let (status, body) = send(&app, "POST", "/widget/timer", Some(json!({"seconds": 0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "invalid_configuration");
}

#[tokio::test]
async fn stopwatch_pause_freezes_elapsed() {
    let state = make_state(&["--mode", "stopwatch"]);
    let app = create_router(Arc::clone(&state));

    send(&app, "POST", "/widget/start", None).await;
    state.deliver_tick(&tick(3)).unwrap();
    let (status, _) = send(&app, "POST", "/widget/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    state.deliver_tick(&tick(10)).unwrap();

    let (_, body) = send(&app, "POST", "/widget/resume", None).await;
    assert_eq!(body["widget"]["elapsed_secs"], 3);

    let (_, body) = send(&app, "POST", "/widget/reset", None).await;
    assert_eq!(body["widget"]["state"], "ready");
    assert_eq!(body["widget"]["elapsed_secs"], 0);
}

#[tokio::test]
async fn tournament_requires_both_team_names() {
    let app = create_router(make_state(&[]));
    let (status, body) = send(
        &app,
        "POST",
        "/tournament/match/start",
        Some(json!({"team1": "", "team2": "B", "minutes": 90})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation_error");

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["tournament"]["state"], "not_started");
}

#[tokio::test]
async fn full_time_then_manual_end_is_rejected() {
    let state = make_state(&[]);
    let app = create_router(Arc::clone(&state));
    let mut rx = state.notification_tx.subscribe();

    let (status, body) = send(
        &app,
        "POST",
        "/tournament/match/start",
        Some(json!({"team1": "A", "team2": "B", "minutes": 90})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["state"], "in_progress");

    let (_, body) = send(&app, "POST", "/tournament/match/goal", Some(json!({"side": "home"}))).await;
    assert_eq!(body["notification"]["event"], "goal_scored");
    assert_eq!(body["match"]["home"], 1);

    let produced = state.deliver_tick(&tick(90 * 60)).unwrap();
    assert_eq!(produced, vec![Notification::FullTime]);

    let (status, body) = send(&app, "POST", "/tournament/match/end", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_transition");

    let (status, body) = send(&app, "POST", "/tournament/match/log", Some(json!({"text": "handshakes"}))).await;
    assert_eq!(status, StatusCode::OK);
    let events = body["match"]["events"].as_array().unwrap();
    let kinds: Vec<_> = events.iter().map(|e| e["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["kickoff", "goal", "full_time", "note"]);
    assert_eq!(body["match"]["end_reason"], "full_time");

    assert!(matches!(rx.try_recv().unwrap(), Notification::GoalScored { .. }));
    assert_eq!(rx.try_recv().unwrap(), Notification::FullTime);
    assert!(rx.try_recv().is_err());

    send(
        &app,
        "POST",
        "/tournament/match/start",
        Some(json!({"team1": "C", "team2": "D"})),
    )
    .await;
    let (_, body) = send(&app, "GET", "/tournament/results", None).await;
    assert_eq!(body["results"][0]["team1"], "A");
    assert_eq!(body["results"][0]["home"], 1);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["tournament"]["duration_secs"], 90 * 60);
}

#[tokio::test]
async fn widget_controls_do_not_apply_to_football() {
    let app = create_router(make_state(&["--mode", "football"]));

    let (status, _) = send(&app, "POST", "/widget/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/widget/match/start",
        Some(json!({"team1": "Home", "team2": "Away", "minutes": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget"]["football"]["team1"], "Home");

    let (_, body) = send(&app, "POST", "/widget/match/end", None).await;
    assert_eq!(body["notification"]["event"], "match_ended");
    assert_eq!(body["notification"]["reason"], "manual");
}

#[tokio::test]
async fn alarm_needs_enable_and_fires_once() {
    let state = make_state(&["--alarm-past-target", "fire-now"]);
    let app = create_router(Arc::clone(&state));

    let (status, _) = send(&app, "POST", "/widget/alarm/arm", Some(json!({"time": "00:00:00"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, "POST", "/widget/alarm/enable", None).await;
    let (status, body) = send(&app, "POST", "/widget/alarm/arm", Some(json!({"time": "00:00:00"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget"]["alarm"]["message"], "Alarm!");

    let now = tick(1);
    assert_eq!(
        state.deliver_tick(&now).unwrap(),
        vec![Notification::Alarm {
            message: "Alarm!".to_string()
        }]
    );
    assert!(state.deliver_tick(&now).unwrap().is_empty());

    let (_, body) = send(&app, "POST", "/widget/alarm/disarm", None).await;
    assert_eq!(body["widget"]["alarm"]["enabled"], false);
    assert_eq!(body["widget"]["alarm"]["fired_today"], true);
}

#[tokio::test]
async fn past_alarm_rejected_by_default() {
    let app = create_router(make_state(&[]));
    send(&app, "POST", "/widget/alarm/enable", None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/widget/alarm/arm",
        Some(json!({"time": "11:59:59", "message": "late"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "invalid_configuration");

    let (status, body) = send(
        &app,
        "POST",
        "/widget/alarm/arm",
        Some(json!({"time": "12:30:00", "message": "lunch"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget"]["alarm"]["message"], "lunch");
}

#[tokio::test]
async fn widget_starts_a_new_match_after_full_time() {
    let state = make_state(&["--mode", "football"]);
    let app = create_router(Arc::clone(&state));

    send(
        &app,
        "POST",
        "/widget/match/start",
        Some(json!({"team1": "A", "team2": "B", "minutes": 1})),
    )
    .await;
    assert_eq!(state.deliver_tick(&tick(60)).unwrap(), vec![Notification::FullTime]);

    let (status, body) = send(
        &app,
        "POST",
        "/widget/match/start",
        Some(json!({"team1": "C", "team2": "D", "minutes": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget"]["state"], "in_progress");
    assert_eq!(body["widget"]["football"]["team1"], "C");
    assert_eq!(body["widget"]["football"]["started_at"], "2024-06-14T12:00:00");
}
