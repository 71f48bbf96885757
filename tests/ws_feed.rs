//! WebSocket feed tests against a live server.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(3);

async fn connect(addr: std::net::SocketAddr) -> Ws {
    let Ok((ws, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await else {
        panic!("ws connect failed");
    };
    ws
}

async fn next_json(ws: &mut Ws) -> Value {
    loop {
        let Ok(Some(Ok(msg))) = tokio::time::timeout(WAIT, ws.next()).await else {
            panic!("no message within {WAIT:?}");
        };
        if let Ok(text) = msg.to_text()
            && !text.is_empty()
        {
            return serde_json::from_str(text).unwrap_or_default();
        }
    }
}

/// Skips feed updates until a message matching `pred` arrives.
async fn next_matching(ws: &mut Ws, pred: impl Fn(&Value) -> bool) -> Value {
    loop {
        let msg = next_json(ws).await;
        if pred(&msg) {
            return msg;
        }
    }
}

async fn send_command(ws: &mut Ws, id: &str, payload: Value) {
    let msg = json!({
        "id": id,
        "type": "command",
        "timestamp": chrono::Utc::now(),
        "payload": payload,
    });
    if ws.send(Message::text(msg.to_string())).await.is_err() {
        panic!("ws send failed");
    }
}

fn is_feed_update(msg: &Value) -> bool {
    msg["payload"]["event_type"] == "feed_update"
}

#[tokio::test]
async fn feed_streams_bounded_frames() {
    let addr = common::spawn_server().await;
    let mut ws = connect(addr).await;

    let first = next_json(&mut ws).await;
    assert_eq!(first["type"], "event");
    assert!(is_feed_update(&first));
    assert_eq!(first["payload"]["revision"], 1);
    assert_eq!(first["payload"]["frame"]["items"].as_array().map(Vec::len), Some(1));
    let first_id = first["payload"]["inserted"].clone();

    let mut last = first;
    for expected in 2..=20_u64 {
        last = next_json(&mut ws).await;
        assert_eq!(last["payload"]["revision"], expected, "updates arrive in order");
        let items = last["payload"]["frame"]["items"].as_array().map(Vec::len);
        assert!(items.unwrap_or(0) <= 15);
        assert_eq!(last["payload"]["frame"]["items"][0]["transition"], "enter");
    }

    let items = last["payload"]["frame"]["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 15);
    assert!(items.iter().all(|i| i["id"] != first_id));
    assert!(items.iter().all(|i| {
        let p = i["priority"].as_str().unwrap_or_default();
        p == "medium" || p == "critical"
    }));
    assert_eq!(last["payload"]["frame"]["exiting"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn navigation_stops_and_restarts_feed() {
    let addr = common::spawn_server().await;
    let mut ws = connect(addr).await;
    assert!(is_feed_update(&next_json(&mut ws).await));

    send_command(&mut ws, "nav-1", json!({"command": "navigate", "view": "campaigns"})).await;
    let response = next_matching(&mut ws, |m| m["id"] == "nav-1").await;
    assert_eq!(response["type"], "response");
    assert_eq!(response["payload"]["feed_mounted"], false);

    let changed = next_json(&mut ws).await;
    assert_eq!(changed["payload"]["event_type"], "view_changed");
    assert_eq!(changed["payload"]["view"], "campaigns");

    let quiet = tokio::time::timeout(common::TICK * 6, ws.next()).await;
    assert!(quiet.is_err(), "no feed updates off the dashboard route");

    send_command(&mut ws, "nav-2", json!({"command": "navigate", "view": "dashboard"})).await;
    let _ = next_matching(&mut ws, |m| m["id"] == "nav-2").await;
    let update = next_matching(&mut ws, is_feed_update).await;
    assert_eq!(update["payload"]["revision"], 1, "remounted feed starts over");
}

#[tokio::test]
async fn get_feed_and_errors() {
    let addr = common::spawn_server().await;
    let mut ws = connect(addr).await;

    send_command(&mut ws, "g-1", json!({"command": "get_feed"})).await;
    let frame = next_matching(&mut ws, |m| m["id"] == "g-1").await;
    assert_eq!(frame["type"], "response");
    assert_eq!(frame["payload"]["badge"], "Live");

    send_command(&mut ws, "bad", json!({"command": "navigate", "view": "settings"})).await;
    let err = next_matching(&mut ws, |m| m["id"] == "bad").await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["payload"]["code"], 1002);
}

#[tokio::test]
async fn subscribed_views_see_trigger_executions() {
    let addr = common::spawn_server().await;
    let mut ws = connect(addr).await;

    send_command(&mut ws, "s-1", json!({"command": "subscribe", "topics": ["trigger_executed"]})).await;
    let ack = next_matching(&mut ws, |m| m["id"] == "s-1").await;
    assert_eq!(ack["payload"]["subscribed"], json!(["trigger_executed"]));

    let posted = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/trigger/execute"))
        .json(&json!({"customer_id": "cust_77", "event_type": "location_entry", "platform": "android"}))
        .send()
        .await;
    assert!(posted.is_ok());

    let event = next_matching(&mut ws, |m| m["payload"]["event_type"] == "trigger_executed").await;
    assert_eq!(event["type"], "event");
    assert_eq!(event["payload"]["execution"]["target_channel"], "sms");
    assert_eq!(event["payload"]["triggers_executed"], 1);
}
