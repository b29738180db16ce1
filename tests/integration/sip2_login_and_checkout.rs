//! End-to-end: a fake ACS over raw TCP, the gateway's real HTTP router in
//! front of it, and a plain HTTP client driving both a Login and a
//! Checkout exchange.

use std::time::Duration;

use serde_json::json;
use sip2_gateway::{AppState, build_router};
use sip2_pool::{CommunicatorOptions, ConnectionPool};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn checksum_frame(mut body: Vec<u8>) -> Vec<u8> {
    body.extend_from_slice(b"AY0AZ");
    let sum = sip2_protocol::compute_checksum(&body);
    body.extend_from_slice(format!("{sum:04X}").as_bytes());
    body.push(b'\n');
    body
}

async fn spawn_fake_acs(responses: Vec<Vec<u8>>) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        for response in responses {
            let mut request = Vec::new();
            loop {
                let mut chunk = [0u8; 128];
                let n = socket.read(&mut chunk).await.unwrap();
                request.extend_from_slice(&chunk[..n]);
                if request.ends_with(b"\r") {
                    break;
                }
            }
            socket.write_all(&response).await.unwrap();
        }
    });
    addr
}

async fn spawn_gateway(acs_addr: std::net::SocketAddr) -> std::net::SocketAddr {
    let pool = ConnectionPool::connect(acs_addr, 1, Duration::from_secs(2)).await.unwrap();
    let communicator = CommunicatorOptions::default();
    let deadline = sip2_gateway::outer_deadline(communicator.io_timeout, communicator.write_retries, communicator.read_retries);
    let state = AppState::new(pool, communicator);
    let router = build_router(state, deadline);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn login_then_checkout_round_trip_through_http() {
    let login_ok = checksum_frame(b"94Y|".to_vec());
    let checkout_ok = checksum_frame(
        [
            b"12".as_slice(),
            b"Y|N|N|N|",
            b"20240101    120000",
            b"00",
            b"AOlib1|AApatron1|ABitem1|AJtitle1|AH20240201    120000CIN|BHUSD",
            b"BV0.000000|CK001CHa|BKtxn1|AFok|AGline|",
        ]
        .concat(),
    );

    let acs_addr = spawn_fake_acs(vec![login_ok, checkout_ok]).await;
    let gateway_addr = spawn_gateway(acs_addr).await;
    let client = reqwest::Client::new();
    let base = format!("http://{gateway_addr}");

    let healthz = client.get(format!("{base}/healthz")).send().await.unwrap();
    assert_eq!(healthz.status(), 200);

    let login_response = client
        .post(format!("{base}/sip2"))
        .json(&json!({
            "header": {"method": "login"},
            "data": {
                "uid_algorithm": 0,
                "pwd_algorithm": 0,
                "login_user_id": "scuser",
                "login_password": "scpass",
                "location_code": "branch1",
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(login_response.status(), 200);
    let login_body: serde_json::Value = login_response.json().await.unwrap();
    assert_eq!(login_body["data"]["ok"], true);

    let checkout_response = client
        .post(format!("{base}/sip2"))
        .json(&json!({
            "header": {"method": "check_out"},
            "data": {
                "sc_renewal_policy": false,
                "no_block": false,
                "transaction_date": "2024-01-01 12:00:00",
                "nb_due_date": "2024-02-01 12:00:00",
                "institution_id": "lib1",
                "patron_id": "patron1",
                "item_id": "item1",
                "terminal_password": "term",
                "item_properties": ["a"],
                "patron_password": "pw",
                "fee_acknowledged": false,
                "cancel": false,
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(checkout_response.status(), 200);
    let checkout_body: serde_json::Value = checkout_response.json().await.unwrap();
    assert_eq!(checkout_body["data"]["ok"], true);
    assert_eq!(checkout_body["data"]["item_id"], "item1");
}

#[tokio::test]
async fn unknown_method_returns_404_with_error_envelope() {
    let acs_addr = spawn_fake_acs(vec![]).await;
    let gateway_addr = spawn_gateway(acs_addr).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{gateway_addr}/sip2"))
        .json(&json!({"header": {"method": "not_a_real_method"}, "data": {}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["code"], "UNKNOWN_METHOD");
}
