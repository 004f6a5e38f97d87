//! Wire-level integration tests: a real TCP server speaking the
//! line-delimited JSON transport, driven turn by turn.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use leavedesk::calendar::CalendarSet;
use leavedesk::engine::Engine;
use leavedesk::wire;

const CALENDAR: &str = r#"{
    "public-holidays": [
        {"date": "2019-08-15", "day": "Thursday", "reason": "Independence Day"},
        {"date": "2019-12-25", "day": "Wednesday", "reason": "Christmas"}
    ],
    "flexible": [
        {"date": "2019-01-14", "day": "Monday", "reason": "Makar Sankranti"},
        {"date": "2019-09-10", "day": "Tuesday", "reason": "Muharram"}
    ]
}"#;

async fn start_server() -> SocketAddr {
    let engine = Arc::new(Engine::new(CalendarSet::from_json(CALENDAR).unwrap()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let engine = engine.clone();
            tokio::spawn(async move {
                let _ = wire::process_connection(socket, engine).await;
            });
        }
    });
    addr
}

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let socket = TcpStream::connect(addr).await.unwrap();
        let (read, write) = socket.into_split();
        Self {
            reader: BufReader::new(read),
            writer: write,
        }
    }

    async fn send_line(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
    }

    async fn send(&mut self, activity: &Value) {
        self.send_line(&activity.to_string()).await;
    }

    async fn recv(&mut self) -> Value {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await.unwrap();
        assert!(n > 0, "server closed the connection");
        serde_json::from_str(&line).unwrap()
    }
}

fn message(text: &str, intent: &str, entities: Value) -> Value {
    json!({
        "type": "message",
        "conversation": "wire-c1",
        "user": "wire-u1",
        "text": text,
        "recognized": {"topIntent": intent, "entities": entities}
    })
}

#[tokio::test]
async fn greeting_and_public_listing() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    client
        .send(&json!({
            "type": "conversation_update",
            "conversation": "wire-c1",
            "members_added": ["wire-u1"],
            "recipient": "leavedesk"
        }))
        .await;
    let greeting = client.recv().await;
    assert_eq!(greeting["kind"], "text");

    client
        .send(&message("show holidays", "list_public_holidays", json!([])))
        .await;
    let card = client.recv().await;
    assert_eq!(card["kind"], "card");
    assert_eq!(card["card"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(card["card"]["rows"][0]["reason"], "Independence Day");
}

#[tokio::test]
async fn flexible_flow_over_the_wire() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    client
        .send(&message("flexible?", "list_flexible_holidays", json!([])))
        .await;
    let options = client.recv().await;
    assert_eq!(options["kind"], "options");
    assert_eq!(options["options"]["options"].as_array().unwrap().len(), 2);
    let prompt = client.recv().await;
    assert_eq!(prompt["kind"], "text");
    assert_eq!(prompt["text"], "Select to avail any flexible leave");

    // Numeric answer in a turn with no recognized intent.
    client.send(&message("1", "none", json!([]))).await;
    let confirmation = client.recv().await;
    assert!(
        confirmation["text"]
            .as_str()
            .unwrap()
            .contains("2019-09-10")
    );

    // The listing intent reflects the commit.
    client
        .send(&message(
            "my flexible days",
            "submitted_requests",
            json!([{"type": "category", "value": "flexible"}]),
        ))
        .await;
    let card = client.recv().await;
    assert_eq!(card["card"]["rows"].as_array().unwrap().len(), 1);
    assert_eq!(card["card"]["rows"][0]["date"], "2019-09-10");
}

#[tokio::test]
async fn leave_request_flow_over_the_wire() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    client
        .send(&message(
            "leaves in march",
            "leave_request",
            json!([{
                "type": "daterange",
                "resolution": {"values": [{"start": "2019-03-04", "end": "2019-03-08"}]}
            }]),
        ))
        .await;
    let prompt = client.recv().await;
    assert_eq!(prompt["text"], "Reason behind these leaves?");

    client.send(&message("vacation", "none", json!([]))).await;
    let granted = client.recv().await;
    assert_eq!(
        granted["text"],
        "Planned leaves were granted and they got added to your total holidays."
    );

    client
        .send(&message(
            "my planned days",
            "submitted_requests",
            json!([{"type": "category", "value": "planned"}]),
        ))
        .await;
    let card = client.recv().await;
    let rows = card["card"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r["reason"] == "vacation"));
}

#[tokio::test]
async fn malformed_line_costs_the_turn_not_the_connection() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    client.send_line("this is not json").await;
    let error = client.recv().await;
    assert_eq!(error["kind"], "text");
    assert!(
        error["text"]
            .as_str()
            .unwrap()
            .starts_with("Could not read that activity")
    );

    // The connection still serves real turns.
    client
        .send(&message("show holidays", "list_public_holidays", json!([])))
        .await;
    let card = client.recv().await;
    assert_eq!(card["kind"], "card");
}

#[tokio::test]
async fn unknown_activity_type_is_acknowledged() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    client.send(&json!({"type": "typing"})).await;
    let ack = client.recv().await;
    assert_eq!(ack["text"], "[typing]-type activity detected.");
}
