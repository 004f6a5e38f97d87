//! Turn-throughput stress harness: drives the engine directly through the
//! listing and leave-request flows and prints latency percentiles.

use std::time::{Duration, Instant};

use serde_json::json;

use leavedesk::calendar::CalendarSet;
use leavedesk::engine::Engine;
use leavedesk::intent::{Activity, RecognizedResult};

const CONVERSATIONS: usize = 10_000;

const CALENDAR: &str = r#"{
    "public-holidays": [
        {"date": "2019-01-26", "day": "Saturday", "reason": "Republic Day"},
        {"date": "2019-08-15", "day": "Thursday", "reason": "Independence Day"},
        {"date": "2019-10-02", "day": "Wednesday", "reason": "Gandhi Jayanti"},
        {"date": "2019-12-25", "day": "Wednesday", "reason": "Christmas"}
    ],
    "flexible": [
        {"date": "2019-01-14", "day": "Monday", "reason": "Makar Sankranti"},
        {"date": "2019-09-10", "day": "Tuesday", "reason": "Muharram"}
    ]
}"#;

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.2}us, p50={:.2}us, p95={:.2}us, p99={:.2}us, max={:.2}us",
        latencies.len(),
        avg.as_secs_f64() * 1e6,
        percentile(latencies, 50.0).as_secs_f64() * 1e6,
        percentile(latencies, 95.0).as_secs_f64() * 1e6,
        percentile(latencies, 99.0).as_secs_f64() * 1e6,
        latencies.last().unwrap().as_secs_f64() * 1e6,
    );
}

fn recognized(value: serde_json::Value) -> RecognizedResult {
    serde_json::from_value(value).expect("bench recognition parses")
}

fn timed(engine: &Engine, activity: &Activity, bucket: &mut Vec<Duration>) {
    let start = Instant::now();
    let out = engine.process_turn(activity);
    bucket.push(start.elapsed());
    assert!(!out.is_empty(), "every bench turn expects a response");
}

fn main() {
    let engine = Engine::new(CalendarSet::from_json(CALENDAR).expect("bench calendar parses"));

    let mut listing = Vec::with_capacity(CONVERSATIONS);
    let mut request = Vec::with_capacity(CONVERSATIONS);
    let mut commit = Vec::with_capacity(CONVERSATIONS);

    println!("leavedesk turn stress: {CONVERSATIONS} conversations");
    let wall = Instant::now();

    for i in 0..CONVERSATIONS {
        let conversation = format!("c{i}");
        let user = format!("u{i}");

        timed(
            &engine,
            &Activity::message(
                &conversation,
                &user,
                "show public holidays",
                Some(recognized(
                    json!({"topIntent": "list_public_holidays", "entities": []}),
                )),
            ),
            &mut listing,
        );

        timed(
            &engine,
            &Activity::message(
                &conversation,
                &user,
                "leaves in march",
                Some(recognized(json!({
                    "topIntent": "leave_request",
                    "entities": [{
                        "type": "daterange",
                        "resolution": {"values": [{"start": "2019-03-04", "end": "2019-03-08"}]}
                    }]
                }))),
            ),
            &mut request,
        );

        timed(
            &engine,
            &Activity::message(
                &conversation,
                &user,
                "vacation",
                Some(recognized(json!({"topIntent": "none", "entities": []}))),
            ),
            &mut commit,
        );
    }

    let elapsed = wall.elapsed();
    let turns = CONVERSATIONS * 3;
    println!(
        "  total: {turns} turns in {:.2}s ({:.0} turns/s)",
        elapsed.as_secs_f64(),
        turns as f64 / elapsed.as_secs_f64()
    );
    print_latency("list_public_holidays", &mut listing);
    print_latency("leave_request (enumerate)", &mut request);
    print_latency("reason commit", &mut commit);
}
