//! Finds an open slot and books it.
//!
//! This demo shows how to:
//! - Configure a client against the scheduling API
//! - Chain filters on a time slot query
//! - Book an appointment for an attendee, notifying staff only when asked
//!
//! Run with: `cargo run --example book_appointment -- https://api.example.com/api/v2/open/`

use bookwell::{Answer, Attendee, Client, Conditional, Error, LocationDetails, Notifications};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("bookwell=debug,book_appointment=info")
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080/".to_string());
    let notify_staff = std::env::var("NOTIFY_STAFF").is_ok();

    let client = Client::builder()
        .base_url(&base_url)?
        .timeout(Duration::from_secs(15))
        .build()?;

    println!("=== Open slots ===");
    let slots = client
        .time_slots()
        .at(1)
        .for_services(2)
        .between("2024-01-01", "2024-01-07")
        .in_timezone("America/Toronto")
        .get()
        .await?;

    let Some(start) = slots.data[0]["start"].as_str().map(str::to_string) else {
        println!("No open slots returned: {}", slots.data);
        return Ok(());
    };
    println!("First open slot: {}", start);

    println!("=== Booking ===");
    let attendee = Attendee::new()
        .answers(Answer::new(1, "First visit"))
        .located(LocationDetails {
            timezone: Some("America/Toronto".to_string()),
            ..Default::default()
        })
        .messagable();

    let booked = client
        .appointments()
        .at(1)
        .for_services(2)
        .starting(start)
        .with(attendee)
        .source("book_appointment demo")
        .when(notify_staff, |appointment| {
            appointment.notify(Notifications {
                client: Some(true),
                user: Some(true),
            })
        })
        .book()
        .await?;

    println!("Status: {}", booked.status);
    println!("Request latency: {:?}", booked.latency);
    println!("Response: {}", booked.data);

    Ok(())
}
