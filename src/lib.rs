//! # Bookwell - fluent request builders for a scheduling API
//!
//! Bookwell turns chained method calls into requests against a remote
//! scheduling API: appointments, services, time slots and the attendees
//! booked into them. Builders only accumulate state; a terminal method
//! (`get`, `book`, `cancel`) serializes it and hands it to a [`Transport`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookwell::{Attendee, Client, Conditional, LocationDetails, Notifications};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bookwell::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com/api/v2/open/")?
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     // GET times?location_id=1&service_id=2&start=...&end=...
//!     let slots = client
//!         .time_slots()
//!         .at(1)
//!         .for_services(2)
//!         .between("2024-01-01", "2024-01-07")
//!         .get()
//!         .await?;
//!     println!("Open slots: {}", slots.data);
//!
//!     // POST appointments with a JSON-API document
//!     let attendee = Attendee::new().located(LocationDetails {
//!         timezone: Some("America/Toronto".to_string()),
//!         ..Default::default()
//!     });
//!     let notify_staff = true;
//!
//!     let booked = client
//!         .appointments()
//!         .at(1)
//!         .for_services(2)
//!         .starting("2024-01-02T10:00:00-05:00")
//!         .with(attendee)
//!         .when(notify_staff, |appointment| {
//!             appointment.notify(Notifications {
//!                 client: Some(true),
//!                 user: Some(true),
//!             })
//!         })
//!         .book()
//!         .await?;
//!     println!("Booked: {}", booked.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Inspecting requests
//!
//! Every builder can produce its [`RequestDescriptor`] without sending it,
//! and [`MockTransport`] records what would have gone over the wire:
//!
//! ```
//! use bookwell::{Conditional, MockTransport, Service};
//! use serde_json::json;
//!
//! let request = Service::new(MockTransport::new())
//!     .assigned()
//!     .individual()
//!     .when(false, |service| service.invitable())
//!     .take(5)
//!     .request();
//!
//! assert_eq!(
//!     json!(request.query),
//!     json!({"filter[assignments]": true, "filter[group]": 0, "limit": 5})
//! );
//! ```
//!
//! ## Errors
//!
//! Builders never fail. Transport errors (network failures, non-2xx
//! responses, bodies that are not JSON) reach the caller as [`Error`]
//! without retries or translation.

mod client;
pub mod conditional;
mod error;
pub mod models;
pub mod params;
pub mod request;
pub mod resources;
mod response;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use conditional::Conditional;
pub use error::{Error, Result};
pub use models::{Answer, Attendee, LocationDetails, Model, ReachableDetails};
pub use params::{Identifier, OneOrMany, Params, Services};
pub use request::RequestDescriptor;
pub use resources::{
    Appointment, AppointmentFilter, AppointmentMatchers, Notifications, Service, ServiceFilter,
    TimeSlot, TimeSlotFilter,
};
pub use response::Response;
pub use transport::{MockTransport, Transport};
