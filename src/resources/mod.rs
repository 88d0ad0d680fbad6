//! Fluent builders, one per API resource.
//!
//! Setters take the builder by value and hand it back, so a request reads as
//! a single chain. Nothing is sent until a terminal method (`get`, `book`,
//! `cancel`) is awaited; the `*_request` methods expose what would be sent.

mod appointment;
mod service;
mod time_slot;

pub use appointment::{Appointment, AppointmentFilter, AppointmentMatchers, Notifications};
pub use service::{Service, ServiceFilter};
pub use time_slot::{TimeSlot, TimeSlotFilter};
