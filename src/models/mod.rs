//! Entities attached to write requests as relationships.

mod attendee;

pub use attendee::{Answer, Attendee, LocationDetails, ReachableDetails};

use serde_json::Value;

/// An entity that can be embedded in a request document.
pub trait Model {
    /// Snapshot of the entity's attributes in wire shape.
    fn transform(&self) -> Value;
}
