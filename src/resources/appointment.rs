//! Appointment lookup, booking and cancellation.
//!
//! Booking serializes into a JSON-API style document:
//!
//! ```text
//! {
//!   "data": {
//!     "type": "appointments",
//!     "attributes": { ... },              // only with location, services or start
//!     "relationships": { "attendees": { "data": [ ... ] } }
//!   },
//!   "meta": { "notify": { ... }, "source": "..." }   // only the parts that were set
//! }
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::conditional::Conditional;
use crate::models::{Attendee, Model};
use crate::params::{to_value, Identifier, OneOrMany, Params, Services};
use crate::request::RequestDescriptor;
use crate::transport::Transport;
use crate::{Response, Result};

const RESOURCE: &str = "appointments";

/// Identifies an existing appointment when looking one up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentMatchers {
    /// Confirmation code.
    pub code: String,
    /// Email of an attendee.
    pub email: String,
    /// Appointment id.
    pub id: Identifier,
}

/// Who the API should notify about a booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Notifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<bool>,
}

/// Filters accumulated by an [`Appointment`] builder. `None` means never set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchers: Option<AppointmentMatchers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Notifications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<u64>,
}

#[derive(Serialize)]
struct BookingDocument<'a> {
    data: BookingData<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<BookingMeta<'a>>,
}

#[derive(Serialize)]
struct BookingData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<BookingAttributes<'a>>,
    relationships: BookingRelationships,
}

// staff_id and invitation_id are always sent, as null when unset.
#[derive(Serialize)]
struct BookingAttributes<'a> {
    invitation_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<&'a Services>,
    staff_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<&'a str>,
}

#[derive(Serialize)]
struct BookingRelationships {
    attendees: RelationshipData,
}

#[derive(Serialize)]
struct RelationshipData {
    data: Vec<Value>,
}

#[derive(Serialize)]
struct BookingMeta<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    notify: Option<&'a Notifications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

/// Builds appointment requests.
///
/// # Examples
///
/// ```
/// use bookwell::{Appointment, Attendee, MockTransport};
/// use serde_json::json;
///
/// let request = Appointment::new(MockTransport::new())
///     .at(1)
///     .for_services([2, 3])
///     .starting("2024-01-01T10:00")
///     .with(Attendee::new())
///     .book_request();
///
/// let body = request.body.unwrap();
/// assert_eq!(body["data"]["type"], "appointments");
/// assert_eq!(body["data"]["attributes"]["service_id"], json!([2, 3]));
/// assert_eq!(body["data"]["attributes"]["staff_id"], json!(null));
/// ```
#[derive(Debug, Clone)]
pub struct Appointment<T = Client> {
    transport: T,
    filters: AppointmentFilter,
    attendees: Vec<Attendee>,
}

impl<T> Appointment<T> {
    /// Creates a builder bound to `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            filters: AppointmentFilter::default(),
            attendees: Vec::new(),
        }
    }

    /// Book at a location.
    pub fn at(mut self, location: u64) -> Self {
        self.filters.location = Some(location);
        self
    }

    /// Book with a staff member.
    pub fn by(mut self, user: u64) -> Self {
        self.filters.user = Some(user);
        self
    }

    /// Book one service, or several in sequence.
    pub fn for_services(mut self, services: impl Into<Services>) -> Self {
        self.filters.services = Some(services.into());
        self
    }

    /// Look up the appointment identified by `matchers`.
    pub fn matching(mut self, matchers: AppointmentMatchers) -> Self {
        self.filters.matchers = Some(matchers);
        self
    }

    /// Ask the API to notify the client and/or the staff member.
    pub fn notify(mut self, notifications: Notifications) -> Self {
        self.filters.notifications = Some(notifications);
        self
    }

    /// Start time of the appointment, as the API formats it.
    pub fn starting(mut self, start: impl Into<String>) -> Self {
        self.filters.start = Some(start.into());
        self
    }

    /// Where the booking originated, e.g. a widget or campaign name.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.filters.source = Some(source.into());
        self
    }

    /// Book through an invitation.
    pub fn via(mut self, invitation: u64) -> Self {
        self.filters.invitation = Some(invitation);
        self
    }

    /// Attach attendees, replacing any attached before.
    pub fn with(mut self, attendees: impl Into<OneOrMany<Attendee>>) -> Self {
        self.attendees = attendees.into().into_vec();
        self
    }

    pub fn filters(&self) -> &AppointmentFilter {
        &self.filters
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// The request [`get`](Self::get) sends: the matchers as query parameters.
    pub fn request(&self) -> RequestDescriptor {
        let params = match to_value(&self.filters.matchers) {
            Value::Object(fields) => fields.into_iter().collect(),
            _ => Params::new(),
        };

        RequestDescriptor::get(RESOURCE, params)
    }

    /// The request [`book`](Self::book) sends.
    pub fn book_request(&self) -> RequestDescriptor {
        RequestDescriptor::post(RESOURCE, self.booking_document())
    }

    /// The request [`cancel`](Self::cancel) sends.
    ///
    /// The path comes from the arguments alone; the accumulated filters ride
    /// along as the body.
    pub fn cancel_request(&self, appointment: u64, attendee: u64) -> RequestDescriptor {
        RequestDescriptor::delete(
            format!("{}/{}/{}", RESOURCE, appointment, attendee),
            to_value(&self.filters),
        )
    }

    fn booking_document(&self) -> Value {
        if self.attendees.is_empty() {
            tracing::debug!("No attendees attached, booking document is empty");
            return Value::Object(Default::default());
        }

        let filters = &self.filters;

        let attributes = (filters.location.is_some()
            || filters.services.is_some()
            || filters.start.is_some())
        .then(|| BookingAttributes {
            invitation_id: filters.invitation,
            location_id: filters.location,
            service_id: filters.services.as_ref(),
            staff_id: filters.user,
            start: filters.start.as_deref(),
        });

        let meta = (filters.notifications.is_some() || filters.source.is_some()).then(|| {
            BookingMeta {
                notify: filters.notifications.as_ref(),
                source: filters.source.as_deref(),
            }
        });

        let document = BookingDocument {
            data: BookingData {
                kind: RESOURCE,
                attributes,
                relationships: BookingRelationships {
                    attendees: RelationshipData {
                        data: self.attendees.iter().map(Model::transform).collect(),
                    },
                },
            },
            meta,
        };

        to_value(&document)
    }
}

impl<T: Transport> Appointment<T> {
    /// Looks up appointments by the matchers set with [`matching`](Self::matching).
    pub async fn get(&self) -> Result<Response<Value>> {
        self.transport.send(self.request()).await
    }

    /// Books the appointment.
    ///
    /// Without attendees the API receives an empty document and answers
    /// with its own validation error.
    pub async fn book(&self) -> Result<Response<Value>> {
        self.transport.send(self.book_request()).await
    }

    /// Cancels `attendee`'s spot in `appointment`.
    pub async fn cancel(&self, appointment: u64, attendee: u64) -> Result<Response<Value>> {
        self.transport
            .send(self.cancel_request(appointment, attendee))
            .await
    }
}

impl<T> Conditional for Appointment<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationDetails;
    use crate::transport::MockTransport;
    use http::Method;
    use serde_json::json;

    fn appointment() -> Appointment<MockTransport> {
        Appointment::new(MockTransport::new())
    }

    fn matchers() -> AppointmentMatchers {
        AppointmentMatchers {
            code: "ABC123".to_string(),
            email: "ada@example.com".to_string(),
            id: Identifier::Number(42),
        }
    }

    #[test]
    fn setters_fill_their_own_key() {
        assert_eq!(
            appointment().at(1).filters(),
            &AppointmentFilter {
                location: Some(1),
                ..Default::default()
            }
        );
        assert_eq!(
            appointment().via(9).filters(),
            &AppointmentFilter {
                invitation: Some(9),
                ..Default::default()
            }
        );
        assert_eq!(
            appointment().source("widget").filters(),
            &AppointmentFilter {
                source: Some("widget".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn with_normalizes_single_attendee() {
        let appointment = appointment().with(Attendee::new());

        assert_eq!(appointment.attendees().len(), 1);
    }

    #[test]
    fn with_replaces_previous_attendees() {
        let appointment = appointment()
            .with(vec![Attendee::new(), Attendee::new()])
            .with(Attendee::new().messagable());

        assert_eq!(appointment.attendees(), &[Attendee::new().messagable()]);
    }

    #[test]
    fn booking_without_attendees_is_empty() {
        let request = appointment()
            .at(1)
            .for_services(2)
            .starting("2024-01-01T10:00")
            .notify(Notifications {
                client: Some(true),
                user: None,
            })
            .source("widget")
            .book_request();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "appointments");
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn booking_with_only_attendees_has_no_attributes_or_meta() {
        let body = appointment().with(Attendee::new()).book_request().body;

        assert_eq!(
            body,
            Some(json!({
                "data": {
                    "type": "appointments",
                    "relationships": {
                        "attendees": {
                            "data": [{"email": null, "first_name": null, "last_name": null}]
                        }
                    }
                }
            }))
        );
    }

    #[test]
    fn booking_attributes_default_staff_and_invitation_to_null() {
        let body = appointment()
            .with(Attendee::new())
            .at(1)
            .for_services([2, 3])
            .starting("2024-01-01T10:00")
            .book_request()
            .body
            .unwrap();

        assert_eq!(
            body["data"]["attributes"],
            json!({
                "location_id": 1,
                "service_id": [2, 3],
                "start": "2024-01-01T10:00",
                "staff_id": null,
                "invitation_id": null,
            })
        );
    }

    #[test]
    fn booking_attributes_carry_staff_and_invitation() {
        let body = appointment()
            .with(Attendee::new())
            .starting("2024-01-01T10:00")
            .by(5)
            .via(8)
            .book_request()
            .body
            .unwrap();

        assert_eq!(
            body["data"]["attributes"],
            json!({
                "start": "2024-01-01T10:00",
                "staff_id": 5,
                "invitation_id": 8,
            })
        );
    }

    #[test]
    fn staff_alone_does_not_create_attributes() {
        let body = appointment()
            .with(Attendee::new())
            .by(5)
            .via(8)
            .book_request()
            .body
            .unwrap();

        assert!(body["data"].get("attributes").is_none());
    }

    #[test]
    fn meta_contains_notify_and_source() {
        let body = appointment()
            .with(Attendee::new())
            .notify(Notifications {
                client: Some(true),
                user: Some(false),
            })
            .source("kiosk")
            .book_request()
            .body
            .unwrap();

        assert_eq!(
            body["meta"],
            json!({"notify": {"client": true, "user": false}, "source": "kiosk"})
        );
    }

    #[test]
    fn meta_source_alone() {
        let body = appointment()
            .with(Attendee::new())
            .source("kiosk")
            .book_request()
            .body
            .unwrap();

        assert_eq!(body["meta"], json!({"source": "kiosk"}));
    }

    #[test]
    fn attendees_are_transformed_in_order() {
        let first = Attendee::new().located(LocationDetails {
            city: Some("Toronto".to_string()),
            ..Default::default()
        });
        let second = Attendee::new().messagable();

        let body = appointment()
            .with([first.clone(), second.clone()])
            .book_request()
            .body
            .unwrap();

        assert_eq!(
            body["data"]["relationships"]["attendees"]["data"],
            json!([first.transform(), second.transform()])
        );
    }

    #[test]
    fn lookup_sends_matchers_as_params() {
        let request = appointment().matching(matchers()).request();

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            json!(request.query),
            json!({"code": "ABC123", "email": "ada@example.com", "id": 42})
        );
    }

    #[test]
    fn lookup_without_matchers_has_no_params() {
        let request = appointment().at(1).request();

        assert!(request.query.is_empty());
    }

    #[test]
    fn cancel_targets_appointment_and_attendee() {
        let request = appointment().cancel_request(10, 20);

        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "appointments/10/20");
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn cancel_passes_filters_through() {
        let request = appointment()
            .source("widget")
            .at(3)
            .cancel_request(10, 20);

        assert_eq!(request.body, Some(json!({"location": 3, "source": "widget"})));
    }

    #[test]
    fn when_attaches_conditionally() {
        let has_guest = false;

        let appointment = appointment()
            .with(Attendee::new())
            .when(has_guest, |appointment| {
                appointment.with(vec![Attendee::new(), Attendee::new()])
            })
            .when(true, |appointment| appointment.source("web"));

        assert_eq!(appointment.attendees().len(), 1);
        assert_eq!(appointment.filters().source.as_deref(), Some("web"));
    }

    #[tokio::test]
    async fn book_posts_the_document() {
        let transport = MockTransport::new();
        transport.respond_with(json!({"data": {"id": "1", "type": "appointments"}}));

        let appointment = Appointment::new(transport.clone())
            .with(Attendee::new())
            .at(1);
        let response = appointment.book().await.unwrap();

        assert_eq!(response.data["data"]["id"], "1");
        assert_eq!(transport.last_request(), Some(appointment.book_request()));
    }

    #[tokio::test]
    async fn booking_twice_resends_the_same_state() {
        let transport = MockTransport::new();
        let appointment = Appointment::new(transport.clone()).with(Attendee::new());

        appointment.book().await.unwrap();
        appointment.book().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let transport = MockTransport::new();
        transport.fail_with(crate::Error::HttpError {
            status: http::StatusCode::UNPROCESSABLE_ENTITY,
            raw_response: "{\"errors\":[]}".to_string(),
            headers: http::HeaderMap::new(),
        });

        let err = Appointment::new(transport)
            .cancel(1, 2)
            .await
            .unwrap_err();

        assert_eq!(err.raw_response(), Some("{\"errors\":[]}"));
    }
}
