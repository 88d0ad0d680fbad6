//! The person an appointment is booked for.

use serde::Serialize;
use serde_json::{Map, Value};

use super::Model;
use crate::params::{to_value, OneOrMany};

/// An answer to one of the booking questions configured on the API side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Id of the question being answered.
    pub question: u64,
    /// The answer text.
    pub value: String,
}

impl Answer {
    /// Creates an answer for `question`.
    pub fn new(question: u64, value: impl Into<String>) -> Self {
        Self {
            question,
            value: value.into(),
        }
    }
}

/// Where an attendee is located. Only the fields that are set get merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Phone numbers an attendee can be reached at.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReachableDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
}

/// An attendee of an appointment.
///
/// Attributes accumulate through chained setters. `email`, `first_name` and
/// `last_name` start out as `null`; everything else is absent until set.
///
/// # Examples
///
/// ```
/// use bookwell::{Answer, Attendee, LocationDetails, Model};
///
/// let attendee = Attendee::new()
///     .answers(Answer::new(12, "Yes"))
///     .located(LocationDetails {
///         city: Some("Toronto".to_string()),
///         ..Default::default()
///     })
///     .messagable();
///
/// let snapshot = attendee.transform();
/// assert_eq!(snapshot["city"], "Toronto");
/// assert_eq!(snapshot["messagable"], true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    attributes: Map<String, Value>,
}

impl Attendee {
    /// Creates an attendee with only the null contact placeholders set.
    pub fn new() -> Self {
        let mut attributes = Map::new();
        attributes.insert("email".to_string(), Value::Null);
        attributes.insert("first_name".to_string(), Value::Null);
        attributes.insert("last_name".to_string(), Value::Null);

        Self { attributes }
    }

    /// Sets the booking question answers, replacing earlier ones.
    pub fn answers(mut self, answers: impl Into<OneOrMany<Answer>>) -> Self {
        let answers = answers.into().into_vec();
        self.attributes
            .insert("answers".to_string(), to_value(&answers));
        self
    }

    /// Merges location details into the attributes.
    ///
    /// Each field that is set overwrites the attribute of the same name;
    /// attributes not mentioned in `details` keep their values.
    pub fn located(mut self, details: LocationDetails) -> Self {
        if let Value::Object(fields) = to_value(&details) {
            for (key, value) in fields {
                self.attributes.insert(key, value);
            }
        }
        self
    }

    /// Marks the attendee as accepting text messages.
    pub fn messagable(mut self) -> Self {
        self.attributes
            .insert("messagable".to_string(), Value::Bool(true));
        self
    }

    // The four setters below are accepted but not yet sent: the booking
    // endpoint's attribute names for them are unconfirmed.

    /// Accepted for chaining; does not change the attributes.
    pub fn named(self, _first: impl Into<String>, _last: impl Into<String>) -> Self {
        self
    }

    /// Accepted for chaining; does not change the attributes.
    pub fn provided(self, _notes: impl Into<String>) -> Self {
        self
    }

    /// Accepted for chaining; does not change the attributes.
    pub fn reachable(self, _details: ReachableDetails) -> Self {
        self
    }

    /// Accepted for chaining; does not change the attributes.
    pub fn speaks(self, _lang: impl Into<String>) -> Self {
        self
    }

    /// The attributes accumulated so far.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl Default for Attendee {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for Attendee {
    fn transform(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_attendee_has_null_contact_fields() {
        assert_eq!(
            Attendee::new().transform(),
            json!({"email": null, "first_name": null, "last_name": null})
        );
    }

    #[test]
    fn single_answer_is_normalized_to_a_list() {
        let attendee = Attendee::new().answers(Answer::new(1, "Blue"));

        assert_eq!(
            attendee.attributes()["answers"],
            json!([{"question": 1, "value": "Blue"}])
        );
    }

    #[test]
    fn answers_replace_previous_answers() {
        let attendee = Attendee::new()
            .answers(vec![Answer::new(1, "Blue"), Answer::new(2, "No")])
            .answers(Answer::new(3, "Maybe"));

        assert_eq!(
            attendee.attributes()["answers"],
            json!([{"question": 3, "value": "Maybe"}])
        );
    }

    #[test]
    fn located_merges_without_clobbering_other_fields() {
        let attendee = Attendee::new()
            .located(LocationDetails {
                city: Some("Ottawa".to_string()),
                country: Some("CA".to_string()),
                ..Default::default()
            })
            .located(LocationDetails {
                city: Some("Toronto".to_string()),
                postcode: Some("M5V".to_string()),
                ..Default::default()
            });

        let attributes = attendee.attributes();
        assert_eq!(attributes["city"], "Toronto");
        assert_eq!(attributes["country"], "CA");
        assert_eq!(attributes["postcode"], "M5V");
        assert!(!attributes.contains_key("region"));
        assert_eq!(attributes["email"], Value::Null);
    }

    #[test]
    fn empty_location_details_change_nothing() {
        let attendee = Attendee::new().located(LocationDetails::default());

        assert_eq!(attendee, Attendee::new());
    }

    #[test]
    fn messagable_sets_flag() {
        let attendee = Attendee::new().messagable();

        assert_eq!(attendee.attributes()["messagable"], json!(true));
    }

    #[test]
    fn unconfirmed_setters_leave_attributes_untouched() {
        let attendee = Attendee::new()
            .named("Ada", "Lovelace")
            .provided("Prefers mornings")
            .reachable(ReachableDetails {
                phone: Some("555-0100".to_string()),
                ..Default::default()
            })
            .speaks("en");

        assert_eq!(attendee, Attendee::new());
    }
}
