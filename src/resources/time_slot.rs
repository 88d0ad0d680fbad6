//! Bookable time slots.

use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::conditional::Conditional;
use crate::params::{insert_present, Params, Services};
use crate::request::RequestDescriptor;
use crate::transport::Transport;
use crate::{Response, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSlotFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<u64>,
}

/// Builds a `GET times` request for open slots.
#[derive(Debug, Clone)]
pub struct TimeSlot<T = Client> {
    transport: T,
    filters: TimeSlotFilter,
}

impl<T> TimeSlot<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            filters: TimeSlotFilter::default(),
        }
    }

    pub fn at(mut self, location: u64) -> Self {
        self.filters.location = Some(location);
        self
    }

    /// Slots starting between `start` and `end`.
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.filters.start = Some(start.into());
        self.filters.end = Some(end.into());
        self
    }

    /// Slots with a given staff member.
    pub fn by(mut self, user: u64) -> Self {
        self.filters.user = Some(user);
        self
    }

    pub fn for_services(mut self, services: impl Into<Services>) -> Self {
        self.filters.services = Some(services.into());
        self
    }

    /// Timezone the API should express slot times in.
    pub fn in_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.filters.timezone = Some(timezone.into());
        self
    }

    /// Only slots with staff speaking one of `locales`.
    pub fn supporting<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    pub fn filters(&self) -> &TimeSlotFilter {
        &self.filters
    }

    /// The request [`get`](Self::get) sends.
    pub fn request(&self) -> RequestDescriptor {
        let filters = &self.filters;
        let mut params = Params::new();

        insert_present(&mut params, "end", filters.end.as_ref());
        insert_present(&mut params, "location_id", filters.location.as_ref());
        insert_present(&mut params, "service_id", filters.services.as_ref());
        insert_present(&mut params, "start", filters.start.as_ref());
        insert_present(&mut params, "supported_locales", filters.locales.as_ref());
        insert_present(&mut params, "timezone", filters.timezone.as_ref());
        insert_present(&mut params, "staff_id", filters.user.as_ref());

        RequestDescriptor::get("times", params)
    }
}

impl<T: Transport> TimeSlot<T> {
    /// Fetches the open slots matching the accumulated filters.
    pub async fn get(&self) -> Result<Response<Value>> {
        self.transport.send(self.request()).await
    }
}

impl<T> Conditional for TimeSlot<T> {}
