//! Service listings.

use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::conditional::Conditional;
use crate::params::{insert_present, Identifier, Params};
use crate::request::RequestDescriptor;
use crate::transport::Transport;
use crate::{Response, Result};

/// Filters accumulated by a [`Service`] builder. `None` means never set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Identifier>,
    /// `1` for group services, `0` for individual ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitable: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identifier>,
}

/// Builds a `GET services` request.
///
/// Filters are sent as `filter[...]` query parameters; paging and sorting
/// go to the top-level `page`, `limit` and `sort` parameters.
///
/// # Examples
///
/// ```
/// use bookwell::{MockTransport, Service};
///
/// let request = Service::new(MockTransport::new())
///     .at(1)
///     .in_category("haircuts")
///     .take(10)
///     .request();
///
/// assert_eq!(request.path, "services");
/// assert_eq!(request.query["filter[location]"], 1);
/// assert_eq!(request.query["filter[category]"], "haircuts");
/// assert_eq!(request.query["limit"], 10);
/// ```
#[derive(Debug, Clone)]
pub struct Service<T = Client> {
    transport: T,
    filters: ServiceFilter,
    page: Option<u32>,
    limit: Option<u32>,
    sortable: Option<String>,
}

impl<T> Service<T> {
    /// Creates a builder bound to `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            filters: ServiceFilter::default(),
            page: None,
            limit: None,
            sortable: None,
        }
    }

    /// Only services that have staff assigned.
    pub fn assigned(self) -> Self {
        self.assignment(true)
    }

    /// Filter on whether services have staff assigned.
    pub fn assignment(mut self, assigned: bool) -> Self {
        self.filters.assigned = Some(assigned);
        self
    }

    /// Services offered at a location.
    pub fn at(mut self, location: impl Into<Identifier>) -> Self {
        self.filters.location = Some(location.into());
        self
    }

    /// Services offered by a staff member.
    pub fn by(mut self, user: impl Into<Identifier>) -> Self {
        self.filters.user = Some(user.into());
        self
    }

    /// Services in a category.
    pub fn in_category(mut self, category: impl Into<Identifier>) -> Self {
        self.filters.category = Some(category.into());
        self
    }

    /// Only invite-only services.
    pub fn invitable(mut self) -> Self {
        self.filters.invitable = Some(1);
        self
    }

    /// Only group services. Shares its filter with [`individual`](Self::individual).
    pub fn group(mut self) -> Self {
        self.filters.group = Some(1);
        self
    }

    /// Only individual services. Shares its filter with [`group`](Self::group).
    pub fn individual(mut self) -> Self {
        self.filters.group = Some(0);
        self
    }

    /// The page of results to fetch.
    pub fn on(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// The number of results per page.
    pub fn take(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort specification, e.g. `"name,-created"`.
    pub fn sort_by(mut self, sortable: impl Into<String>) -> Self {
        self.sortable = Some(sortable.into());
        self
    }

    pub fn filters(&self) -> &ServiceFilter {
        &self.filters
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn sortable(&self) -> Option<&str> {
        self.sortable.as_deref()
    }

    /// The request [`get`](Self::get) sends.
    pub fn request(&self) -> RequestDescriptor {
        let filters = &self.filters;
        let mut params = Params::new();

        insert_present(&mut params, "filter[assignments]", filters.assigned.as_ref());
        insert_present(&mut params, "filter[category]", filters.category.as_ref());
        insert_present(&mut params, "filter[group]", filters.group.as_ref());
        insert_present(&mut params, "filter[invite_only]", filters.invitable.as_ref());
        insert_present(&mut params, "filter[location]", filters.location.as_ref());
        insert_present(&mut params, "filter[user]", filters.user.as_ref());
        insert_present(&mut params, "limit", self.limit.as_ref());
        insert_present(&mut params, "page", self.page.as_ref());
        insert_present(&mut params, "sort", self.sortable.as_ref());

        RequestDescriptor::get("services", params)
    }
}

impl<T: Transport> Service<T> {
    /// Fetches the services matching the accumulated filters.
    pub async fn get(&self) -> Result<Response<Value>> {
        self.transport.send(self.request()).await
    }
}

impl<T> Conditional for Service<T> {}
