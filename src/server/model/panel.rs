//! Resources of the hosting panel's application API.
//!
//! The panel wraps every resource as `{object, attributes}` and every listing as
//! `{object: "list", data, meta}`. Only the attributes this service reads are modeled.

use serde::{Deserialize, Serialize};

/// Single resource envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<T> {
    pub attributes: T,
}

/// Listing envelope returned by index endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<Resource<T>>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub total_pages: u32,
}

impl<T> ListResponse<T> {
    /// Whether the panel reports a page after `page`, the page that was requested.
    ///
    /// Only `total_pages` is trusted; the `current_page` echoed by the panel is ignored.
    /// Listings without pagination metadata are treated as a single page.
    pub fn has_page_after(&self, page: u32) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|meta| page < meta.pagination.total_pages)
    }

    /// Unwraps the resource envelopes.
    pub fn into_attributes(self) -> Vec<T> {
        self.data.into_iter().map(|r| r.attributes).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelUser {
    pub id: u64,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// IP and port pair on a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Allocation {
    pub id: u64,
    pub ip: String,
    pub port: u16,
    /// Whether a server already holds this allocation.
    pub assigned: bool,
}

/// Parameters for registering a panel user for a Discord identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePanelUserParam {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Discord id, used to find the user again on later requests.
    pub external_id: String,
    pub password: String,
}
