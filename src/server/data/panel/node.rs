use dioxus_logger::tracing;

use crate::server::{
    data::panel::PanelClient,
    error::panel::PanelError,
    model::panel::{Allocation, ListResponse, Node},
};

/// Repository for nodes and their network allocations.
pub struct NodeRepository<'a> {
    client: PanelClient<'a>,
}

impl<'a> NodeRepository<'a> {
    pub fn new(client: PanelClient<'a>) -> Self {
        Self { client }
    }

    /// Lists every node, following pagination.
    ///
    /// # Returns
    /// - `Ok(Vec<Node>)` - Nodes in the order the panel lists them
    /// - `Err(PanelError)` - Any page failed to load
    pub async fn get_all(&self) -> Result<Vec<Node>, PanelError> {
        let mut nodes = Vec::new();
        let mut page = 1;

        loop {
            let listing: ListResponse<Node> = self.client.list_page("nodes", page, &[]).await?;
            let has_next_page = listing.has_page_after(page);
            nodes.extend(listing.into_attributes());

            if !has_next_page {
                break;
            }
            page += 1;
        }

        Ok(nodes)
    }

    /// Finds the first unassigned allocation on a node.
    ///
    /// Pages are fetched in order and the scan stops at the first match, so later pages are
    /// only requested when earlier ones are fully assigned.
    ///
    /// # Arguments
    /// - `node_id` - Panel id of the node
    ///
    /// # Returns
    /// - `Ok(Some(Allocation))` - First free allocation in listing order
    /// - `Ok(None)` - Every allocation on the node is assigned
    /// - `Err(PanelError)` - Any page failed to load
    pub async fn first_free_allocation(
        &self,
        node_id: u64,
    ) -> Result<Option<Allocation>, PanelError> {
        let path = format!("nodes/{}/allocations", node_id);
        let mut page = 1;

        loop {
            let listing: ListResponse<Allocation> = self.client.list_page(&path, page, &[]).await?;
            let has_next_page = listing.has_page_after(page);

            if let Some(allocation) = listing
                .into_attributes()
                .into_iter()
                .find(|allocation| !allocation.assigned)
            {
                return Ok(Some(allocation));
            }

            if !has_next_page {
                tracing::debug!("Node {} has no free allocation", node_id);
                return Ok(None);
            }
            page += 1;
        }
    }
}
