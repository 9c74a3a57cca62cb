use std::sync::{Arc, Mutex};
use vsm_diagram::prelude::*;

/// A recorded `update_product_link` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUpdate {
    pub link_name: String,
    pub diagram_url: String,
    pub product_id: Option<String>,
    pub existing_link_id: Option<String>,
}

/// Mock VsmRepository serving a canned GraphQL response
#[derive(Clone)]
pub struct MockVsmRepository {
    pub response: String,
    pub should_fail: bool,
    pub link_updates: Arc<Mutex<Vec<LinkUpdate>>>,
}

impl MockVsmRepository {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            should_fail: false,
            link_updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    pub fn get_link_updates(&self) -> Vec<LinkUpdate> {
        self.link_updates.lock().unwrap().clone()
    }
}

impl VsmRepository for MockVsmRepository {
    fn fetch_product_graph(&self, _product_name: &str) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock VSM repository failure");
        }
        Ok(self.response.clone())
    }

    fn update_product_link(
        &self,
        link_name: &str,
        diagram_url: &str,
        product_id: Option<&str>,
        existing_link_id: Option<&str>,
    ) -> Result<()> {
        self.link_updates.lock().unwrap().push(LinkUpdate {
            link_name: link_name.to_string(),
            diagram_url: diagram_url.to_string(),
            product_id: product_id.map(str::to_string),
            existing_link_id: existing_link_id.map(str::to_string),
        });
        Ok(())
    }
}
