use crate::ports::outbound::VsmRepository;
use crate::shared::error::VsmDiagramError;
use crate::shared::security::{read_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use log::info;
use std::path::PathBuf;

/// ResponseFileReader adapter serving a saved GraphQL response
///
/// This adapter implements the VsmRepository port for offline runs: the
/// product graph comes from a file captured earlier, and the product link
/// cannot be changed.
pub struct ResponseFileReader {
    path: PathBuf,
}

impl ResponseFileReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl VsmRepository for ResponseFileReader {
    fn fetch_product_graph(&self, product_name: &str) -> Result<String> {
        info!(path:? = self.path, product = product_name; "Reading saved VSM response");
        read_regular_file(&self.path, "GraphQL response", MAX_FILE_SIZE)
    }

    fn update_product_link(
        &self,
        _link_name: &str,
        _diagram_url: &str,
        _product_id: Option<&str>,
        _existing_link_id: Option<&str>,
    ) -> Result<()> {
        Err(VsmDiagramError::Publish {
            operation: "update product link".to_string(),
            details: format!(
                "product data was read from {}; links can only be updated against the VSM API",
                self.path.display()
            ),
        }
        .into())
    }
}
