use crate::application::dto::{DiagramRequest, DiagramResponse};
use crate::shared::Result;

/// DiagramGenerationPort - Inbound port for the diagram generation use case
///
/// This port defines the interface that external adapters (CLI, schedulers)
/// use to trigger a run. It represents the application's public API.
pub trait DiagramGenerationPort {
    /// Fetches, normalizes, lays out and renders the product graph, then
    /// publishes it unless the request is a dry run
    ///
    /// # Errors
    /// Returns an error if:
    /// - The VSM response cannot be fetched or is malformed
    /// - The existing diagram cannot be fetched or updated
    /// - Publishing the new diagram or updating the product link fails
    fn generate_diagram(&self, request: DiagramRequest) -> Result<DiagramResponse>;
}
