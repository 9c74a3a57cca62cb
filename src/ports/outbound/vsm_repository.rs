use crate::shared::Result;

/// VsmRepository port for the value stream model
///
/// This port abstracts where the product graph comes from (the VSM GraphQL
/// API, or a response saved to disk) and how the product link pointing to
/// the published diagram is maintained.
pub trait VsmRepository {
    /// Fetches the raw GraphQL response for the product model query
    ///
    /// # Arguments
    /// * `product_name` - Exact name of the product to fetch
    ///
    /// # Returns
    /// The response body, shaped `{ "data": { "products": [...] } }`
    ///
    /// # Errors
    /// Returns an error if:
    /// - Authentication fails
    /// - The network request fails or returns a non-success status
    /// - The API reports GraphQL errors
    fn fetch_product_graph(&self, product_name: &str) -> Result<String>;

    /// Points the product's diagram link at `diagram_url`
    ///
    /// Updates the link `existing_link_id` when given, otherwise inserts a new
    /// link named `link_name` on `product_id`.
    fn update_product_link(
        &self,
        link_name: &str,
        diagram_url: &str,
        product_id: Option<&str>,
        existing_link_id: Option<&str>,
    ) -> Result<()>;
}
