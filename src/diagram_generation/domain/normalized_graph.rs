use super::{Api, ContentHash, Product, Service};
use indexmap::IndexMap;

/// NormalizedGraph aggregate - the flattened, deduplicated VSM model of one run
///
/// Maps iterate in discovery order, which is also the order used for layout
/// and rendering.
#[derive(Debug, Clone)]
pub struct NormalizedGraph {
    products: IndexMap<String, Product>,
    services: IndexMap<String, Service>,
    apis: IndexMap<String, Api>,
    content_hash: ContentHash,
    main_product_id: Option<String>,
    main_product_link_id: Option<String>,
    diagram_id: Option<String>,
}

impl NormalizedGraph {
    pub fn new(
        products: IndexMap<String, Product>,
        services: IndexMap<String, Service>,
        apis: IndexMap<String, Api>,
        main_product_id: Option<String>,
        main_product_link_id: Option<String>,
        diagram_id: Option<String>,
    ) -> Self {
        let content_hash = ContentHash::compute(&products, &services, &apis);
        Self {
            products,
            services,
            apis,
            content_hash,
            main_product_id,
            main_product_link_id,
            diagram_id,
        }
    }

    pub fn products(&self) -> &IndexMap<String, Product> {
        &self.products
    }

    pub fn services(&self) -> &IndexMap<String, Service> {
        &self.services
    }

    pub fn apis(&self) -> &IndexMap<String, Api> {
        &self.apis
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn main_product_id(&self) -> Option<&str> {
        self.main_product_id.as_deref()
    }

    pub fn main_product_link_id(&self) -> Option<&str> {
        self.main_product_link_id.as_deref()
    }

    /// Id of the previously published diagram, parsed from the main product's link
    pub fn diagram_id(&self) -> Option<&str> {
        self.diagram_id.as_deref()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn api_count(&self) -> usize {
        self.apis.len()
    }
}
