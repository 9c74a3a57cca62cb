/// Product entity - a top-level architectural unit of the value stream model
///
/// Products are discovered while walking the GraphQL response and are only
/// ever mutated to record the diagram link attached to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    vsm_id: String,
    eam_id: Option<String>,
    name: String,
    main_product: bool,
    link_id: Option<String>,
}

impl Product {
    pub fn new(vsm_id: String, eam_id: Option<String>, name: String, main_product: bool) -> Self {
        Self {
            vsm_id,
            eam_id,
            name,
            main_product,
            link_id: None,
        }
    }

    pub fn vsm_id(&self) -> &str {
        &self.vsm_id
    }

    /// Id of the linked EAM fact sheet, if the product has one
    pub fn eam_id(&self) -> Option<&str> {
        self.eam_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_main_product(&self) -> bool {
        self.main_product
    }

    /// Id of the existing "diagram" link on this product, if any
    pub fn link_id(&self) -> Option<&str> {
        self.link_id.as_deref()
    }

    pub fn set_link_id(&mut self, link_id: String) {
        self.link_id = Some(link_id);
    }

    /// Id of the diagram container cell: the fact sheet id when linked, else the VSM id
    pub fn container_id(&self) -> &str {
        self.eam_id.as_deref().unwrap_or(&self.vsm_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_new() {
        let product = Product::new(
            "p1".to_string(),
            Some("fs-1".to_string()),
            "Checkout".to_string(),
            true,
        );
        assert_eq!(product.vsm_id(), "p1");
        assert_eq!(product.eam_id(), Some("fs-1"));
        assert_eq!(product.name(), "Checkout");
        assert!(product.is_main_product());
        assert!(product.link_id().is_none());
    }

    #[test]
    fn test_container_id_prefers_eam_id() {
        let linked = Product::new("p1".into(), Some("fs-1".into()), "A".into(), false);
        let unlinked = Product::new("p2".into(), None, "B".into(), false);
        assert_eq!(linked.container_id(), "fs-1");
        assert_eq!(unlinked.container_id(), "p2");
    }

    #[test]
    fn test_set_link_id() {
        let mut product = Product::new("p1".into(), None, "A".into(), true);
        product.set_link_id("link-9".to_string());
        assert_eq!(product.link_id(), Some("link-9"));
    }
}
