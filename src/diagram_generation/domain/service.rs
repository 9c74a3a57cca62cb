/// Service entity - a capability unit nested under zero or more products
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    id: String,
    name: String,
    product_ids: Vec<String>,
}

impl Service {
    pub fn new(id: String, name: String, product_ids: Vec<String>) -> Self {
        let mut service = Self {
            id,
            name,
            product_ids: Vec::with_capacity(product_ids.len()),
        };
        service.merge_product_ids(product_ids);
        service
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning product ids in first-seen order
    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    pub fn is_productless(&self) -> bool {
        self.product_ids.is_empty()
    }

    pub fn belongs_to(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }

    /// Appends product ids that are not yet present, keeping first-seen order
    pub fn merge_product_ids<I>(&mut self, product_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        for product_id in product_ids {
            if !self.belongs_to(&product_id) {
                self.product_ids.push(product_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_new_deduplicates() {
        let service = Service::new(
            "s1".into(),
            "Payments".into(),
            vec!["p1".into(), "p1".into(), "p2".into()],
        );
        assert_eq!(service.product_ids(), &["p1".to_string(), "p2".to_string()]);
    }

    #[test]
    fn test_merge_product_ids_keeps_order() {
        let mut service = Service::new("s1".into(), "Payments".into(), vec!["p2".into()]);
        service.merge_product_ids(vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(service.product_ids(), &["p2".to_string(), "p1".to_string()]);
    }

    #[test]
    fn test_productless() {
        let mut service = Service::new("s1".into(), "Orphan".into(), vec![]);
        assert!(service.is_productless());
        service.merge_product_ids(vec!["p1".to_string()]);
        assert!(!service.is_productless());
        assert!(service.belongs_to("p1"));
    }
}
