use super::{Api, Product, Service};
use indexmap::IndexMap;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

/// Change-detection token for a normalized graph
///
/// The digest is taken over a canonical JSON rendering in which entities are
/// ordered by id and every id list is sorted, so the same model fetched in a
/// different response order produces the same hash. Product link ids are left
/// out because publishing a diagram changes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn compute(
        products: &IndexMap<String, Product>,
        services: &IndexMap<String, Service>,
        apis: &IndexMap<String, Api>,
    ) -> Self {
        let products = sorted_entries(products, |p| {
            json!({
                "vsm_id": p.vsm_id(),
                "eam_id": p.eam_id(),
                "name": p.name(),
                "main_product": p.is_main_product(),
            })
        });
        let services = sorted_entries(services, |s| {
            json!({
                "id": s.id(),
                "name": s.name(),
                "product_ids": sorted(s.product_ids()),
            })
        });
        let apis = sorted_entries(apis, |a| {
            json!({
                "id": a.id(),
                "name": a.name(),
                "source_ids": sorted(a.source_ids()),
                "target_ids": sorted(a.target_ids()),
            })
        });
        let canonical = json!({
            "products": products,
            "services": services,
            "apis": apis,
        });

        let digest = Sha256::digest(canonical.to_string().as_bytes());
        Self(format!("{:x}", digest))
    }

    /// Wraps a hash read back from a published diagram
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn sorted_entries<T>(entities: &IndexMap<String, T>, render: impl Fn(&T) -> Value) -> Vec<Value> {
    let mut ids: Vec<&String> = entities.keys().collect();
    ids.sort();
    ids.into_iter().map(|id| render(&entities[id])).collect()
}

fn sorted(ids: &[String]) -> Vec<&str> {
    let mut ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, products: &[&str]) -> (String, Service) {
        (
            id.to_string(),
            Service::new(
                id.to_string(),
                format!("Service {}", id),
                products.iter().map(|p| p.to_string()).collect(),
            ),
        )
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = ContentHash::compute(&IndexMap::new(), &IndexMap::new(), &IndexMap::new());
        assert_eq!(hash.as_str().len(), 64);
        assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_independent_of_insertion_order() {
        let forward: IndexMap<_, _> = [service("s1", &["p1", "p2"]), service("s2", &[])]
            .into_iter()
            .collect();
        let backward: IndexMap<_, _> = [service("s2", &[]), service("s1", &["p2", "p1"])]
            .into_iter()
            .collect();

        let a = ContentHash::compute(&IndexMap::new(), &forward, &IndexMap::new());
        let b = ContentHash::compute(&IndexMap::new(), &backward, &IndexMap::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_changes_with_content() {
        let one: IndexMap<_, _> = [service("s1", &["p1"])].into_iter().collect();
        let two: IndexMap<_, _> = [service("s1", &["p1", "p2"])].into_iter().collect();

        let a = ContentHash::compute(&IndexMap::new(), &one, &IndexMap::new());
        let b = ContentHash::compute(&IndexMap::new(), &two, &IndexMap::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_ignores_link_id() {
        let mut product = Product::new("p1".into(), None, "Checkout".into(), true);
        let before: IndexMap<_, _> = [("p1".to_string(), product.clone())].into_iter().collect();
        product.set_link_id("link-1".into());
        let after: IndexMap<_, _> = [("p1".to_string(), product)].into_iter().collect();

        assert_eq!(
            ContentHash::compute(&before, &IndexMap::new(), &IndexMap::new()),
            ContentHash::compute(&after, &IndexMap::new(), &IndexMap::new())
        );
    }
}
