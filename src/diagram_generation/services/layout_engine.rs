use super::SpringLayout;
use crate::diagram_generation::domain::{Api, Point, Positions, Product, Service};
use indexmap::IndexMap;
use log::{debug, info};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Sentinel node anchoring services that belong to no product
pub const PRODUCTLESS_SERVICES: &str = "productless_services";

/// Iterations granted per service and API node
const ITERATIONS_PER_NODE: usize = 100;

/// Edge weights of the full graph; a larger weight pulls nodes closer together
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutWeights {
    /// Service to owning product (or to the productless sentinel)
    pub product_weight: f64,
    /// Consuming service to API
    pub consumed_weight: f64,
    /// API to providing service
    pub provided_weight: f64,
}

impl Default for LayoutWeights {
    fn default() -> Self {
        Self {
            product_weight: 4.0,
            consumed_weight: 1.0,
            provided_weight: 2.0,
        }
    }
}

/// LayoutEngine service computing 2-D positions in two stages
///
/// Stage one spreads the products (plus the productless sentinel) evenly on the
/// unit circle. Stage two runs a weighted spring layout over products, services
/// and APIs with the stage-one positions pinned, so the more numerous service and
/// API nodes cannot drag the product containers around.
pub struct LayoutEngine {
    weights: LayoutWeights,
    seed: u64,
}

impl LayoutEngine {
    pub fn new(weights: LayoutWeights) -> Self {
        Self { weights, seed: 0 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Stage one: circular layout of the sentinel followed by every product
    pub fn layout_products(&self, products: &IndexMap<String, Product>) -> Positions {
        let ids: Vec<&str> = std::iter::once(PRODUCTLESS_SERVICES)
            .chain(products.keys().map(String::as_str))
            .collect();

        let positions = circular_layout(&ids);
        debug!(products = products.len(); "Computed product layout");
        positions
    }

    /// Stage two: spring layout of the full graph with products pinned
    pub fn layout_full_graph(
        &self,
        product_positions: &Positions,
        products: &IndexMap<String, Product>,
        services: &IndexMap<String, Service>,
        apis: &IndexMap<String, Api>,
    ) -> Positions {
        let graph = self.build_full_graph(products, services, apis);
        let iterations = (services.len() + apis.len()) * ITERATIONS_PER_NODE;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            iterations = iterations;
            "Running spring layout"
        );

        SpringLayout::new(iterations)
            .with_seed(self.seed)
            .run(&graph, product_positions)
    }

    fn build_full_graph(
        &self,
        products: &IndexMap<String, Product>,
        services: &IndexMap<String, Service>,
        apis: &IndexMap<String, Api>,
    ) -> UnGraph<String, f64> {
        let mut builder = GraphBuilder::default();

        builder.node(PRODUCTLESS_SERVICES);
        for product_id in products.keys() {
            builder.node(product_id);
        }

        for service in services.values() {
            builder.node(service.id());
            for product_id in service.product_ids() {
                builder.edge(service.id(), product_id, self.weights.product_weight);
            }
            if service.is_productless() {
                builder.edge(service.id(), PRODUCTLESS_SERVICES, self.weights.product_weight);
            }
        }

        for api in apis.values() {
            builder.node(api.id());
            for source_id in api.source_ids() {
                builder.edge(source_id, api.id(), self.weights.consumed_weight);
            }
            for target_id in api.target_ids() {
                builder.edge(api.id(), target_id, self.weights.provided_weight);
            }
        }

        builder.graph
    }
}

/// Undirected graph keyed by node id; re-adding an edge replaces its weight
#[derive(Default)]
struct GraphBuilder {
    graph: UnGraph<String, f64>,
    indices: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    fn node(&mut self, id: &str) -> NodeIndex {
        if let Some(index) = self.indices.get(id) {
            return *index;
        }
        let index = self.graph.add_node(id.to_string());
        self.indices.insert(id.to_string(), index);
        index
    }

    fn edge(&mut self, a: &str, b: &str, weight: f64) {
        let a = self.node(a);
        let b = self.node(b);
        self.graph.update_edge(a, b, weight);
    }
}

/// Evenly spaced positions on the unit circle; a single node sits at the origin
fn circular_layout(ids: &[&str]) -> Positions {
    if ids.len() == 1 {
        return ids
            .iter()
            .map(|id| (id.to_string(), Point::origin()))
            .collect();
    }

    let count = ids.len() as f64;
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let theta = TAU * i as f64 / count;
            (id.to_string(), Point::new(theta.cos(), theta.sin()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram_generation::domain::ServiceRole;

    fn products(ids: &[&str]) -> IndexMap<String, Product> {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    Product::new(id.to_string(), None, format!("Product {}", id), false),
                )
            })
            .collect()
    }

    fn services(entries: &[(&str, Vec<&str>)]) -> IndexMap<String, Service> {
        entries
            .iter()
            .map(|(id, products)| {
                (
                    id.to_string(),
                    Service::new(
                        id.to_string(),
                        id.to_string(),
                        products.iter().map(|p| p.to_string()).collect(),
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn test_layout_products_empty_has_only_sentinel() {
        let engine = LayoutEngine::new(LayoutWeights::default());
        let positions = engine.layout_products(&IndexMap::new());

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[PRODUCTLESS_SERVICES], Point::origin());
    }

    #[test]
    fn test_layout_products_on_unit_circle() {
        let engine = LayoutEngine::new(LayoutWeights::default());
        let positions = engine.layout_products(&products(&["p1", "p2", "p3"]));

        assert_eq!(positions.len(), 4);
        assert_eq!(positions.get_index(0).unwrap().0, PRODUCTLESS_SERVICES);
        for point in positions.values() {
            let radius = (point.x * point.x + point.y * point.y).sqrt();
            assert!((radius - 1.0).abs() < 1e-9);
        }
        // No two products share a position
        let points: Vec<_> = positions.values().collect();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!((a.x - b.x).abs() + (a.y - b.y).abs() > 1e-6);
            }
        }
    }

    #[test]
    fn test_full_graph_keeps_product_anchors() {
        let engine = LayoutEngine::new(LayoutWeights::default()).with_seed(3);
        let products = products(&["p1", "p2"]);
        let services = services(&[("s1", vec!["p1"]), ("s2", vec!["p1", "p2"]), ("s3", vec![])]);
        let mut api = Api::new("a1".into(), "API".into());
        api.attach_service("s1", &ServiceRole::Consumer);
        api.attach_service("s3", &ServiceRole::Provider);
        let apis: IndexMap<_, _> = [("a1".to_string(), api)].into_iter().collect();

        let anchors = engine.layout_products(&products);
        let full = engine.layout_full_graph(&anchors, &products, &services, &apis);

        for (id, point) in &anchors {
            assert_eq!(full[id], *point);
        }
        for id in ["s1", "s2", "s3", "a1"] {
            assert!(full.contains_key(id));
            assert!(full[id].is_finite());
        }
    }

    #[test]
    fn test_full_graph_with_no_products_does_not_panic() {
        let engine = LayoutEngine::new(LayoutWeights::default());
        let anchors = engine.layout_products(&IndexMap::new());
        let full = engine.layout_full_graph(
            &anchors,
            &IndexMap::new(),
            &IndexMap::new(),
            &IndexMap::new(),
        );

        assert_eq!(full.len(), 1);
        assert_eq!(full[PRODUCTLESS_SERVICES], Point::origin());
    }

    #[test]
    fn test_productless_service_linked_to_sentinel() {
        let engine = LayoutEngine::new(LayoutWeights::default());
        let services = services(&[("s1", vec![])]);
        let graph = engine.build_full_graph(&IndexMap::new(), &services, &IndexMap::new());

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(*graph.edge_weights().next().unwrap(), 4.0);
    }

    #[test]
    fn test_repeated_edge_takes_last_weight() {
        let engine = LayoutEngine::new(LayoutWeights::default());
        let services = services(&[("s1", vec![])]);
        let mut api = Api::new("a1".into(), "Loop".into());
        api.attach_service("s1", &ServiceRole::Consumer);
        api.attach_service("s1", &ServiceRole::Provider);
        let apis: IndexMap<_, _> = [("a1".to_string(), api)].into_iter().collect();

        let graph = engine.build_full_graph(&IndexMap::new(), &services, &apis);

        // sentinel-s1 and s1-a1
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edge_weights().any(|w| *w == 2.0));
        assert!(!graph.edge_weights().any(|w| *w == 1.0));
    }
}
