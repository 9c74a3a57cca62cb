pub mod api;
pub mod content_hash;
pub mod freshness;
pub mod normalized_graph;
pub mod position;
pub mod product;
pub mod service;

pub use api::{Api, ServiceRole};
pub use content_hash::ContentHash;
pub use freshness::FreshnessIndicator;
pub use normalized_graph::NormalizedGraph;
pub use position::{Point, Positions};
pub use product::Product;
pub use service::Service;
