mod drawio_generator;
mod layout_engine;
mod normalizer;
mod spring_layout;
mod staleness_checker;
mod xml;

pub use drawio_generator::DrawioGenerator;
pub use layout_engine::{LayoutEngine, LayoutWeights, PRODUCTLESS_SERVICES};
pub use normalizer::Normalizer;
pub use spring_layout::SpringLayout;
pub use staleness_checker::{FreshnessSnapshot, StalenessChecker};
