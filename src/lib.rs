//! vsm-diagram - architecture diagrams for VSM products
//!
//! This library turns the VSM model of a product (its services, their APIs and the
//! neighbouring products those APIs reach) into a draw.io diagram, publishes it as
//! an EAM bookmark and points a product link at it. A freshness indicator carrying
//! a content hash lets reruns skip regeneration while the model is unchanged.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`diagram_generation`): Normalization, layout, serialization and
//!   staleness checks, free of I/O
//! - **Application Layer** (`application`): The diagram generation use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vsm_diagram::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters: an offline run from a saved GraphQL response
//! let vsm_repository = ResponseFileReader::new(PathBuf::from("response.json"));
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = GenerateDiagramUseCase::new(
//!     vsm_repository,
//!     None::<EamBookmarkClient<MtmTokenProvider>>,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = DiagramRequest::new("Checkout".into(), "Architecture Diagram".into())
//!     .with_dry_run(true);
//! let response = use_case.execute(request)?;
//!
//! if let Some(document) = response.document {
//!     println!("{}", document);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod diagram_generation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, ResponseFileReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{
        EamBookmarkClient, MtmTokenProvider, VsmGraphQlClient,
    };
    pub use crate::application::dto::{DiagramOutcome, DiagramRequest, DiagramResponse};
    pub use crate::application::use_cases::GenerateDiagramUseCase;
    pub use crate::diagram_generation::domain::{
        Api, ContentHash, NormalizedGraph, Point, Positions, Product, Service,
    };
    pub use crate::diagram_generation::services::{
        DrawioGenerator, LayoutEngine, LayoutWeights, Normalizer, StalenessChecker,
    };
    pub use crate::ports::inbound::DiagramGenerationPort;
    pub use crate::ports::outbound::{
        AccessTokenProvider, DiagramRepository, ExistingDiagram, OutputPresenter,
        ProgressReporter, VsmRepository,
    };
    pub use crate::shared::Result;
}
