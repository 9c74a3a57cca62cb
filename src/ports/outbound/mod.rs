/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (VSM, EAM, file system, console).
pub mod diagram_repository;
pub mod output_presenter;
pub mod progress_reporter;
pub mod token_provider;
pub mod vsm_repository;

pub use diagram_repository::{DiagramRepository, ExistingDiagram};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use token_provider::AccessTokenProvider;
pub use vsm_repository::VsmRepository;
