/// Mock implementations for testing
mod mock_diagram_repository;
mod mock_progress_reporter;
mod mock_vsm_repository;

pub use mock_diagram_repository::MockDiagramRepository;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_vsm_repository::MockVsmRepository;
