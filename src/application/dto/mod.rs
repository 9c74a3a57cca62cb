/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod diagram_request;
mod diagram_response;

pub use diagram_request::DiagramRequest;
pub use diagram_response::{DiagramOutcome, DiagramResponse};
