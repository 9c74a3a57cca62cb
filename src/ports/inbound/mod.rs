/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod diagram_generation_port;

pub use diagram_generation_port::DiagramGenerationPort;
