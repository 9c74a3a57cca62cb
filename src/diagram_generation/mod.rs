/// Domain layer - entities and pure services for VSM product diagrams
///
/// Nothing in this module performs I/O. The application layer feeds it the raw
/// GraphQL response and hands the generated draw.io document to the adapters.
pub mod domain;
pub mod services;
