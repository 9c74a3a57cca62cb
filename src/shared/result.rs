/// Result alias used throughout the crate.
///
/// Domain errors are `VsmDiagramError` values wrapped in `anyhow::Error`, so callers
/// can attach context with `anyhow::Context` and still downcast to the typed error.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
