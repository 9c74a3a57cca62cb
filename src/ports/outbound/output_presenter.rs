use crate::shared::Result;

/// OutputPresenter port for presenting the generated diagram
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the draw.io XML is written for inspection.
pub trait OutputPresenter {
    /// Presents the diagram document to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
