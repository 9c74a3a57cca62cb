use crate::shared::Result;

/// AccessTokenProvider port for bearer tokens used by the platform APIs
pub trait AccessTokenProvider {
    /// Returns a valid access token, exchanging credentials on first use
    ///
    /// # Errors
    /// Returns `VsmDiagramError::Auth` if the credential exchange fails
    fn access_token(&self) -> Result<String>;
}
