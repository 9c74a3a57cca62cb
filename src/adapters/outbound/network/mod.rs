/// Network adapters for the LeanIX platform APIs
mod eam_client;
mod mtm_client;
mod vsm_client;

pub use eam_client::EamBookmarkClient;
pub use mtm_client::MtmTokenProvider;
pub use vsm_client::VsmGraphQlClient;

use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

const TIMEOUT_SECONDS: u64 = 30;

/// Builds the blocking HTTP client shared by all platform adapters
pub fn build_http_client() -> Result<Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("vsm-diagram/{}", version);
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// `https://{hostname}`, rejecting an empty hostname
pub fn platform_base_url(hostname: &str) -> Result<String> {
    let hostname = hostname.trim().trim_end_matches('/');
    if hostname.is_empty() {
        return Err(VsmDiagramError::Validation {
            message: "hostname is required to talk to the VSM and EAM APIs".to_string(),
        }
        .into());
    }
    Ok(format!("https://{}", hostname))
}

/// Passes successful responses through; anything else becomes the error built by `to_error`
fn ensure_success(
    response: Response,
    to_error: impl FnOnce(String) -> VsmDiagramError,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    Err(to_error(format!("HTTP {}: {}", status, snippet)).into())
}
