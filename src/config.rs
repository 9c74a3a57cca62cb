//! Configuration file support for vsm-diagram.
//!
//! Provides YAML-based configuration through `vsm-diagram.config.yml` files,
//! including data structures, file loading, validation and the resolution of
//! file values, environment variables and CLI overrides into [`Settings`].

use anyhow::{bail, Context};
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::DiagramRequest;
use crate::diagram_generation::services::LayoutWeights;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "vsm-diagram.config.yml";

/// Environment variable overriding `vsm_api_token`
pub const VSM_API_TOKEN_ENV: &str = "VSM_API_TOKEN";
/// Environment variable overriding `eam_api_token`
pub const EAM_API_TOKEN_ENV: &str = "EAM_API_TOKEN";

const DEFAULT_SVC_PRODUCT_WEIGHT: f64 = 4.0;
const DEFAULT_SVC_PROVIDED_API_WEIGHT: f64 = 2.0;
const DEFAULT_SVC_CONSUMED_API_WEIGHT: f64 = 1.0;
const DEFAULT_SCALE_FACTOR: f64 = 40.0;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub product_name: Option<String>,
    pub product_link_name: Option<String>,
    pub hostname: Option<String>,
    pub vsm_workspace: Option<String>,
    pub eam_workspace: Option<String>,
    pub vsm_api_token: Option<String>,
    pub eam_api_token: Option<String>,
    pub skip_if_latest_diagram_up_to_date: Option<bool>,
    pub svc_product_weight: Option<f64>,
    pub svc_provided_api_weight: Option<f64>,
    pub svc_consumed_api_weight: Option<f64>,
    pub scale_factor: Option<f64>,
    pub layout_seed: Option<u64>,
    pub dry_run: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (key, value) in [
        ("product_name", &config.product_name),
        ("product_link_name", &config.product_link_name),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n\
                 💡 Hint: Use the exact name shown in VSM.",
                key
            );
        }
    }

    for (key, value) in [
        ("svc_product_weight", config.svc_product_weight),
        ("svc_provided_api_weight", config.svc_provided_api_weight),
        ("svc_consumed_api_weight", config.svc_consumed_api_weight),
        ("scale_factor", config.scale_factor),
    ] {
        if let Some(value) = value {
            if !(value.is_finite() && value > 0.0) {
                bail!(
                    "Invalid config: {} must be a positive number, got {}.\n\n\
                     💡 Hint: Omit the field to use the default.",
                    key,
                    value
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = key.as_str(); "Unknown config field will be ignored");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Fully resolved run settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub product_name: String,
    pub product_link_name: String,
    pub hostname: String,
    pub vsm_workspace: String,
    pub eam_workspace: String,
    pub vsm_api_token: String,
    pub eam_api_token: String,
    pub skip_if_up_to_date: bool,
    pub weights: LayoutWeights,
    pub scale_factor: f64,
    pub layout_seed: u64,
    pub dry_run: bool,
}

impl Settings {
    /// Merges the config file with the token environment variables and the
    /// `--product-name` override, then applies defaults
    ///
    /// # Arguments
    /// * `config` - Loaded (or default) configuration file
    /// * `product_name` - CLI override for `product_name`
    /// * `env` - Environment lookup, `std::env::var` outside of tests
    pub fn resolve(
        config: ConfigFile,
        product_name: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let product_name = product_name
            .or(config.product_name)
            .filter(|name| !name.trim().is_empty());
        let Some(product_name) = product_name else {
            bail!(
                "No product name configured.\n\n\
                 💡 Hint: Set `product_name` in {} or pass --product-name.",
                CONFIG_FILENAME
            );
        };
        let Some(product_link_name) = config.product_link_name else {
            bail!(
                "No product link name configured.\n\n\
                 💡 Hint: Set `product_link_name` in {}.",
                CONFIG_FILENAME
            );
        };

        let env_token = |name: &str| env(name).filter(|token| !token.trim().is_empty());

        Ok(Self {
            product_name,
            product_link_name,
            hostname: config.hostname.unwrap_or_default(),
            vsm_workspace: config.vsm_workspace.unwrap_or_default(),
            eam_workspace: config.eam_workspace.unwrap_or_default(),
            vsm_api_token: env_token(VSM_API_TOKEN_ENV)
                .or(config.vsm_api_token)
                .unwrap_or_default(),
            eam_api_token: env_token(EAM_API_TOKEN_ENV)
                .or(config.eam_api_token)
                .unwrap_or_default(),
            skip_if_up_to_date: config.skip_if_latest_diagram_up_to_date.unwrap_or(true),
            weights: LayoutWeights {
                product_weight: config
                    .svc_product_weight
                    .unwrap_or(DEFAULT_SVC_PRODUCT_WEIGHT),
                consumed_weight: config
                    .svc_consumed_api_weight
                    .unwrap_or(DEFAULT_SVC_CONSUMED_API_WEIGHT),
                provided_weight: config
                    .svc_provided_api_weight
                    .unwrap_or(DEFAULT_SVC_PROVIDED_API_WEIGHT),
            },
            scale_factor: config.scale_factor.unwrap_or(DEFAULT_SCALE_FACTOR),
            layout_seed: config.layout_seed.unwrap_or(0),
            dry_run: config.dry_run.unwrap_or(false),
        })
    }

    pub fn to_request(&self) -> DiagramRequest {
        DiagramRequest::new(self.product_name.clone(), self.product_link_name.clone())
            .with_workspace(self.hostname.clone(), self.vsm_workspace.clone())
            .with_layout(self.weights, self.scale_factor, self.layout_seed)
            .with_skip_if_up_to_date(self.skip_if_up_to_date)
            .with_dry_run(self.dry_run)
    }
}
