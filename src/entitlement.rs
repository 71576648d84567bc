//! Add-on entitlement verification - the licensing half of the public API.
//!
//! `EntitlementVerifier::verify` walks a fixed decision tree:
//! - missing host URL or organization: disabled, no request
//! - host outside the SaaS allow-list: disabled, no request
//! - billing endpoint answers non-200: disabled
//! - otherwise the decoded body is the result
//!
//! Any error on the way becomes a generic disabled result.

use crate::client::http::{BasicCredentials, BillingClient};
use crate::client::proxy::{resolve_proxy, ProxyEnvironment};
use crate::config::{
    EntitlementConfig, Settings, HOST_URL_KEY, LOGIN_KEY, ORGANIZATION_KEY, PASSWORD_KEY,
    PROXY_URL_KEY,
};
use crate::logging;
use crate::protocol::models::{parse_entitlement_response, EntitlementResult};
use crate::MulescanError;
use reqwest::Url;
use tracing::debug;

/// Add-on name of the Mule analysis feature.
pub const MULESOFT_ADDON: &str = "mulesoft";

/// Message when the host URL or organization is not configured.
pub const MSG_MISSING_SETTINGS: &str = "Host or Organization is missing";

/// Message when the host is not a recognized hosted deployment.
pub const MSG_SAAS_ONLY: &str = "This feature is enabled for SaaS customers only";

/// Message when the billing endpoint answers with a non-200 status.
pub const MSG_FAILED_RESPONSE: &str = "Failed response from license check";

/// Message for any other failure.
pub const MSG_SOMETHING_WRONG: &str = "Something went wrong";

/// Verifies add-on entitlements against the billing endpoint.
///
/// Holds the host settings, the entitlement configuration, and a snapshot of
/// the environment proxy settings. Nothing is cached between calls.
pub struct EntitlementVerifier<S: Settings> {
    settings: S,
    config: EntitlementConfig,
    proxy_environment: ProxyEnvironment,
    origin_override: Option<String>,
}

impl<S: Settings> EntitlementVerifier<S> {
    /// Create a verifier with the default configuration and the current
    /// process proxy environment.
    pub fn new(settings: S) -> Self {
        Self {
            settings,
            config: EntitlementConfig::default(),
            proxy_environment: ProxyEnvironment::from_env(),
            origin_override: None,
        }
    }

    /// Create a verifier with a custom configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn with_config(settings: S, config: EntitlementConfig) -> Result<Self, MulescanError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(settings)
        })
    }

    /// Replace the environment proxy snapshot.
    pub fn with_proxy_environment(mut self, proxy_environment: ProxyEnvironment) -> Self {
        self.proxy_environment = proxy_environment;
        self
    }

    /// Send the billing request to `origin` instead of the configured host.
    ///
    /// The SaaS eligibility check still runs against the configured host URL.
    #[cfg(test)]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin_override = Some(origin.into());
        self
    }

    /// Check whether the Mule add-on is enabled.
    pub fn verify_mulesoft(&self) -> EntitlementResult {
        self.verify(MULESOFT_ADDON)
    }

    /// Check whether `addon` is enabled for the configured organization.
    ///
    /// Never fails: every problem yields `enabled == false` with a message.
    pub fn verify(&self, addon: &str) -> EntitlementResult {
        match self.try_verify(addon) {
            Ok(result) => result,
            Err(e) => {
                debug!("License check for {} failed: {}", addon, e);
                let failed = EntitlementResult::disabled(addon).with_message(MSG_SOMETHING_WRONG);
                match self.resolved_target() {
                    Some((_, organization)) => failed.with_organization(organization),
                    None => failed,
                }
            }
        }
    }

    /// Host URL and organization, when both are configured.
    fn resolved_target(&self) -> Option<(String, String)> {
        let host_url = self.settings.get_non_blank(HOST_URL_KEY)?;
        let organization = self.settings.get_non_blank(ORGANIZATION_KEY)?;
        Some((host_url, organization))
    }

    fn try_verify(&self, addon: &str) -> Result<EntitlementResult, MulescanError> {
        let Some((host_url, organization)) = self.resolved_target() else {
            debug!("License check skipped: host or organization missing");
            return Ok(EntitlementResult::disabled(addon).with_message(MSG_MISSING_SETTINGS));
        };
        let disabled = EntitlementResult::disabled(addon).with_organization(organization.as_str());

        let url = Url::parse(host_url.trim())
            .map_err(|e| MulescanError::InvalidUrl(format!("{}: {}", host_url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| MulescanError::InvalidUrl(format!("{}: missing host", host_url)))?;

        if !self.config.is_saas_host(host) {
            debug!("License check skipped: {} is not a hosted deployment", host);
            return Ok(disabled.with_message(MSG_SAAS_ONLY));
        }

        let origin = match &self.origin_override {
            Some(origin) => origin.clone(),
            None => format!("{}://{}", url.scheme(), host),
        };

        let credentials = self.settings.get(LOGIN_KEY).and_then(|login| {
            BasicCredentials::new(&login, self.settings.get(PASSWORD_KEY).as_deref())
        });

        logging::suppress_transport_logs();

        let proxy = resolve_proxy(
            &self.proxy_environment,
            self.settings.get(PROXY_URL_KEY).as_deref(),
        )?;
        let client = BillingClient::new(&proxy, self.config.timeout)?;
        let response =
            client.fetch_addon_status(&origin, &organization, addon, credentials.as_ref())?;

        if response.status != 200 {
            debug!("Failed response from license check: HTTP {}", response.status);
            return Ok(disabled.with_message(MSG_FAILED_RESPONSE));
        }

        parse_entitlement_response(&response.body)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &EntitlementConfig {
        &self.config
    }
}
