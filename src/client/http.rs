//! Reqwest-based HTTP client for the billing add-on endpoint.
//!
//! A client is built per check so the connection pool is released when the
//! check returns, on every path.

use crate::client::proxy::ProxySelection;
use crate::MulescanError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use std::time::Duration;

/// HTTP response with its status and fully read body.
#[derive(Debug)]
pub struct BillingResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body.
    pub body: Vec<u8>,
}

impl BillingResponse {
    fn from_response(response: Response) -> Result<Self, MulescanError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| MulescanError::Transport(format!("Failed to read body: {}", e)))?
            .to_vec();

        Ok(Self { status, body })
    }
}

/// Billing endpoint client.
pub struct BillingClient {
    client: Client,
}

impl BillingClient {
    /// Create a client with the given proxy and a shared connect/read timeout.
    pub fn new(proxy: &ProxySelection, timeout: Duration) -> Result<Self, MulescanError> {
        let builder = Client::builder().timeout(timeout).connect_timeout(timeout);

        let builder = match proxy.endpoint() {
            Some(endpoint) => builder.proxy(endpoint.to_reqwest()?),
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| MulescanError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch the add-on status for an organization.
    ///
    /// `origin` is `{scheme}://{host}`; credentials, when given, are sent as
    /// HTTP Basic authentication.
    pub fn fetch_addon_status(
        &self,
        origin: &str,
        organization: &str,
        addon: &str,
        credentials: Option<&BasicCredentials>,
    ) -> Result<BillingResponse, MulescanError> {
        let url = addon_status_url(origin, organization, addon)?;

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(credentials) = credentials {
            request = request.header(AUTHORIZATION, credentials.header_value());
        }

        let response = request
            .send()
            .map_err(|e| MulescanError::Transport(format!("Request failed: {}", e)))?;

        BillingResponse::from_response(response)
    }
}

/// Login and password for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    login: String,
    password: String,
}

impl BasicCredentials {
    /// Credentials from a login and password; surrounding whitespace is stripped.
    ///
    /// Returns `None` for a blank login.
    pub fn new(login: &str, password: Option<&str>) -> Option<Self> {
        let login = login.trim();
        if login.is_empty() {
            return None;
        }
        Some(Self {
            login: login.to_string(),
            password: password.unwrap_or("").trim().to_string(),
        })
    }

    /// `Authorization` header value.
    pub fn header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.login, self.password));
        format!("Basic {}", token)
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("login", &self.login)
            .field("password", &"****")
            .finish()
    }
}

/// Build `{origin}/_codescan/billing/organization/{organization}/addons/{addon}`.
pub fn addon_status_url(
    origin: &str,
    organization: &str,
    addon: &str,
) -> Result<Url, MulescanError> {
    let mut url =
        Url::parse(origin).map_err(|e| MulescanError::InvalidUrl(format!("{}: {}", origin, e)))?;

    url.path_segments_mut()
        .map_err(|_| MulescanError::InvalidUrl(format!("{}: cannot be a base", origin)))?
        .clear()
        .extend(["_codescan", "billing", "organization", organization, "addons", addon]);

    Ok(url)
}
