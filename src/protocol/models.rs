//! Billing add-on response model.

use crate::MulescanError;
use serde::{Deserialize, Deserializer, Serialize};

/// Outcome of an add-on entitlement check.
///
/// Built fresh on every verification. When the billing endpoint answers
/// `200 OK`, its body is decoded straight into this record and returned
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementResult {
    /// Add-on name (e.g. "mulesoft").
    #[serde(default)]
    pub addon: String,

    /// Organization the check ran for, when it could be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Whether the add-on is enabled. `null` or absent decode as `false`.
    #[serde(default, deserialize_with = "null_as_false")]
    pub enabled: bool,

    /// Human-readable diagnostic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EntitlementResult {
    /// A disabled result for `addon` with no organization or message yet.
    pub fn disabled(addon: &str) -> Self {
        Self {
            addon: addon.to_string(),
            organization: None,
            enabled: false,
            message: None,
        }
    }

    /// Attach the organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Attach a diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Parse a billing response body.
pub fn parse_entitlement_response(body: &[u8]) -> Result<EntitlementResult, MulescanError> {
    serde_json::from_slice(body)
        .map_err(|e| MulescanError::Protocol(format!("Failed to parse add-on status: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enabled_response() {
        let body = br#"{"addon":"mulesoft","organization":"acme","enabled":true}"#;
        let result = parse_entitlement_response(body).unwrap();

        assert_eq!(result.addon, "mulesoft");
        assert_eq!(result.organization.as_deref(), Some("acme"));
        assert!(result.enabled);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_parse_null_enabled_is_false() {
        let body = br#"{"addon":"mulesoft","enabled":null,"message":"trial over"}"#;
        let result = parse_entitlement_response(body).unwrap();

        assert!(!result.enabled);
        assert!(result.organization.is_none());
        assert_eq!(result.message.as_deref(), Some("trial over"));
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let result = parse_entitlement_response(b"{}").unwrap();
        assert_eq!(
            result,
            EntitlementResult {
                addon: String::new(),
                organization: None,
                enabled: false,
                message: None,
            }
        );
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_entitlement_response(b"<html>oops</html>");
        assert!(matches!(result, Err(MulescanError::Protocol(_))));
    }

    #[test]
    fn test_disabled_builder() {
        let result = EntitlementResult::disabled("mulesoft")
            .with_organization("acme")
            .with_message("nope");

        assert!(!result.enabled);
        assert_eq!(result.organization.as_deref(), Some("acme"));
        assert_eq!(result.message.as_deref(), Some("nope"));
    }
}
