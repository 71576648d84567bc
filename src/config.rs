//! Host settings boundary and entitlement configuration.

use crate::MulescanError;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Setting key holding the analysis server URL.
pub const HOST_URL_KEY: &str = "sonar.host.url";

/// Setting key holding the organization.
pub const ORGANIZATION_KEY: &str = "sonar.organization";

/// Setting key holding the login token or user name.
pub const LOGIN_KEY: &str = "sonar.login";

/// Setting key holding the password paired with the login.
pub const PASSWORD_KEY: &str = "sonar.password";

/// Setting key holding a proxy URL for the license check.
pub const PROXY_URL_KEY: &str = "codescan.license_proxy";

/// Read-only view of the host's string-keyed configuration.
pub trait Settings {
    /// Look up a setting by key.
    fn get(&self, key: &str) -> Option<String>;

    /// Look up a setting, treating blank values as absent.
    fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }
}

impl Settings for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Settings for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Configuration for add-on entitlement verification.
#[derive(Debug, Clone)]
pub struct EntitlementConfig {
    /// Host suffixes of hosted deployments allowed to run the remote check.
    pub allowed_host_suffixes: &'static [&'static str],

    /// Connect and read timeout for the billing request.
    pub timeout: Duration,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            allowed_host_suffixes: &[".codescan.io", ".autorabit.com"],
            timeout: Duration::from_secs(60),
        }
    }
}

impl EntitlementConfig {
    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), MulescanError> {
        if self.allowed_host_suffixes.is_empty() {
            return Err(MulescanError::ConfigError(
                "allowed_host_suffixes cannot be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(MulescanError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `host` belongs to an allow-listed hosted deployment.
    pub fn is_saas_host(&self, host: &str) -> bool {
        self.allowed_host_suffixes
            .iter()
            .any(|suffix| host.ends_with(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EntitlementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_allow_list_rejected() {
        let config = EntitlementConfig {
            allowed_host_suffixes: &[],
            ..EntitlementConfig::default()
        };
        assert!(matches!(config.validate(), Err(MulescanError::ConfigError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = EntitlementConfig {
            timeout: Duration::ZERO,
            ..EntitlementConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_saas_host_matching() {
        let config = EntitlementConfig::default();
        assert!(config.is_saas_host("app.codescan.io"));
        assert!(config.is_saas_host("eu.autorabit.com"));
        assert!(!config.is_saas_host("codescan.io.example.com"));
        assert!(!config.is_saas_host("sonar.internal"));
    }

    #[test]
    fn test_blank_setting_treated_as_absent() {
        let mut settings = HashMap::new();
        settings.insert(LOGIN_KEY.to_string(), "   ".to_string());
        settings.insert(ORGANIZATION_KEY.to_string(), "acme".to_string());

        assert_eq!(settings.get_non_blank(LOGIN_KEY), None);
        assert_eq!(
            settings.get_non_blank(ORGANIZATION_KEY),
            Some("acme".to_string())
        );
        assert_eq!(Settings::get(&settings, HOST_URL_KEY), None);
    }
}
