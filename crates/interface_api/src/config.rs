//! API configuration

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{CoreError, Currency};
use domain_claims::{AmountCalculator, NumericPolicy, SubmissionRules, DEFAULT_RATE_PER_KM};
use domain_session::{UserDirectory, DEMO_PASSWORD};

use crate::auth::token_lifetime;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Password shared by every directory account
    pub shared_password: String,
    /// Reimbursement per kilometer for mileage-based trips
    pub mileage_rate_per_km: Decimal,
    /// ISO code of the claim currency
    pub currency: String,
    /// `strict` or `lenient`
    pub numeric_policy: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            shared_password: DEMO_PASSWORD.to_string(),
            mileage_rate_per_km: DEFAULT_RATE_PER_KM,
            currency: Currency::default().code().to_string(),
            numeric_policy: "strict".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `CLAIMS_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CLAIMS"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Calculator and numeric policy for claim submission
    pub fn submission_rules(&self) -> Result<SubmissionRules, CoreError> {
        let currency: Currency = self.currency.parse()?;
        let numeric_policy: NumericPolicy = self
            .numeric_policy
            .parse()
            .map_err(CoreError::configuration)?;

        if self.mileage_rate_per_km.is_sign_negative() {
            return Err(CoreError::configuration("mileage rate must not be negative"));
        }

        Ok(SubmissionRules {
            calculator: AmountCalculator::new(self.mileage_rate_per_km, currency),
            numeric_policy,
        })
    }

    /// Session token lifetime, rejected at startup when out of range
    pub fn token_lifetime(&self) -> Result<Duration, CoreError> {
        token_lifetime(self.jwt_expiration_secs).ok_or_else(|| {
            CoreError::configuration(format!(
                "token lifetime of {} seconds is out of range",
                self.jwt_expiration_secs
            ))
        })
    }

    /// The demo directory, with the configured shared password
    pub fn directory(&self) -> UserDirectory {
        UserDirectory::demo().with_shared_password(self.shared_password.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rules() {
        let rules = ApiConfig::default().submission_rules().unwrap();
        assert_eq!(rules, SubmissionRules::default());
        assert_eq!(rules.calculator.rate_per_km(), dec!(0.47));
    }

    #[test]
    fn test_custom_rules() {
        let config = ApiConfig {
            mileage_rate_per_km: dec!(0.60),
            currency: "MYR".to_string(),
            numeric_policy: "Lenient".to_string(),
            ..Default::default()
        };
        let rules = config.submission_rules().unwrap();

        assert_eq!(rules.calculator.currency(), Currency::MYR);
        assert_eq!(rules.numeric_policy, NumericPolicy::Lenient);
    }

    #[test]
    fn test_bad_rules_rejected() {
        let bad_currency = ApiConfig {
            currency: "XYZ".to_string(),
            ..Default::default()
        };
        assert!(bad_currency.submission_rules().is_err());

        let bad_policy = ApiConfig {
            numeric_policy: "sloppy".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_policy.submission_rules(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_token_lifetime_bounds() {
        assert_eq!(ApiConfig::default().token_lifetime().unwrap(), Duration::hours(1));

        let forever = ApiConfig {
            jwt_expiration_secs: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(forever.token_lifetime(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(ApiConfig::default().server_addr(), "0.0.0.0:8080");
    }
}
