use crate::adapters::HttpNotificationGateway;
use crate::core::booking::DEFAULT_MAX_SPAN_DAYS;
use crate::core::settings::{ConfiguredPin, Settings};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DeskError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_SUBJECT_PREFIX: &str = "Appointment Confirmed";
const DEFAULT_FROM_NAME: &str = "Appointment App";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    pub desk: DeskInfo,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    pub settings: SettingsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub from_name: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub subject_prefix: Option<String>,
    pub fallback_recipient: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    pub max_span_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub pin: String,
    pub email_template: Option<String>,
    pub reminder_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl DeskConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| DeskError::config("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${DESK_PIN})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| DeskError::config("env_substitution", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.notification.endpoint {
            validation::validate_url("notification.endpoint", endpoint)?;
            let has_key = self
                .notification
                .access_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty());
            if !has_key {
                return Err(DeskError::config(
                    "notification.access_key",
                    "required when notification.endpoint is set",
                ));
            }
        }

        if let Some(timeout) = self.notification.timeout_seconds {
            validation::validate_positive_number("notification.timeout_seconds", timeout, 1)?;
        }

        if let Some(span) = self.booking.max_span_days {
            validation::validate_positive_number("booking.max_span_days", u64::from(span), 1)?;
        }

        if let Some(fallback) = &self.notification.fallback_recipient {
            validation::validate_email("notification.fallback_recipient", fallback)?;
        }

        validation::validate_pin_format(&self.settings.pin)
            .map_err(|_| DeskError::config("settings.pin", "PIN must be 4 to 8 digits"))?;

        Ok(())
    }

    pub fn build_settings(&self) -> Settings {
        Settings::new(Box::new(ConfiguredPin::new(self.settings.pin.clone()))).with_templates(
            self.settings.email_template.clone(),
            self.settings.reminder_template.clone(),
        )
    }

    /// 未設定 endpoint 時回傳 None（呼叫端改用 dry-run 閘道）
    pub fn http_gateway(&self) -> Option<HttpNotificationGateway> {
        let endpoint = self.notification.endpoint.clone()?;
        let access_key = self.notification.access_key.clone().unwrap_or_default();
        let from_name = self
            .notification
            .from_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());
        Some(
            HttpNotificationGateway::new(endpoint, access_key, from_name)
                .with_timeout(Duration::from_secs(self.notification_timeout_secs())),
        )
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for DeskConfig {
    fn notification_timeout_secs(&self) -> u64 {
        self.notification
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn subject_prefix(&self) -> &str {
        self.notification
            .subject_prefix
            .as_deref()
            .unwrap_or(DEFAULT_SUBJECT_PREFIX)
    }

    fn fallback_recipient(&self) -> Option<&str> {
        self.notification.fallback_recipient.as_deref()
    }

    fn max_span_days(&self) -> u32 {
        self.booking.max_span_days.unwrap_or(DEFAULT_MAX_SPAN_DAYS)
    }
}

impl Validate for DeskConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::booking::WorkflowOptions;
    use crate::core::settings::DEFAULT_EMAIL_TEMPLATE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[desk]
name = "front-desk"

[notification]
endpoint = "https://api.example.com/submit"
access_key = "key-123"
timeout_seconds = 5

[settings]
pin = "1234"
"#;

    #[test]
    fn test_parse_basic_config() {
        let config = DeskConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.desk.name, "front-desk");
        assert_eq!(config.notification_timeout_secs(), 5);
        assert_eq!(config.subject_prefix(), "Appointment Confirmed");
        assert_eq!(config.max_span_days(), DEFAULT_MAX_SPAN_DAYS);
        assert!(config.validate().is_ok());
        assert!(config.http_gateway().is_some());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_notification_section_optional() {
        let config = DeskConfig::from_toml_str(
            r#"
[desk]
name = "offline"

[settings]
pin = "1234"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert!(config.http_gateway().is_none());
        assert_eq!(config.notification_timeout_secs(), 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOOKING_DESK_TEST_PIN", "8642");

        let config = DeskConfig::from_toml_str(
            r#"
[desk]
name = "env"

[settings]
pin = "${BOOKING_DESK_TEST_PIN}"
"#,
        )
        .unwrap();
        assert_eq!(config.settings.pin, "8642");

        std::env::remove_var("BOOKING_DESK_TEST_PIN");
    }

    #[test]
    fn test_config_validation() {
        let mut config = DeskConfig::from_toml_str(BASIC).unwrap();
        config.notification.endpoint = Some("invalid-url".to_string());
        assert!(config.validate().is_err());

        let mut config = DeskConfig::from_toml_str(BASIC).unwrap();
        config.notification.access_key = None;
        assert!(config.validate().is_err());

        let mut config = DeskConfig::from_toml_str(BASIC).unwrap();
        config.settings.pin = "12".to_string();
        assert!(config.validate().is_err());

        let mut config = DeskConfig::from_toml_str(BASIC).unwrap();
        config.notification.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        let mut config = DeskConfig::from_toml_str(BASIC).unwrap();
        config.booking.max_span_days = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_booking_span_limit_from_toml() {
        let content = format!("{}\n[booking]\nmax_span_days = 14\n", BASIC);
        let config = DeskConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.max_span_days(), 14);
        assert_eq!(WorkflowOptions::from_config(&config).max_span_days, 14);
    }

    #[test]
    fn test_build_settings_uses_configured_template() {
        let config = DeskConfig::from_toml_str(BASIC).unwrap();
        let settings = config.build_settings();
        assert_eq!(settings.email_template(), DEFAULT_EMAIL_TEMPLATE);
        assert!(settings.is_first_time_setup());

        let mut config = DeskConfig::from_toml_str(BASIC).unwrap();
        config.settings.email_template = Some("Hi {customer_name}".to_string());
        let settings = config.build_settings();
        assert_eq!(settings.email_template(), "Hi {customer_name}");
        assert!(!settings.is_first_time_setup());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = DeskConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.desk.name, "front-desk");
    }
}
