use chrono::NaiveTime;
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub clinic_name: String,
    pub timezone: String,
    pub session_start: String,
    pub session_duration_min: u32,
    pub max_sessions: u8,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("clinic_name", "Clinic")?
            .set_default("timezone", "Europe/London")?
            .set_default("session_start", "09:00")?
            .set_default("session_duration_min", 60)?
            .set_default("max_sessions", 12)?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.tz()?;
        settings.session_start_time()?;
        if settings.max_sessions == 0 {
            return Err(ConfigError::Message("max_sessions must be at least 1".into()));
        }
        Ok(settings)
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| ConfigError::Message(format!("invalid timezone: {err}")))
    }

    pub fn session_start_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(&self.session_start, "%H:%M").map_err(|err| {
            ConfigError::Message(format!(
                "invalid session_start '{}': {err}",
                self.session_start
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const KEYS: [&str; 4] = [
        "APP_PORT",
        "APP_CLINIC_NAME",
        "APP_TIMEZONE",
        "APP_SESSION_START",
    ];

    fn clear_env() {
        for key in KEYS {
            // SAFETY: serialized with the other environment tests.
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.max_sessions, 12);
        assert_eq!(settings.tz().unwrap(), chrono_tz::Europe::London);
        assert_eq!(
            settings.session_start_time().unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("APP_PORT", "9090");
            std::env::set_var("APP_CLINIC_NAME", "Harbour Aesthetics");
            std::env::set_var("APP_TIMEZONE", "Europe/Dublin");
        }
        let settings = Settings::from_env().unwrap();
        clear_env();
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.clinic_name, "Harbour Aesthetics");
        assert_eq!(settings.tz().unwrap(), chrono_tz::Europe::Dublin);
    }

    #[test]
    #[serial]
    fn test_invalid_timezone() {
        clear_env();
        unsafe { std::env::set_var("APP_TIMEZONE", "Mars/Olympus") };
        let result = Settings::from_env();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_session_start() {
        clear_env();
        unsafe { std::env::set_var("APP_SESSION_START", "9am") };
        let result = Settings::from_env();
        clear_env();
        assert!(result.is_err());
    }
}
