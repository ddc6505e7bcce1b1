use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, TOML, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Pulse.toml"))
            .merge(Env::prefixed("PULSE_").split("__"))
            .join(Json::file("config/Pulse.json"))
            .extract()?;

        Ok(config)
    }

    /// Loads configuration with a profile-specific TOML overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Pulse.toml"))
            .merge(Toml::file(format!("config/Pulse.{profile}.toml")))
            .merge(Env::prefixed("PULSE_").split("__"))
            .join(Json::file("config/Pulse.json"))
            .extract()?;

        Ok(config)
    }
}
