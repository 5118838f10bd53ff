#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::ChannelSettings;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BaudRate,
    ConfigFile,
    Interval,
    Port,
    SessionID,
    Threshold,
    Timeout,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("waterline/config.toml");

        let res = match key {
            ConfigKey::BaudRate => "115200",
            ConfigKey::Interval => "10",
            ConfigKey::Port => "",
            ConfigKey::Threshold => "50",
            ConfigKey::Timeout => "0.5",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::SessionID => "",
        };

        return res.to_string();
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile || key == ConfigKey::SessionID {
                    continue;
                }
                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_float) = val.as_float() {
                        Config::set(key, &val_float.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "{} has an invalid value for key '{key}': {}",
                            config_path.to_string_lossy(),
                            val.to_string().trim()
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::validate()?;

        tracing::debug!(
            port = Config::get(ConfigKey::Port),
            baud_rate = Config::get(ConfigKey::BaudRate),
            timeout = Config::get(ConfigKey::Timeout),
            threshold = Config::get(ConfigKey::Threshold),
            interval = Config::get(ConfigKey::Interval),
            "config"
        );

        return Ok(());
    }

    /// Checks every numeric key parses and sits in range.
    pub fn validate() -> Result<()> {
        Config::channel_settings()?;
        Config::threshold()?;
        Config::interval()?;

        return Ok(());
    }

    pub fn channel_settings() -> Result<ChannelSettings> {
        let baud_rate = Config::get(ConfigKey::BaudRate);
        let baud_rate = match baud_rate.parse::<u32>() {
            Ok(val) if val > 0 => val,
            _ => bail!(format!(
                "Invalid value for '{}': {baud_rate}. Expected a positive whole number.",
                ConfigKey::BaudRate
            )),
        };

        let timeout = Config::get(ConfigKey::Timeout);
        let timeout = match timeout
            .parse::<f64>()
            .ok()
            .filter(|val| return *val > 0.0)
            .map(Duration::try_from_secs_f64)
        {
            Some(Ok(val)) => val,
            _ => bail!(format!(
                "Invalid value for '{}': {timeout}. Expected a positive number of seconds.",
                ConfigKey::Timeout
            )),
        };

        return Ok(ChannelSettings { baud_rate, timeout });
    }

    pub fn threshold() -> Result<i64> {
        let threshold = Config::get(ConfigKey::Threshold);
        match threshold.parse::<i64>() {
            Ok(val) if (0..=100).contains(&val) => return Ok(val),
            _ => bail!(format!(
                "Invalid value for '{}': {threshold}. Expected a whole number between 0 and 100.",
                ConfigKey::Threshold
            )),
        }
    }

    pub fn interval() -> Result<f64> {
        let interval = Config::get(ConfigKey::Interval);
        match interval.parse::<f64>() {
            Ok(val) if val.is_finite() && val > 0.0 => return Ok(val),
            _ => bail!(format!(
                "Invalid value for '{}': {interval}. Expected a positive number of minutes.",
                ConfigKey::Interval
            )),
        }
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::SessionID || key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_id() == key.to_string().as_str())?;

                let description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
