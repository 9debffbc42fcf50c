use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub production: bool,
}

impl Config {
    pub fn load() -> Self {
        let environment: String = try_load("APEX_ENV", "development");

        Self {
            port: try_load("APEX_PORT", "3000"),
            data_dir: PathBuf::from(try_load::<String>("APEX_DATA_DIR", "data")),
            public_dir: PathBuf::from(try_load::<String>("APEX_PUBLIC_DIR", "public")),
            production: environment == "production",
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
