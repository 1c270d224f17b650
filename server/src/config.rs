use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Parser, Debug, Clone)]
#[command(name = "crop-server")]
#[command(about = "Crop recommendation and weather API, plus the browser client", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "CROP_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Upstream forecast endpoint queried for current conditions
    #[arg(long, env = "CROP_WEATHER_URL", default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    #[arg(long, env = "CROP_WEATHER_TIMEOUT_SECS", default_value_t = 10)]
    pub weather_timeout_secs: u64,

    /// Directory holding index.html, public/ and the wasm pkg/
    #[arg(long, env = "CROP_CLIENT_DIR", default_value = "./client")]
    pub client_dir: PathBuf,
}

impl Config {
    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_secs)
    }
}
