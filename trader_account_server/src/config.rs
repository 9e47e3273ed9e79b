use std::env;

use log::*;
use trader_account_engine::sqlite::db::db_url;
use upstream_clients::UpstreamConfig;

const DEFAULT_TAS_HOST: &str = "127.0.0.1";
const DEFAULT_TAS_PORT: u16 = 8960;
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Queue depth for the loyalty change event channel. Publishers block once this many events are in flight.
    pub event_buffer_size: usize,
    /// Endpoints and credentials for the loyalty rule service and the tone analyzer.
    pub upstream: UpstreamConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_TAS_HOST.to_string(),
            port: DEFAULT_TAS_PORT,
            database_url: String::default(),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("TAS_HOST").ok().unwrap_or_else(|| DEFAULT_TAS_HOST.into());
        let port = env::var("TAS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for TAS_PORT. {e} Using the default, {DEFAULT_TAS_PORT}, instead."
                    );
                    DEFAULT_TAS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_TAS_PORT);
        let database_url = db_url();
        let event_buffer_size = env::var("TAS_EVENT_BUFFER_SIZE")
            .map(|s| {
                s.parse::<usize>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid value for TAS_EVENT_BUFFER_SIZE. {e} Using the default, \
                         {DEFAULT_EVENT_BUFFER_SIZE}, instead."
                    );
                    DEFAULT_EVENT_BUFFER_SIZE
                })
            })
            .ok()
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        let upstream = UpstreamConfig::from_env_or_default();
        Self { host, port, database_url, event_buffer_size, upstream }
    }
}
