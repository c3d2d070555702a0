use crate::storage::resolve_data_path;
use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
}

impl Config {
    /// Reads `APP_DATA_PATH` and `PORT`. An unparsable port falls back to 8080.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| parse_port(&value))
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_path: resolve_data_path(),
            port,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok()
}
