use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Books/ratings store connection URL
    #[serde(default = "default_books_database_url")]
    pub books_database_url: String,

    /// Transit cluster/route store connection URL
    #[serde(default = "default_transit_database_url")]
    pub transit_database_url: String,

    /// Road-network snapshot file
    #[serde(default = "default_road_network_path")]
    pub road_network_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_books_database_url() -> String {
    "sqlite://books.db".to_string()
}

fn default_transit_database_url() -> String {
    "sqlite://transit.db".to_string()
}

fn default_road_network_path() -> String {
    "vestlandet_road_network.bin".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5006
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
