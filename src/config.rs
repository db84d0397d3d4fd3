use anyhow::{bail, Context, Result};
use std::net::SocketAddr;

#[derive(Clone, Debug)]
pub struct TaxApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub create_database: bool,
}

impl TaxApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .context("Failed to determine DATABASE_URL from environment variables")?;

        let max_connections = match lookup("MAX_CONNECTIONS") {
            Some(val) => val
                .parse::<u32>()
                .with_context(|| format!("MAX_CONNECTIONS '{}' is not a number", val))?,
            None => 15,
        };
        if max_connections == 0 {
            bail!("MAX_CONNECTIONS must be at least 1");
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR '{}' is not a socket address", bind_addr))?;

        let create_database = match lookup("CREATE_DATABASE").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => bail!("CREATE_DATABASE must be 'true' or 'false', got '{}'", other),
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            create_database,
        })
    }
}
