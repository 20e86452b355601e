use std::env;

use crate::env_flag;

/// Process-level switches read once at startup.
///
/// - `SERVER_ADDR`: listen address (default: `0.0.0.0:3000`)
/// - `RUN_MIGRATIONS`: apply pending migrations before serving (default: `true`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            run_migrations: env_flag("RUN_MIGRATIONS", true),
        }
    }
}
