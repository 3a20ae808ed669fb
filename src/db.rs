use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::DbConfig;

pub fn connect_options(cfg: &DbConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.name)
}

/// Builds the pool without opening a connection; the first query connects.
pub fn lazy_pool(cfg: &DbConfig) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_lazy_with(connect_options(cfg))
}
