use crate::config::AppConfig;
use crate::db;
use crate::users::repo::{MySqlUserStore, UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = db::lazy_pool(&config.db);
        let users = Arc::new(MySqlUserStore::new(pool)) as Arc<dyn UserStore>;
        Ok(Self::from_parts(users, config))
    }

    pub fn from_parts(users: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }

    #[cfg(test)]
    pub fn fake(users: Arc<dyn UserStore>) -> Self {
        let config = Arc::new(AppConfig {
            db: crate::config::DbConfig {
                host: "localhost".into(),
                port: 3306,
                user: "test".into(),
                password: "test".into(),
                name: "test".into(),
                max_connections: 1,
            },
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(users, config)
    }
}
