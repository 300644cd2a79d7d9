use crate::config::AppConfig;
use crate::db;
use crate::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgresql://postgres@localhost/postgres".to_string(),
        query_tz: chrono_tz::UTC,
        static_root: None,
    }
}

/// State backed by a lazy pool that never actually connects. Suitable for
/// exercising everything that happens before a query is issued.
pub fn test_state() -> AppState {
    let config = test_config();
    let pool = db::connect_lazy(&config.database_url).expect("connect_lazy");
    AppState { config, db: pool }
}
