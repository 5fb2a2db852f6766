use sqlx::PgPool;
use study_config::{CorsConfig, DatabaseConfig};
use study_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool(&DatabaseConfig::from_env()).await,
        cors_config: CorsConfig::from_env(),
    }
}
