use instructor_auth::TokenService;
use instructor_config::{CorsConfig, JwtConfig};
use instructor_db::Store;

/// Shared by every request. Cloning is cheap: the store and the token keys are behind
/// `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tokens: TokenService,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Store, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            tokens: TokenService::new(jwt_config),
            cors_config,
        }
    }
}
