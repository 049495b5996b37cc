use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::UploadPipeline;
use tubely_storage::Storage;

use crate::auth::JwtService;

/// Shared application state, handed to handlers as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub pipeline: UploadPipeline,
    pub jwt: JwtService,
}
