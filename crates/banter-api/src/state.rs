use banter_llm::Completer;
use banter_persist::MessageStore;
use banter_types::ModelCatalog;
use std::sync::Arc;

use crate::config::Config;
use crate::service::MessageService;

/// Shared application state passed to all handlers
///
/// Built once at startup from the loaded [`Config`]; handlers never look at
/// the environment themselves.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub messages: MessageService,
    pub catalog: ModelCatalog,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn MessageStore>, completer: Completer) -> Self {
        let catalog = completer.catalog().clone();
        Self {
            config: Arc::new(config),
            messages: MessageService::new(store, completer),
            catalog,
        }
    }
}
