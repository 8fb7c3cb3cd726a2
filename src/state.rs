use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;

use crate::config::Config;
use crate::translate::{ModelFamily, Translator};

/// Shared application state. The session slot holds the one resident
/// model; it is replaced as a unit under the write lock, so a load failure
/// leaves the previous model active and two concurrent loads cannot leave
/// torn state behind.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: Arc<RwLock<Option<ActiveModel>>>,
}

/// The currently loaded model family and its engine. Readers clone the
/// engine handle and release the lock before running inference, so an
/// in-flight translation finishes against the model it started with even
/// if the slot is swapped underneath it.
#[derive(Clone)]
pub struct ActiveModel {
    pub family: ModelFamily,
    pub translator: Arc<Mutex<dyn Translator>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: Arc::new(RwLock::new(None)),
        }
    }
}
