pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::Arc;

use crate::{
    config::Config,
    error::Result,
    models::UserDirectory,
    services::{CommentLedger, IdeaRepository, ReviewWorkflow, VoteLedger},
    storage::BlobStore,
};

/// Every ledger wired to one store. Build it once at startup and hand it (or
/// its parts) to whatever needs them.
pub struct IdeaBoard {
    pub ideas: Arc<IdeaRepository>,
    pub votes: VoteLedger,
    pub reviews: ReviewWorkflow,
    pub comments: CommentLedger,
}

impl IdeaBoard {
    pub fn new(store: BlobStore) -> Self {
        let ideas = Arc::new(IdeaRepository::new(store.clone()));
        Self {
            votes: VoteLedger::new(store.clone(), Arc::clone(&ideas)),
            reviews: ReviewWorkflow::new(store.clone(), Arc::clone(&ideas)),
            comments: CommentLedger::new(store),
            ideas,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        tracing::info!("Opening idea board on {:?} storage", config.storage_backend);
        Ok(Self::new(BlobStore::from_config(config)?))
    }

    /// Resolves missing comment author and reviewer names through `directory`.
    pub fn with_directory(self, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            reviews: self.reviews.with_directory(Arc::clone(&directory)),
            comments: self.comments.with_directory(directory),
            ..self
        }
    }
}
