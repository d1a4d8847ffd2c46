use chrono::{DateTime, Utc};
use log::{debug, error, info};

use crate::error::FetchError;
use crate::models::Conversation;
use crate::presenter::{self, RenderState};

/// Identifies one fetch trigger. Later triggers always compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug)]
pub enum Commit {
    Applied(usize),
    Failed(FetchError),
    Stale,
}

/// Displayed state: the conversation list and the loading flag.
///
/// Only the result of the most recent fetch may be committed. Failures clear
/// the loading flag but keep whatever list was shown before, so a partial
/// listing is never displayed.
#[derive(Debug, Default)]
pub struct Dashboard {
    loading: bool,
    conversations: Vec<Conversation>,
    latest: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn begin_fetch(&mut self) -> Generation {
        self.latest += 1;
        self.loading = true;
        debug!("fetch generation {} started", self.latest);
        Generation(self.latest)
    }

    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<Vec<Conversation>, FetchError>,
    ) -> Commit {
        if generation.0 != self.latest {
            debug!(
                "dropping result of generation {}, latest is {}",
                generation.0, self.latest
            );
            return Commit::Stale;
        }

        self.loading = false;

        match result {
            Ok(conversations) => {
                info!("conversations loaded: {}", conversations.len());
                self.conversations = conversations;
                Commit::Applied(self.conversations.len())
            }
            Err(e) => {
                error!("failed to load conversations: {}", e);
                Commit::Failed(e)
            }
        }
    }

    pub fn render_state(&self, now: DateTime<Utc>, dedupe: bool) -> RenderState {
        presenter::present(self.loading, &self.conversations, now, dedupe)
    }
}
