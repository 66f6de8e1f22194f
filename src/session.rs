//! Session controller: fetches targets and routes guesses into the game.
//!
//! Every fetch gets a [`FetchTicket`]. Only the result carrying the latest
//! ticket is applied; anything older arrived after a newer request was made
//! and is dropped. The game state is only replaced once a fetch succeeds, so
//! a failed fetch never corrupts it.

use crate::error::ProviderError;
use crate::game_state::{GameState, GuessOutcome, IgnoreReason};
use crate::generation::Generation;
use crate::target::{Target, TargetProvider};
use crate::{debug_log, info_log};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// A provider result tagged with the request it answers.
pub type FetchResult = (FetchTicket, Result<Target, ProviderError>);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub generation: Generation,
}

/// Borrowed snapshot of everything a presenter needs.
#[derive(Clone, Copy, Debug)]
pub struct SessionView<'a> {
    pub state: &'a GameState,
    pub generation: Generation,
    pub loading: bool,
    pub error: Option<&'a str>,
}

pub struct SessionController<P: TargetProvider + ?Sized> {
    provider: Arc<P>,
    generation: Generation,
    state: GameState,
    loading: bool,
    error: Option<String>,
    latest_ticket: u64,
}

impl<P: TargetProvider + ?Sized + 'static> SessionController<P> {
    pub fn new(provider: Arc<P>, config: SessionConfig) -> Self {
        Self {
            provider,
            generation: config.generation,
            state: GameState::new(),
            loading: false,
            error: None,
            latest_ticket: 0,
        }
    }

    /// Starts a new request, superseding any request still in flight.
    pub fn begin_request(&mut self) -> (FetchTicket, Generation) {
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        info_log!(
            "Requesting target #{} from {}",
            self.latest_ticket,
            self.generation
        );
        (FetchTicket(self.latest_ticket), self.generation)
    }

    /// Applies a provider result. Returns `false` when the ticket is stale
    /// and the result was dropped.
    pub fn complete_request(
        &mut self,
        ticket: FetchTicket,
        result: Result<Target, ProviderError>,
    ) -> bool {
        if ticket != FetchTicket(self.latest_ticket) {
            log::debug!(
                "Dropping stale fetch result {:?} (latest is {})",
                ticket,
                self.latest_ticket
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(target) => {
                log::info!("New game: target #{} ({})", target.id, target.name);
                self.state = GameState::with_target(target);
                self.error = None;
            }
            Err(e) => {
                log::error!("Failed to load target: {e}");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    async fn load(&mut self) {
        let (ticket, generation) = self.begin_request();
        let result = self.provider.fetch_random_target(&generation).await;
        self.complete_request(ticket, result);
    }

    pub async fn initialize(&mut self) {
        self.load().await;
    }

    pub async fn restart(&mut self) {
        self.load().await;
    }

    /// Switches generation; always starts a new game.
    pub async fn change_category(&mut self, generation: Generation) {
        self.generation = generation;
        self.load().await;
    }

    /// Like [`Self::restart`], but runs the fetch on a tokio task and sends
    /// the tagged result to `tx` for [`Self::complete_request`].
    pub fn spawn_request(&mut self, tx: &UnboundedSender<FetchResult>) -> FetchTicket {
        let (ticket, generation) = self.begin_request();
        let provider = Arc::clone(&self.provider);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch_random_target(&generation).await;
            if tx.send((ticket, result)).is_err() {
                debug_log!("Fetch result {:?} had no receiver", ticket);
            }
        });
        ticket
    }

    pub fn change_category_in_background(
        &mut self,
        generation: Generation,
        tx: &UnboundedSender<FetchResult>,
    ) -> FetchTicket {
        self.generation = generation;
        self.spawn_request(tx)
    }

    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.loading {
            return GuessOutcome::Ignored(IgnoreReason::Loading);
        }
        if self.error.is_some() {
            return GuessOutcome::Ignored(IgnoreReason::LoadFailed);
        }
        let outcome = self.state.submit_guess(raw);
        match &outcome {
            GuessOutcome::Accepted { status, .. } => log::info!(
                "Guess {}/{} '{}' -> {:?}",
                self.state.attempts().len(),
                crate::game_state::MAX_ATTEMPTS,
                raw,
                status
            ),
            GuessOutcome::Ignored(reason) => {
                debug_log!("Guess '{}' ignored: {:?}", raw, reason);
            }
        }
        outcome
    }

    pub fn update_current_attempt(&mut self, draft: &str) {
        self.state.update_current_attempt(draft);
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            state: &self.state,
            generation: self.generation,
            loading: self.loading,
            error: self.error.as_deref(),
        }
    }
}
