//! Fetch state machine for one portfolio session.
//!
//! A request goes through three steps: [`Orchestrator::begin`] validates the
//! handle and moves to `Fetching`, [`Ticket::run`] performs the network work
//! without borrowing the orchestrator, and [`Orchestrator::complete`] applies
//! the outcome. Every `begin` bumps a generation counter and `complete` only
//! applies outcomes of the newest generation, so a late answer to an older
//! request can never overwrite a newer one.

use anyhow::Result;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::{
    backend::PortfolioApi,
    error::PortfolioError,
    http::{InvalidBody, StatusFailure},
    portfolio::{Portfolio, normalize},
};

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching { handle: String, generation: u64 },
    Succeeded(Portfolio),
    Failed(PortfolioError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Deadline for the profile request; expiry counts as `Unavailable`.
    pub timeout: Option<Duration>,
    /// Whether to store the raw payload through the backend after a fetch.
    pub persist: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            persist: true,
        }
    }
}

/// A background snapshot save that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    pub handle: String,
    pub reason: String,
}

struct PendingSave {
    handle: String,
    task: JoinHandle<()>,
}

/// Failures reported by save tasks, collected until the next flush.
#[derive(Debug, Clone, Default)]
struct SaveLog(Arc<Mutex<Vec<SaveFailure>>>);

impl SaveLog {
    fn record(&self, handle: String, reason: String) {
        warn!(
            "Failed to save portfolio snapshot for {}: {}",
            handle, reason
        );
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SaveFailure { handle, reason });
    }

    fn drain(&self) -> Vec<SaveFailure> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Permission to run one request, handed out by [`Orchestrator::begin`].
#[derive(Debug, Clone)]
pub struct Ticket {
    handle: String,
    generation: u64,
    options: FetchOptions,
    saves: SaveLog,
}

/// Result of [`Ticket::run`], to be handed back to [`Orchestrator::complete`].
pub struct FetchOutcome {
    handle: String,
    generation: u64,
    result: Result<Portfolio, PortfolioError>,
    save: Option<PendingSave>,
}

impl FetchOutcome {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> &Result<Portfolio, PortfolioError> {
        &self.result
    }
}

pub struct Orchestrator {
    state: FetchState,
    generation: u64,
    options: FetchOptions,
    pending_saves: Vec<PendingSave>,
    save_log: SaveLog,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(FetchOptions::default())
    }
}

impl Orchestrator {
    pub fn new(options: FetchOptions) -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
            options,
            pending_saves: Vec::new(),
            save_log: SaveLog::default(),
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The current portfolio, only while in `Succeeded`.
    pub fn portfolio(&self) -> Option<&Portfolio> {
        match &self.state {
            FetchState::Succeeded(portfolio) => Some(portfolio),
            _ => None,
        }
    }

    /// Number of background saves still tracked. Finished saves are dropped
    /// on the next [`Self::begin`]; their failures stay queued for
    /// [`Self::flush_saves`].
    pub fn pending_saves(&self) -> usize {
        self.pending_saves.len()
    }

    /// Starts a new request, superseding any request still in flight.
    ///
    /// An empty or whitespace-only handle is rejected without touching the state.
    pub fn begin(&mut self, raw_handle: &str) -> Result<Ticket, PortfolioError> {
        let handle = raw_handle.trim();
        if handle.is_empty() {
            debug!("Rejecting empty handle");
            return Err(PortfolioError::InvalidInput);
        }

        self.pending_saves.retain(|save| !save.task.is_finished());

        if let FetchState::Fetching { handle: previous, .. } = &self.state {
            debug!("Request for {} superseded by {}", previous, handle);
        }

        self.generation += 1;
        self.state = FetchState::Fetching {
            handle: handle.to_string(),
            generation: self.generation,
        };

        Ok(Ticket {
            handle: handle.to_string(),
            generation: self.generation,
            options: self.options.clone(),
            saves: self.save_log.clone(),
        })
    }

    /// Applies an outcome if it belongs to the newest request.
    /// Returns `false` when the outcome was stale and got discarded.
    pub fn complete(&mut self, outcome: FetchOutcome) -> bool {
        if let Some(save) = outcome.save {
            self.pending_saves.push(save);
        }

        if outcome.generation != self.generation {
            debug!(
                "Discarding stale result for {} (generation {}, current {})",
                outcome.handle, outcome.generation, self.generation
            );
            return false;
        }

        self.state = match outcome.result {
            Ok(portfolio) => {
                info!(
                    "Portfolio ready for {} ({} repositories)",
                    portfolio.profile.handle,
                    portfolio.repositories.len()
                );
                FetchState::Succeeded(portfolio)
            }
            Err(e) => {
                warn!(
                    "Portfolio request for {} failed ({}): {}",
                    outcome.handle,
                    e.category(),
                    e.detail().unwrap_or("-")
                );
                FetchState::Failed(e)
            }
        };
        true
    }

    /// Runs a full request for `raw_handle` and returns its result.
    #[tracing::instrument(skip(self, api))]
    pub async fn generate(
        &mut self,
        api: Arc<dyn PortfolioApi>,
        raw_handle: &str,
    ) -> Result<&Portfolio, PortfolioError> {
        let ticket = self.begin(raw_handle)?;
        let outcome = ticket.run(api).await;
        self.complete(outcome);

        match &self.state {
            FetchState::Succeeded(portfolio) => Ok(portfolio),
            FetchState::Failed(e) => Err(e.clone()),
            state => Err(PortfolioError::unavailable(format!(
                "request ended in unexpected state {:?}",
                state
            ))),
        }
    }

    /// Waits for all background saves and returns the ones that failed.
    pub async fn flush_saves(&mut self) -> Vec<SaveFailure> {
        for save in std::mem::take(&mut self.pending_saves) {
            if let Err(e) = save.task.await {
                self.save_log
                    .record(save.handle, format!("save task did not finish: {}", e));
            }
        }

        self.save_log.drain()
    }
}

impl Ticket {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetches, optionally saves, and normalizes. Never touches orchestrator state.
    #[tracing::instrument(skip(self, api), fields(handle = %self.handle, generation = self.generation))]
    pub async fn run(self, api: Arc<dyn PortfolioApi>) -> FetchOutcome {
        let (result, save) = match self.fetch(api.as_ref()).await {
            Ok(payload) => {
                let save = self
                    .options
                    .persist
                    .then(|| spawn_save(api.clone(), &self.handle, payload.clone(), &self.saves));
                (normalize(&payload, Some(self.handle.as_str())), save)
            }
            Err(e) => (Err(e), None),
        };

        FetchOutcome {
            handle: self.handle,
            generation: self.generation,
            result,
            save,
        }
    }

    async fn fetch(&self, api: &dyn PortfolioApi) -> Result<Value, PortfolioError> {
        let request = api.fetch_user(&self.handle);
        let response = match self.options.timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(response) => response,
                Err(_) => {
                    return Err(PortfolioError::unavailable(format!(
                        "no response within {:?}",
                        limit
                    )));
                }
            },
            None => request.await,
        };
        response.map_err(|e| classify_fetch_error(&self.handle, e))
    }
}

fn spawn_save(
    api: Arc<dyn PortfolioApi>,
    handle: &str,
    payload: Value,
    log: &SaveLog,
) -> PendingSave {
    let task_handle = handle.to_string();
    let log = log.clone();
    let task = tokio::spawn(async move {
        match api.save_portfolio(&task_handle, &payload).await {
            Ok(()) => debug!("Saved portfolio snapshot for {}", task_handle),
            Err(e) => log.record(task_handle, format!("{:#}", e)),
        }
    });
    PendingSave {
        handle: handle.to_string(),
        task,
    }
}

/// Maps a backend error onto the user-facing taxonomy.
fn classify_fetch_error(handle: &str, error: anyhow::Error) -> PortfolioError {
    if let Some(failure) = error.downcast_ref::<StatusFailure>() {
        return match failure {
            StatusFailure::NotFound(_) => PortfolioError::NotFound {
                handle: handle.to_string(),
            },
            other => PortfolioError::unavailable(other.to_string()),
        };
    }
    if let Some(body) = error.downcast_ref::<InvalidBody>() {
        return PortfolioError::malformed(body.to_string());
    }
    PortfolioError::unavailable(format!("{:#}", error))
}
