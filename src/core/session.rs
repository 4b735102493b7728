use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::model::{CadastralNumber, ParcelRecord};
use crate::domain::ports::{Notifier, ParcelLookup};

/// What the result surface should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Empty,
    Loading,
    Populated,
}

/// Process-local session state: the input text, the loading flag and the
/// last fetched record. Replaced-wholesale semantics: `record` is never
/// partially mutated.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub input: String,
    pub loading: bool,
    pub record: Option<ParcelRecord>,
}

impl SessionState {
    pub fn display_mode(&self) -> DisplayMode {
        if self.loading {
            DisplayMode::Loading
        } else if self.record.is_some() {
            DisplayMode::Populated
        } else {
            DisplayMode::Empty
        }
    }
}

/// Sequences user interaction: validate, look up, populate.
///
/// At most one lookup is in flight at a time. A new submit while loading
/// aborts the previous task, and a generation counter guards the state so a
/// superseded lookup can never overwrite a newer one (last write wins).
/// A failed lookup leaves the previously displayed record untouched.
pub struct SessionController<L, N> {
    lookup: Arc<L>,
    notifier: Arc<N>,
    state: Arc<Mutex<SessionState>>,
    generation: Arc<AtomicU64>,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl<L, N> SessionController<L, N>
where
    L: ParcelLookup + 'static,
    N: Notifier + 'static,
{
    pub fn new(lookup: Arc<L>, notifier: Arc<N>) -> Self {
        Self {
            lookup,
            notifier,
            state: Arc::new(Mutex::new(SessionState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            inflight: Mutex::new(None),
        }
    }

    pub async fn set_input(&self, text: &str) {
        self.state.lock().await.input = text.to_string();
    }

    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Validates the current input and, if well-formed, starts a lookup.
    /// Returns `true` when a lookup was issued.
    pub async fn submit(&self) -> bool {
        let input = self.state.lock().await.input.clone();

        let cadastral_number = match CadastralNumber::from_str(&input) {
            Ok(number) => number,
            Err(_) => {
                tracing::warn!("Rejected malformed cadastral number: '{}'", input);
                self.notifier.validation_error(&input);
                return false;
            }
        };

        // Claim a new generation before touching the in-flight task so the
        // superseded one loses even if it completes during the handover.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = self.inflight.lock().await.take() {
            tracing::debug!("Aborting superseded lookup");
            previous.abort();
        }

        self.state.lock().await.loading = true;

        let lookup = Arc::clone(&self.lookup);
        let notifier = Arc::clone(&self.notifier);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);

        let handle = tokio::spawn(async move {
            tracing::debug!("Looking up parcel {}", cadastral_number);
            let result = lookup.lookup(&cadastral_number).await;

            if latest.load(Ordering::SeqCst) != generation {
                // A newer submit owns the state now.
                return;
            }

            let mut guard = state.lock().await;
            guard.loading = false;
            match result {
                Ok(record) => {
                    notifier.lookup_succeeded(&record);
                    guard.record = Some(record);
                }
                Err(error) => {
                    notifier.lookup_failed(&error);
                }
            }
        });

        *self.inflight.lock().await = Some(handle);
        true
    }

    /// Waits for the current lookup, if any, to finish. Abort of a
    /// superseded task is not an error here.
    pub async fn wait_idle(&self) {
        let handle = self.inflight.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
