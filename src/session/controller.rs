//! Interception controller: the per-session state machine

use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::cassette::{Cassette, CassetteStore, Entry};
use crate::driver::{InterceptedRequest, RequestInterceptor, RouteDecision, Transport};
use crate::fingerprint;
use crate::{Result, VcrError};

use super::mode::{self, Mode};

/// Session state
///
/// Record-mode mutation (append + persist) is serialized through the inner
/// mutex; playback lookups are read-only and run fully in parallel under
/// the outer read lock.
enum SessionState {
    Idle,
    Record { cassette: Mutex<Cassette> },
    Playback { cassette: Cassette, fingerprints: Vec<String> },
}

/// Playback lookup statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackStats {
    /// Requests served from the cassette
    pub hits: usize,
    /// Requests with no matching recording
    pub misses: usize,
}

/// Routes each intercepted request through matching, recording, or
/// pass-through logic
///
/// One controller per session; sessions in the same process never share
/// routing state.
pub struct InterceptionController {
    store: CassetteStore,
    cassette_name: String,
    strict_playback: bool,
    state: RwLock<SessionState>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl InterceptionController {
    /// Create an idle controller for the named cassette
    #[must_use]
    pub fn new(store: CassetteStore, cassette_name: &str, strict_playback: bool) -> Self {
        Self {
            store,
            cassette_name: cassette_name.to_string(),
            strict_playback,
            state: RwLock::new(SessionState::Idle),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Transition Idle -> Active, selecting the mode from cassette presence
    ///
    /// A corrupt cassette aborts here, before any hook is registered.
    ///
    /// # Errors
    ///
    /// Returns error if already active or if the cassette cannot be loaded
    pub async fn activate(&self) -> Result<Mode> {
        let mut state = self.state.write().await;
        if !matches!(*state, SessionState::Idle) {
            return Err(VcrError::Other(format!(
                "Session for cassette '{}' is already active",
                self.cassette_name
            )));
        }

        let (mode, cassette) = mode::select(&self.store, &self.cassette_name)?;
        *state = match mode {
            Mode::Record => SessionState::Record {
                cassette: Mutex::new(cassette),
            },
            Mode::Playback => {
                let fingerprints = cassette
                    .entries
                    .iter()
                    .map(|entry| entry.request.fingerprint())
                    .collect();
                SessionState::Playback {
                    cassette,
                    fingerprints,
                }
            }
        };

        Ok(mode)
    }

    /// Transition Active -> Idle, releasing the in-memory cassette
    ///
    /// Record-mode flushes are per-entry, so nothing needs writing here.
    pub async fn deactivate(&self) {
        let mut state = self.state.write().await;
        *state = SessionState::Idle;
    }

    /// Current mode, if active
    pub async fn mode(&self) -> Option<Mode> {
        match *self.state.read().await {
            SessionState::Idle => None,
            SessionState::Record { .. } => Some(Mode::Record),
            SessionState::Playback { .. } => Some(Mode::Playback),
        }
    }

    /// Playback hit/miss counters for this session
    pub fn stats(&self) -> PlaybackStats {
        PlaybackStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    async fn handle_request(
        &self,
        request: InterceptedRequest,
        transport: &dyn Transport,
    ) -> Result<RouteDecision> {
        // Non-network schemes (data:, blob:, about:) are never fingerprinted
        if !fingerprint::is_network_url(&request.url) {
            return Ok(RouteDecision::Continue);
        }

        let state = self.state.read().await;
        match &*state {
            // Hook fired after stop; nothing to match against
            SessionState::Idle => Ok(RouteDecision::Continue),
            SessionState::Record { cassette } => self.record(cassette, &request, transport).await,
            SessionState::Playback {
                cassette,
                fingerprints,
            } => self.playback(cassette, fingerprints, &request),
        }
    }

    /// Record path: real fetch, append, flush, then fulfill unmodified
    async fn record(
        &self,
        cassette: &Mutex<Cassette>,
        request: &InterceptedRequest,
        transport: &dyn Transport,
    ) -> Result<RouteDecision> {
        debug!("Recording request: {} {}", request.method, request.url);

        // Fetch outside the critical section so concurrent captures overlap
        // on the network; a transport failure propagates and nothing is
        // recorded for this request.
        let response = transport.fetch(request).await?;

        let mut cassette = cassette.lock().await;
        cassette.push(Entry::new(request.descriptor(), response.clone()));
        // Flush before fulfilling: abrupt termination never loses more than
        // the in-flight entry. A flush failure is fatal to the session.
        self.store.save(&cassette, &self.cassette_name)?;
        drop(cassette);

        Ok(RouteDecision::Fulfill(response))
    }

    /// Playback path: first-match scan, synthetic fulfill or pass-through
    fn playback(
        &self,
        cassette: &Cassette,
        fingerprints: &[String],
        request: &InterceptedRequest,
    ) -> Result<RouteDecision> {
        let request_fingerprint = fingerprint::fingerprint(
            &request.method,
            &request.url,
            request.post_data.as_deref(),
        );

        let matched = fingerprints
            .iter()
            .position(|fp| *fp == request_fingerprint)
            .map(|index| &cassette.entries[index]);

        if let Some(entry) = matched {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(
                "Replaying request: {} {} -> {}",
                request.method, request.url, entry.response.status
            );
            return Ok(RouteDecision::Fulfill(entry.response.clone()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        warn!(
            "No recording found for: {} {} (fingerprint {})",
            request.method, request.url, request_fingerprint
        );

        if self.strict_playback {
            Err(VcrError::NoMatchingRecording(request_fingerprint))
        } else {
            // Pass through to the live network; the cassette stays read-only
            Ok(RouteDecision::Continue)
        }
    }
}

impl RequestInterceptor for InterceptionController {
    fn intercept<'a>(
        &'a self,
        request: InterceptedRequest,
        transport: &'a dyn Transport,
    ) -> BoxFuture<'a, Result<RouteDecision>> {
        Box::pin(self.handle_request(request, transport))
    }
}
