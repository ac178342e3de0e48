//! Scoped session lifecycle around the interception controller

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cassette::CassetteStore;
use crate::config::Config;
use crate::driver::{BrowserDriver, RequestInterceptor};
use crate::Result;

use super::controller::{InterceptionController, PlaybackStats};
use super::mode::Mode;

/// A started record/playback session
///
/// `start()` selects the mode, loads or initializes the cassette, and
/// registers the interception route with the driver; `stop()` deregisters
/// the route and releases the in-memory cassette. Expected exactly one
/// `stop()` per `start()`; use [`with_vcr`] to get that on every exit path.
pub struct VcrSession<'d, D: BrowserDriver + ?Sized> {
    driver: &'d D,
    controller: Arc<InterceptionController>,
    mode: Mode,
}

impl<'d, D: BrowserDriver + ?Sized> std::fmt::Debug for VcrSession<'d, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VcrSession")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'d, D: BrowserDriver + ?Sized> VcrSession<'d, D> {
    /// Start a session for the named cassette
    ///
    /// # Errors
    ///
    /// Returns [`crate::VcrError::CorruptCassette`] before any hook is
    /// registered if an existing cassette cannot be parsed, or
    /// [`crate::VcrError::Driver`] if route installation fails
    pub async fn start(driver: &'d D, config: &Config, cassette_name: &str) -> Result<Self> {
        config.validate()?;

        let store = CassetteStore::new(config.cassette_dir.clone());
        let controller = Arc::new(InterceptionController::new(
            store,
            cassette_name,
            config.strict_playback,
        ));

        let mode = controller.activate().await?;

        let interceptor: Arc<dyn RequestInterceptor> = Arc::<InterceptionController>::clone(&controller);
        if let Err(e) = driver.install_route(&config.route_pattern, interceptor).await {
            controller.deactivate().await;
            return Err(e);
        }

        info!(
            "Session started for cassette '{}' in {:?} mode",
            cassette_name, mode
        );

        Ok(Self {
            driver,
            controller,
            mode,
        })
    }

    /// The mode selected at start, fixed for this session
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Playback hit/miss counters for this session
    #[must_use]
    pub fn stats(&self) -> PlaybackStats {
        self.controller.stats()
    }

    /// Stop the session, deregistering the interception route
    ///
    /// Record-mode flushes are per-entry, so no final write is needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VcrError::Driver`] if deregistration fails; the
    /// controller is returned to Idle regardless
    pub async fn stop(self) -> Result<()> {
        let removed = self.driver.remove_routes().await;
        self.controller.deactivate().await;
        debug!("Session stopped");
        removed
    }
}

/// Run a scenario under record/playback, guaranteeing `stop()` on every
/// exit path
///
/// The scenario's own error takes precedence over a stop failure.
///
/// # Errors
///
/// Returns the first of: start failure, scenario failure, stop failure
pub async fn with_vcr<D, F, Fut, T>(
    driver: &D,
    config: &Config,
    cassette_name: &str,
    scenario: F,
) -> Result<T>
where
    D: BrowserDriver + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = VcrSession::start(driver, config, cassette_name).await?;

    let outcome = scenario().await;
    let stopped = session.stop().await;

    let value = outcome?;
    stopped?;
    Ok(value)
}
