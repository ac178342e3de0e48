//! Browser driver seam: route installation, interception, and live fetch
//!
//! The browser automation layer is an external collaborator. It implements
//! [`BrowserDriver`] and [`Transport`]; the session installs a
//! [`RequestInterceptor`] through it and answers each intercepted request
//! with a [`RouteDecision`].

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::cassette::{RequestDescriptor, ResponseDescriptor};
use crate::Result;

/// An outbound request as seen by the interception hook
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    /// HTTP method (e.g., "GET", "POST")
    pub method: String,
    /// Full URL including query
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body, absent for bodiless requests
    pub post_data: Option<String>,
}

impl InterceptedRequest {
    /// Convert into the cassette wire representation
    #[must_use]
    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            url: self.url.clone(),
            method: self.method.clone(),
            headers: self.headers.clone(),
            post_data: self.post_data.clone(),
        }
    }
}

/// What the interceptor tells the driver to do with a request
#[derive(Debug, Clone)]
pub enum RouteDecision {
    /// Fulfill synthetically with explicit status/headers/body; the request
    /// never reaches the network
    Fulfill(ResponseDescriptor),
    /// Let the request continue to the live network unmodified
    Continue,
}

/// Performs the real network fetch for an intercepted request
pub trait Transport: Send + Sync {
    /// Fetch the request from the live network and return the response
    ///
    /// # Errors
    ///
    /// Returns [`crate::VcrError::Transport`] on network failure
    fn fetch<'a>(
        &'a self,
        request: &'a InterceptedRequest,
    ) -> BoxFuture<'a, Result<ResponseDescriptor>>;
}

/// Per-request callback invoked by the driver for every intercepted request
///
/// Implementations must tolerate concurrent invocation; a single driven
/// page may issue many outbound requests at once.
pub trait RequestInterceptor: Send + Sync {
    /// Decide what to do with one intercepted request
    ///
    /// # Errors
    ///
    /// Returns error if recording, persistence, or a strict-mode lookup
    /// fails; the driver surfaces the error to the enclosing scenario
    fn intercept<'a>(
        &'a self,
        request: InterceptedRequest,
        transport: &'a dyn Transport,
    ) -> BoxFuture<'a, Result<RouteDecision>>;
}

/// Hook-registration surface the browser automation layer must expose
pub trait BrowserDriver: Send + Sync {
    /// Register a catch-all interception route for the given URL glob
    ///
    /// # Errors
    ///
    /// Returns [`crate::VcrError::Driver`] if the route cannot be installed
    fn install_route<'a>(
        &'a self,
        pattern: &'a str,
        interceptor: Arc<dyn RequestInterceptor>,
    ) -> BoxFuture<'a, Result<()>>;

    /// Remove all interception routes installed by this session
    ///
    /// # Errors
    ///
    /// Returns [`crate::VcrError::Driver`] if deregistration fails
    fn remove_routes(&self) -> BoxFuture<'_, Result<()>>;
}
