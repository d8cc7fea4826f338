//! Session-scoped action calls
//!
//! [`ActionClient`] sends actions through a [`Transport`] and applies the
//! envelope contract uniformly: any status other than `"success"` is a hard
//! failure carrying the provider's short and long message. A failed `login`
//! is reported as [`Error::Authentication`], every other failed action as
//! [`Error::ProviderAction`]. A `responsedata` that does not decode into the
//! expected shape is [`Error::Decode`].
//!
//! [`ActionClient::with_session`] brackets an operation with `login` and
//! `logout`. Logout happens on every exit path:
//!
//! - success or error: awaited before returning, bounded by the logout timeout
//! - cancellation (the future is dropped): the [`SessionGuard`] fires a
//!   detached, equally bounded logout on the current runtime
//!
//! A failed or timed-out logout is logged and never replaces the
//! operation's own result.

use crate::protocol::{ActionRequest, ActionResponse, RequestParam, SessionData, action};
use crate::transport::Transport;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};
use zonesync_core::{Error, Result};

/// API credentials
#[derive(Clone)]
pub struct Credentials {
    customer_number: String,
    api_key: String,
    api_password: String,
}

impl Credentials {
    /// Bundle the three credential parts
    pub fn new(
        customer_number: impl Into<String>,
        api_key: impl Into<String>,
        api_password: impl Into<String>,
    ) -> Self {
        Self {
            customer_number: customer_number.into(),
            api_key: api_key.into(),
            api_password: api_password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("customer_number", &self.customer_number)
            .field("api_key", &"<REDACTED>")
            .field("api_password", &"<REDACTED>")
            .finish()
    }
}

/// Authentication token returned by `login`
///
/// Valid until `logout`. Never persisted and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    /// Wrap a session id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw session id, for request parameters
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Session(<REDACTED>)")
    }
}

/// Sends actions to the provider
///
/// Cheap to clone: transport and credentials are shared.
#[derive(Clone)]
pub struct ActionClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<Credentials>,
    logout_timeout: Duration,
    /// Detached logouts still running
    abandoned: Arc<watch::Sender<usize>>,
}

impl ActionClient {
    /// Create a client
    ///
    /// `logout_timeout` bounds every logout attempt.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        logout_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            credentials: Arc::new(credentials),
            logout_timeout,
            abandoned: Arc::new(watch::channel(0).0),
        }
    }

    /// Parameters every action carries
    pub(crate) fn params<'a>(&'a self, session: Option<&'a Session>) -> RequestParam<'a> {
        RequestParam {
            domain_name: None,
            customer_number: &self.credentials.customer_number,
            api_key: &self.credentials.api_key,
            api_password: None,
            api_session_id: session.map(Session::id),
            dns_record_set: None,
        }
    }

    /// Send one action and decode its `responsedata`
    pub async fn call<R: DeserializeOwned>(&self, name: &str, param: RequestParam<'_>) -> Result<R> {
        debug!("netcup action {}", name);

        let request = serde_json::to_value(ActionRequest { action: name, param })?;
        let raw = self.transport.exchange(&request).await?;
        let response: ActionResponse = serde_json::from_value(raw)?;

        if !response.is_success() {
            debug!(
                "netcup action {} failed: {}: {}",
                name, response.short_message, response.long_message
            );
            return Err(if name == action::LOGIN {
                Error::auth(response.short_message, response.long_message)
            } else {
                Error::provider_action(name, response.short_message, response.long_message)
            });
        }

        debug!(
            "netcup action {}: {}: {}",
            name, response.short_message, response.long_message
        );
        // Payload problems (e.g. a non-numeric ttl) are decode failures, not
        // envelope failures
        serde_json::from_value(response.response_data)
            .map_err(|e| Error::decode(format!("{} response: {}", name, e)))
    }

    /// Open a session
    pub async fn login(&self) -> Result<Session> {
        let param = RequestParam {
            api_password: Some(self.credentials.api_password.as_str()),
            ..self.params(None)
        };
        let data: SessionData = self.call(action::LOGIN, param).await?;
        if data.api_session_id.is_empty() {
            return Err(Error::auth("Login returned no session", ""));
        }
        Ok(Session::new(data.api_session_id))
    }

    /// Close a session
    pub async fn logout(&self, session: &Session) -> Result<()> {
        let _: IgnoredAny = self.call(action::LOGOUT, self.params(Some(session))).await?;
        Ok(())
    }

    /// Close a session, bounded by the logout timeout, swallowing failures
    pub async fn logout_quietly(&self, session: &Session) {
        match tokio::time::timeout(self.logout_timeout, self.logout(session)).await {
            Ok(Ok(())) => debug!("netcup session closed"),
            Ok(Err(e)) => warn!("netcup logout failed (ignored): {}", e),
            Err(_) => warn!(
                "netcup logout timed out after {:?} (ignored)",
                self.logout_timeout
            ),
        }
    }

    /// Wait for the detached logouts of abandoned sessions to finish
    ///
    /// Returns immediately when none are running, and gives up after the
    /// logout timeout otherwise.
    pub async fn wait_for_abandoned(&self) {
        let mut pending = self.abandoned.subscribe();
        let drained = tokio::time::timeout(self.logout_timeout, pending.wait_for(|n| *n == 0))
            .await
            .is_ok();
        if !drained {
            warn!(
                "netcup background logout still running after {:?}",
                self.logout_timeout
            );
        }
    }

    /// Run `operation` inside a session
    ///
    /// If login fails, `operation` is never invoked and the login error is
    /// returned. Otherwise the session is closed whatever the operation's
    /// outcome, and that outcome is returned unchanged.
    pub async fn with_session<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let session = self.login().await?;
        let guard = SessionGuard::new(self.clone(), session.clone());

        let outcome = operation(session).await;

        guard.close().await;
        outcome
    }
}

impl std::fmt::Debug for ActionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionClient")
            .field("credentials", &self.credentials)
            .field("logout_timeout", &self.logout_timeout)
            .finish_non_exhaustive()
    }
}

/// Owns an open session until it is closed
///
/// [`close`](Self::close) logs out in place. Dropping an unclosed guard
/// (the enclosing future was cancelled) logs out in a detached task.
pub struct SessionGuard {
    client: ActionClient,
    session: Option<Session>,
}

impl SessionGuard {
    /// Take ownership of an open session
    pub fn new(client: ActionClient, session: Session) -> Self {
        Self {
            client,
            session: Some(session),
        }
    }

    /// Log out and disarm the guard
    pub async fn close(mut self) {
        if let Some(session) = self.session.as_ref() {
            self.client.logout_quietly(session).await;
        }
        self.session = None;
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("netcup session abandoned outside a runtime, skipping logout");
            return;
        };

        debug!("netcup session abandoned, logging out in the background");
        let client = self.client.clone();
        client.abandoned.send_modify(|n| *n += 1);
        handle.spawn(async move {
            client.logout_quietly(&session).await;
            client.abandoned.send_modify(|n| *n = n.saturating_sub(1));
        });
    }
}
