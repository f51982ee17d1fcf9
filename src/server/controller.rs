// Copyright 2026 BtLink Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Server lifecycle controller.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::constants::ConnectionMode;
use super::listener::{LifecycleEvent, ListenerTask};
use crate::error::ServerError;
use crate::gateway::AdapterGateway;

/// Lifecycle notifications, invoked on the controlling context regardless of
/// which context produced the event.
///
/// Every method has an empty default so callers implement only what they
/// care about.
pub trait StateObserver: Send + Sync {
    /// The service was registered; the session is waiting for a peer.
    fn on_open_succeeded(&self, _mode: ConnectionMode) {}

    /// The session could not be opened.
    fn on_open_failed(&self, _error: &ServerError) {}

    /// The pending accept failed for a reason other than cancellation.
    fn on_accept_failed(&self, _error: &ServerError) {}

    /// A close request completed.
    fn on_closed(&self) {}
}

type ObserverSlot = Arc<RwLock<Option<Box<dyn StateObserver>>>>;

/// One-to-one rendezvous server: advertises a named service, waits for
/// exactly one inbound connection per session and hands the established
/// channel to the accept callback.
///
/// At most one listen session is alive at a time. A session ends by peer
/// connection, by [`stop`](Self::stop), or by a transport failure; after any
/// of those a fresh [`start_listening`](Self::start_listening) opens a new
/// one.
pub struct RendezvousServer<G: AdapterGateway> {
    gateway: Arc<G>,
    observer: ObserverSlot,
    events: mpsc::Sender<LifecycleEvent>,
    // Guards "read task, cancel, clear" against a racing natural completion.
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<G: AdapterGateway> RendezvousServer<G> {
    /// Create the controller and start its event dispatcher.
    ///
    /// Must be called within a Tokio runtime: the dispatcher task spawned
    /// here is the controlling context on which observer callbacks run.
    pub fn new(gateway: G) -> Self {
        let (events, mut event_rx) = mpsc::channel::<LifecycleEvent>(32);
        let observer: ObserverSlot = Arc::new(RwLock::new(None));

        // Single drainer: events reach the observer in production order.
        let dispatch_slot = observer.clone();
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                if let Some(observer) = dispatch_slot.read().as_deref() {
                    dispatch(observer, &event);
                }
            }
        });

        Self {
            gateway: Arc::new(gateway),
            observer,
            events,
            task: Mutex::new(None),
        }
    }

    /// Whether a usable transport exists on this device.
    pub fn is_transport_available(&self) -> bool {
        self.gateway.is_transport_available()
    }

    /// Power the adapter on if it is off. Idempotent and session-free: no
    /// lifecycle event is produced on success, and adapter errors go back to
    /// the caller without counting as a session failure.
    pub async fn open_adapter(&self) -> Result<bool, ServerError> {
        if !self.is_transport_available() {
            self.emit(LifecycleEvent::OpenFailed(ServerError::Unsupported))
                .await;
            return Err(ServerError::Unsupported);
        }
        if self
            .gateway
            .is_powered_on()
            .await
            .map_err(ServerError::Adapter)?
        {
            debug!("Adapter already powered on");
            return Ok(true);
        }
        let powered = self
            .gateway
            .power_on()
            .await
            .map_err(ServerError::Adapter)?;
        info!("Adapter power-on requested (powered: {})", powered);
        Ok(powered)
    }

    /// Register the lifecycle observer, replacing any previous one.
    pub fn set_state_observer<O>(&self, observer: O)
    where
        O: StateObserver + 'static,
    {
        *self.observer.write() = Some(Box::new(observer));
    }

    /// Open the server for one listen session.
    ///
    /// Fails fast with [`ServerError::Unsupported`] (also reported to the
    /// observer) or [`ServerError::PoweredOff`] (return path only) before
    /// any task is spawned. If a session is already alive this is a logged
    /// no-op. Otherwise one listener task is spawned and the call returns
    /// immediately; registration and accept outcomes arrive through the
    /// observer, and `on_accept` is invoked at most once, from the
    /// background task.
    pub async fn start_listening<F>(
        &self,
        mode: ConnectionMode,
        on_accept: F,
    ) -> Result<(), ServerError>
    where
        F: FnOnce(G::Channel) + Send + 'static,
    {
        if !self.is_transport_available() {
            self.emit(LifecycleEvent::OpenFailed(ServerError::Unsupported))
                .await;
            return Err(ServerError::Unsupported);
        }
        if !self
            .gateway
            .is_powered_on()
            .await
            .map_err(ServerError::Adapter)?
        {
            // Direct return-path signal; no observer event for this one.
            return Err(ServerError::PoweredOff);
        }

        let mut slot = self.task.lock();
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            debug!("Server already open, ignoring start request");
            return Ok(());
        }

        info!("Opening {} listen session", mode.as_str());
        let task = ListenerTask::new(self.gateway.clone(), mode, self.events.clone());
        *slot = Some(tokio::spawn(task.run(on_accept)));
        Ok(())
    }

    /// Close the server.
    ///
    /// Cancels the pending accept if a session is alive and always emits
    /// exactly one close notification, even when nothing was listening.
    pub async fn stop(&self) {
        if !self.is_transport_available() {
            self.emit(LifecycleEvent::OpenFailed(ServerError::Unsupported))
                .await;
            return;
        }
        let taken = self.task.lock().take();
        if let Some(task) = taken {
            if !task.is_finished() {
                info!("Cancelling pending accept");
            }
            // Aborting drops the listener inside the task, which closes the
            // endpoint and unblocks the accept.
            task.abort();
        }
        self.emit(LifecycleEvent::Closed).await;
    }

    /// Whether a listen session is currently alive.
    pub fn is_listening(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    async fn emit(&self, event: LifecycleEvent) {
        let _ = self.events.send(event).await;
    }
}

fn dispatch(observer: &dyn StateObserver, event: &LifecycleEvent) {
    match event {
        LifecycleEvent::OpenSucceeded { mode } => observer.on_open_succeeded(*mode),
        LifecycleEvent::OpenFailed(e) => observer.on_open_failed(e),
        LifecycleEvent::AcceptFailed(e) => observer.on_accept_failed(e),
        LifecycleEvent::Closed => observer.on_closed(),
    }
}
