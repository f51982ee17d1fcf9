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

//! Single-shot listen/accept cycle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::constants::ConnectionMode;
use crate::error::ServerError;
use crate::gateway::{AdapterGateway, Channel, ServiceListener};

/// Events emitted by a listen session, delivered to the observer in the
/// order they were produced.
#[derive(Debug)]
pub enum LifecycleEvent {
    /// Service registration succeeded; accept is about to start.
    OpenSucceeded { mode: ConnectionMode },
    /// The session could not be opened.
    OpenFailed(ServerError),
    /// The pending accept failed for a reason other than cancellation.
    AcceptFailed(ServerError),
    /// A close request completed.
    Closed,
}

/// One register-then-accept cycle. Never reused: the controller spawns a
/// fresh task per session.
pub(crate) struct ListenerTask<G: AdapterGateway> {
    gateway: Arc<G>,
    mode: ConnectionMode,
    events: mpsc::Sender<LifecycleEvent>,
}

impl<G: AdapterGateway> ListenerTask<G> {
    pub(crate) fn new(
        gateway: Arc<G>,
        mode: ConnectionMode,
        events: mpsc::Sender<LifecycleEvent>,
    ) -> Self {
        Self {
            gateway,
            mode,
            events,
        }
    }

    /// Run the session to its single terminal outcome.
    ///
    /// The registration outcome is reported before accept is entered, so the
    /// observer always sees open succeed/fail ahead of any accept outcome.
    /// Cancellation aborts the task at the accept await point; the listener
    /// is dropped there, closing the endpoint, and `on_accept` is never
    /// reached.
    pub(crate) async fn run<F>(self, on_accept: F)
    where
        F: FnOnce(G::Channel) + Send + 'static,
    {
        let mode = self.mode;

        let mut listener = match self.gateway.register_service(mode).await {
            Ok(listener) => {
                info!("Socket type {}: listen succeeded", mode.as_str());
                self.emit(LifecycleEvent::OpenSucceeded { mode }).await;
                listener
            }
            Err(e) => {
                error!("Socket type {}: listen failed: {}", mode.as_str(), e);
                self.emit(LifecycleEvent::OpenFailed(ServerError::Registration(e)))
                    .await;
                return;
            }
        };

        match listener.accept_once().await {
            Ok(channel) => {
                info!("Socket type {}: accept succeeded", mode.as_str());
                if channel.is_connected() {
                    // Runs on the background task; the callback must not
                    // assume controlling-context affinity.
                    on_accept(channel);
                } else {
                    warn!(
                        "Socket type {}: accepted channel is not live, dropping",
                        mode.as_str()
                    );
                }
            }
            Err(e) => {
                error!("Socket type {}: accept failed: {}", mode.as_str(), e);
                self.emit(LifecycleEvent::AcceptFailed(ServerError::Accept(e)))
                    .await;
            }
        }
    }

    async fn emit(&self, event: LifecycleEvent) {
        let _ = self.events.send(event).await;
    }
}
