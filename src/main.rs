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

//! BtLink rendezvous server daemon.

use anyhow::Result;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use btlink::config::Config;
use btlink::gateway::{AdapterGateway, BluerGateway};
use btlink::{ConnectionMode, RendezvousServer, ServerError, StateObserver};

/// Logs lifecycle transitions; stands in for a UI.
struct LogObserver;

impl StateObserver for LogObserver {
    fn on_open_succeeded(&self, mode: ConnectionMode) {
        info!("Server open ({}), waiting for a peer", mode.as_str());
    }

    fn on_open_failed(&self, error: &ServerError) {
        error!("Server failed to open: {}", error);
    }

    fn on_accept_failed(&self, error: &ServerError) {
        error!("Accept failed: {}", error);
    }

    fn on_closed(&self) {
        info!("Server closed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("btlink=info".parse().unwrap()),
        )
        .init();

    info!("Starting BtLink v{}...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded");

    let gateway = BluerGateway::new().await?;
    if gateway.is_transport_available() {
        gateway.set_alias(&config.bluetooth.device_name).await?;
    }

    let server = RendezvousServer::new(gateway);
    server.set_state_observer(LogObserver);

    if config.bluetooth.auto_power_on {
        if let Err(e) = server.open_adapter().await {
            error!("Could not power on adapter: {}", e);
        }
    }

    let mode = if config.bluetooth.secure {
        ConnectionMode::Secure
    } else {
        ConnectionMode::Insecure
    };

    server
        .start_listening(mode, |channel| {
            // Ownership of the channel transfers to the application here;
            // the chat layer would take over the stream.
            info!("Peer connected: {:?}", channel.peer_addr());
        })
        .await?;

    info!("Ready. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received");
    server.stop().await;

    // Give the dispatcher a beat to deliver the final close notification.
    tokio::time::sleep(Duration::from_millis(100)).await;

    info!("BtLink stopped");
    Ok(())
}
