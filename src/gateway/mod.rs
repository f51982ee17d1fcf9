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

//! Transport gateway abstraction.
//!
//! The server core never talks to BlueZ directly; everything goes through
//! [`AdapterGateway`] so tests can substitute a scripted transport.

mod rfcomm;

pub use rfcomm::{BluerGateway, RfcommChannel, RfcommListener};

use async_trait::async_trait;
use thiserror::Error;

use crate::server::ConnectionMode;

/// Errors surfaced by a transport gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),

    #[error("{0}")]
    Other(String),
}

/// Capability interface over the Bluetooth adapter.
#[async_trait]
pub trait AdapterGateway: Send + Sync + 'static {
    type Listener: ServiceListener<Channel = Self::Channel>;
    type Channel: Channel;

    /// Whether a usable transport exists on this device.
    fn is_transport_available(&self) -> bool;

    /// Whether the adapter radio is currently powered.
    async fn is_powered_on(&self) -> Result<bool, GatewayError>;

    /// Power the radio on. Returns whether it is powered afterwards.
    async fn power_on(&self) -> Result<bool, GatewayError>;

    /// Advertise the service for `mode` and return a listening endpoint.
    async fn register_service(&self, mode: ConnectionMode)
        -> Result<Self::Listener, GatewayError>;
}

/// A registered, listening endpoint.
///
/// Dropping the listener closes the endpoint, which unblocks a pending
/// [`accept_once`](ServiceListener::accept_once).
#[async_trait]
pub trait ServiceListener: Send + 'static {
    type Channel: Channel;

    /// Wait for the first inbound connection. No timeout.
    async fn accept_once(&mut self) -> Result<Self::Channel, GatewayError>;
}

/// An established transport channel.
pub trait Channel: Send + 'static {
    /// Whether the channel is actually live. Some transports hand back a
    /// dead handle on a connect/teardown race.
    fn is_connected(&self) -> bool;
}
