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

//! BlueZ-backed RFCOMM gateway.

use async_trait::async_trait;
use bluer::rfcomm::{Listener, SocketAddr, Stream};
use bluer::{Adapter, Address, Session};
use tracing::{debug, info};

use super::{AdapterGateway, Channel, GatewayError, ServiceListener};
use crate::server::ConnectionMode;

/// Gateway over the default BlueZ adapter.
pub struct BluerGateway {
    adapter: Option<Adapter>,
    _session: Session,
}

impl BluerGateway {
    /// Connect to BlueZ and grab the default adapter, if the device has one.
    pub async fn new() -> Result<Self, GatewayError> {
        let session = Session::new().await?;
        let adapter = match session.default_adapter().await {
            Ok(adapter) => {
                info!("Using Bluetooth adapter: {}", adapter.name());
                Some(adapter)
            }
            Err(e) => {
                debug!("No Bluetooth adapter: {}", e);
                None
            }
        };

        Ok(Self {
            adapter,
            _session: session,
        })
    }

    /// Set the alias other devices see while the service is discoverable.
    pub async fn set_alias(&self, name: &str) -> Result<(), GatewayError> {
        self.adapter()?.set_alias(name.to_string()).await?;
        info!("Bluetooth alias set to: {}", name);
        Ok(())
    }

    /// Address of the local adapter.
    pub async fn address(&self) -> Result<Address, GatewayError> {
        Ok(self.adapter()?.address().await?)
    }

    fn adapter(&self) -> Result<&Adapter, GatewayError> {
        self.adapter
            .as_ref()
            .ok_or_else(|| GatewayError::Other("no bluetooth adapter".into()))
    }
}

#[async_trait]
impl AdapterGateway for BluerGateway {
    type Listener = RfcommListener;
    type Channel = RfcommChannel;

    fn is_transport_available(&self) -> bool {
        self.adapter.is_some()
    }

    async fn is_powered_on(&self) -> Result<bool, GatewayError> {
        Ok(self.adapter()?.is_powered().await?)
    }

    async fn power_on(&self) -> Result<bool, GatewayError> {
        let adapter = self.adapter()?;
        if !adapter.is_powered().await? {
            info!("Powering on Bluetooth adapter...");
            adapter.set_powered(true).await?;
        }
        Ok(adapter.is_powered().await?)
    }

    async fn register_service(
        &self,
        mode: ConnectionMode,
    ) -> Result<RfcommListener, GatewayError> {
        let adapter = self.adapter()?;

        // Peers find the service through discovery, so the adapter has to
        // be visible before we bind.
        adapter.set_discoverable(true).await?;
        adapter.set_pairable(true).await?;

        let local_addr = SocketAddr::new(Address::any(), mode.rfcomm_channel());
        let listener = Listener::bind(local_addr).await?;

        // BlueZ publishes the SDP record when the RFCOMM channel is bound.
        info!(
            "Service '{}' registered (UUID: {}, channel {})",
            mode.service_name(),
            mode.service_uuid(),
            mode.rfcomm_channel()
        );

        Ok(RfcommListener { inner: listener })
    }
}

/// Listening RFCOMM endpoint. Dropping it closes the socket, which unblocks
/// a pending accept.
pub struct RfcommListener {
    inner: Listener,
}

#[async_trait]
impl ServiceListener for RfcommListener {
    type Channel = RfcommChannel;

    async fn accept_once(&mut self) -> Result<RfcommChannel, GatewayError> {
        let (stream, peer_addr) = self.inner.accept().await?;
        info!("Connection from: {:?}", peer_addr);
        Ok(RfcommChannel { stream, peer_addr })
    }
}

/// An accepted RFCOMM connection.
pub struct RfcommChannel {
    stream: Stream,
    peer_addr: SocketAddr,
}

impl RfcommChannel {
    /// Address of the connected peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Take ownership of the underlying byte stream.
    pub fn into_stream(self) -> Stream {
        self.stream
    }
}

impl Channel for RfcommChannel {
    fn is_connected(&self) -> bool {
        self.stream.peer_addr().is_ok()
    }
}
