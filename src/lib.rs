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

//! Single-peer Bluetooth RFCOMM rendezvous server.
//!
//! Advertises a named service, waits for exactly one inbound connection per
//! session and hands the established channel to the application. See
//! [`server::RendezvousServer`] for the lifecycle API and
//! [`gateway::AdapterGateway`] for the transport seam.

pub mod config;
pub mod error;
pub mod gateway;
pub mod server;

pub use error::ServerError;
pub use server::{ConnectionMode, LifecycleEvent, RendezvousServer, StateObserver};
