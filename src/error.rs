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

//! Error taxonomy for the server lifecycle.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors reported by the rendezvous server.
///
/// `Unsupported`, `Registration` and `Accept` also reach the registered
/// observer as lifecycle events. `PoweredOff` is deliberately a direct
/// return-path signal only: callers must check the result of
/// `start_listening` as well as the observer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The device has no usable Bluetooth transport.
    #[error("bluetooth transport is not available on this device")]
    Unsupported,

    /// The adapter exists but its radio is powered off.
    #[error("bluetooth adapter is powered off")]
    PoweredOff,

    /// Service registration failed. Recoverable: the caller may start a
    /// fresh session after addressing the cause.
    #[error("service registration failed: {0}")]
    Registration(#[source] GatewayError),

    /// The pending accept failed for a reason other than cancellation.
    /// Fatal to the session, not to the process.
    #[error("accept failed: {0}")]
    Accept(#[source] GatewayError),

    /// An adapter-level operation failed outside any session.
    #[error("adapter error: {0}")]
    Adapter(#[source] GatewayError),
}
