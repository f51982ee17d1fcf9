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

//! Fixed service identity per connection mode.
//!
//! One advertised name, one service UUID and one RFCOMM channel per mode.
//! These are shared with the peer and are not runtime-configurable.

use uuid::Uuid;

/// Advertised service name for secure sessions.
pub const NAME_SECURE: &str = "BtLinkSecure";

/// Advertised service name for insecure sessions.
pub const NAME_INSECURE: &str = "BtLinkInsecure";

/// SDP service UUID for secure sessions.
pub const SERVICE_UUID_SECURE: Uuid = Uuid::from_u128(0xfa87c0d0_afac_11de_8a39_0800200c9a66);

/// SDP service UUID for insecure sessions.
pub const SERVICE_UUID_INSECURE: Uuid = Uuid::from_u128(0x8ce255c0_200a_11e0_ac64_0800200c9a66);

/// RFCOMM channel for secure sessions.
pub const CHANNEL_SECURE: u8 = 1;

/// RFCOMM channel for insecure sessions.
pub const CHANNEL_INSECURE: u8 = 2;

/// Link authentication/encryption policy, fixed for the lifetime of one
/// listen session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Authenticated, encrypted link.
    Secure,
    /// Unauthenticated link.
    Insecure,
}

impl ConnectionMode {
    pub fn is_secure(&self) -> bool {
        matches!(self, ConnectionMode::Secure)
    }

    /// Advertised service name for this mode.
    pub fn service_name(&self) -> &'static str {
        match self {
            ConnectionMode::Secure => NAME_SECURE,
            ConnectionMode::Insecure => NAME_INSECURE,
        }
    }

    /// SDP service UUID for this mode.
    pub fn service_uuid(&self) -> Uuid {
        match self {
            ConnectionMode::Secure => SERVICE_UUID_SECURE,
            ConnectionMode::Insecure => SERVICE_UUID_INSECURE,
        }
    }

    /// RFCOMM channel for this mode.
    pub fn rfcomm_channel(&self) -> u8 {
        match self {
            ConnectionMode::Secure => CHANNEL_SECURE,
            ConnectionMode::Insecure => CHANNEL_INSECURE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionMode::Secure => "Secure",
            ConnectionMode::Insecure => "Insecure",
        }
    }
}
