//! The subnet authentication adapter.
//!
//! A lookup runs through four steps and keeps no state between calls:
//!
//! 1. classify the source address (IPv6 loopback folds to `127.0.0.1`,
//!    other IPv6 fails immediately),
//! 2. decode it with [`parse_ipv4`],
//! 3. test it against the configured [`Subnet`],
//! 4. pick a role from the chained attributes.
//!
//! Standalone, a client on the subnet is a [`Role::Guest`]. Chained after an
//! adapter that identified the user (any non-null `username` attribute), the
//! same client becomes a [`Role::CorpUser`].

use std::collections::HashMap;

use crate::address::parse_ipv4;
use crate::config::AdapterConfig;
use crate::constants::CHAINED_ATTR_USERNAME;
use crate::descriptor::{AdapterDescriptor, DESCRIPTOR};
use crate::error::{AdapterError, ConfigError};
use crate::network::{classify_source, SourceClass};
use crate::response::{AuthnAttributes, AuthnRequest, AuthnResponse, ChainedAttributes, Role};
use crate::subnet::Subnet;

/// Identifiers a host passes back on logout. Opaque to this adapter.
pub type AuthnIdentifiers = HashMap<String, serde_json::Value>;

/// Host-facing interface of an IdP authentication adapter.
pub trait AuthnAdapter: Send + Sync {
    /// Static metadata: attribute contract and configuration fields.
    fn descriptor(&self) -> &AdapterDescriptor;

    /// Decide whether the principal behind `request` is authenticated.
    ///
    /// A negative decision is `Ok` with [`crate::AuthnStatus::Failure`];
    /// `Err` means the request could not be processed at all.
    fn lookup_authn(&self, request: &AuthnRequest) -> Result<AuthnResponse, AdapterError>;

    /// Pre-chaining lookup entry point. Hosts that speak the current
    /// interface never call it.
    fn lookup_authn_legacy(
        &self,
        _request: &AuthnRequest,
    ) -> Result<HashMap<String, String>, AdapterError> {
        Err(AdapterError::Unsupported("legacy lookup_authn"))
    }

    /// Terminate any security context for a single logout.
    fn logout_authn(&self, identifiers: &AuthnIdentifiers) -> bool;

    /// Extra authentication context advertised to the host.
    fn adapter_info(&self) -> Option<HashMap<String, serde_json::Value>> {
        None
    }
}

/// Authenticates clients by IPv4 subnet membership.
///
/// An instance only exists once [`SubnetAdapter::configure`] has succeeded,
/// and its subnet never changes afterwards. Lookups take `&self` and touch no
/// shared mutable state, so one instance can serve concurrent requests.
/// Reconfiguring means building a new instance.
#[derive(Debug, Clone)]
pub struct SubnetAdapter {
    subnet: Subnet,
}

impl SubnetAdapter {
    pub fn new(subnet: Subnet) -> Self {
        Self { subnet }
    }

    /// Parse both configured addresses. Fails without building an adapter
    /// if either is malformed.
    pub fn configure(config: &AdapterConfig) -> Result<Self, ConfigError> {
        let (base, mask) = config.parse()?;
        let subnet = Subnet::new(base, mask);
        tracing::debug!(%subnet, "subnet adapter configured");
        Ok(Self::new(subnet))
    }

    pub fn subnet(&self) -> &Subnet {
        &self.subnet
    }
}

impl AuthnAdapter for SubnetAdapter {
    fn descriptor(&self) -> &AdapterDescriptor {
        &DESCRIPTOR
    }

    fn lookup_authn(&self, request: &AuthnRequest) -> Result<AuthnResponse, AdapterError> {
        tracing::info!(
            remote_addr = %request.remote_addr,
            partner = %request.partner_entity_id,
            "client is trying to sign on"
        );

        let candidate = match classify_source(&request.remote_addr) {
            SourceClass::Ipv4Candidate(text) => text,
            SourceClass::Ipv6Rejected(ip) => {
                tracing::debug!(%ip, "rejecting non-loopback IPv6 source");
                return Ok(AuthnResponse::failure());
            }
        };

        let addr = parse_ipv4(candidate).map_err(|e| {
            tracing::warn!(
                remote_addr = %request.remote_addr,
                "source address is not a valid IPv4 address"
            );
            AdapterError::from(e)
        })?;

        if !self.subnet.contains(&addr) {
            tracing::debug!(%addr, subnet = %self.subnet, "source outside subnet");
            return Ok(AuthnResponse::failure());
        }

        let role = role_for(request.chained_attributes.as_ref());
        tracing::debug!(%addr, %role, "source authenticated");

        Ok(AuthnResponse::success(AuthnAttributes {
            ip_address: addr.to_string(),
            role,
        }))
    }

    fn logout_authn(&self, _identifiers: &AuthnIdentifiers) -> bool {
        true
    }
}

/// A non-null `username` from an upstream adapter upgrades the role.
fn role_for(chained: Option<&ChainedAttributes>) -> Role {
    match chained.and_then(|attrs| attrs.get(CHAINED_ATTR_USERNAME)) {
        Some(value) if !value.is_null() => Role::CorpUser,
        _ => Role::Guest,
    }
}
