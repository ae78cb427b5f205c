use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ATTR_IP_ADDRESS, ATTR_ROLE, ROLE_CORP_USER, ROLE_GUEST};

/// Attributes handed over by an upstream adapter in a chain.
pub type ChainedAttributes = HashMap<String, serde_json::Value>;

/// One lookup request from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthnRequest {
    /// Network-layer source address, after whatever proxy resolution the host did.
    pub remote_addr: String,
    /// Partner (SP) entity id. Only logged.
    #[serde(default)]
    pub partner_entity_id: String,
    /// Result of a previous adapter in the chain, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chained_attributes: Option<ChainedAttributes>,
}

impl AuthnRequest {
    pub fn new(remote_addr: impl Into<String>, partner_entity_id: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            partner_entity_id: partner_entity_id.into(),
            chained_attributes: None,
        }
    }

    pub fn with_chained_attributes(mut self, attributes: ChainedAttributes) -> Self {
        self.chained_attributes = Some(attributes);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthnStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "GUEST")]
    Guest,
    #[serde(rename = "CORP_USER")]
    CorpUser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => ROLE_GUEST,
            Role::CorpUser => ROLE_CORP_USER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The attribute contract fulfilled on a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnAttributes {
    pub ip_address: String,
    pub role: Role,
}

/// Outcome of a lookup. Attributes are present exactly when the status is
/// [`AuthnStatus::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnResponse {
    pub status: AuthnStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AuthnAttributes>,
}

impl AuthnResponse {
    pub fn success(attributes: AuthnAttributes) -> Self {
        Self {
            status: AuthnStatus::Success,
            attributes: Some(attributes),
        }
    }

    pub fn failure() -> Self {
        Self {
            status: AuthnStatus::Failure,
            attributes: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AuthnStatus::Success
    }

    /// Attributes keyed by their contract names, as a host would consume them.
    /// Empty on failure.
    pub fn attribute_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        if let Some(attrs) = &self.attributes {
            map.insert(ATTR_IP_ADDRESS, attrs.ip_address.clone());
            map.insert(ATTR_ROLE, attrs.role.to_string());
        }
        map
    }
}
