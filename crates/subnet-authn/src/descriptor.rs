//! Static capability declaration advertised to the host.
//!
//! The host renders the configuration fields from [`DESCRIPTOR`] and expects
//! successful lookups to fill exactly the attributes in its contract.

use serde::Serialize;

use crate::address::parse_ipv4;
use crate::constants::{
    ATTR_IP_ADDRESS, ATTR_ROLE, CONFIG_BASE_ADDRESS, CONFIG_SUBNET_MASK, DEFAULT_BASE_ADDRESS,
    DEFAULT_SUBNET_MASK, INVALID_ADDRESS_MESSAGE,
};
use crate::error::ValidationError;

/// A free-text configuration field holding an IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub default_value: &'static str,
}

impl FieldDescriptor {
    /// Validate a value entered for this field.
    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        parse_ipv4(value)
            .map(|_| ())
            .map_err(|source| ValidationError {
                message: INVALID_ADDRESS_MESSAGE,
                source,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdapterDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Attribute names a successful lookup fills in.
    pub contract: &'static [&'static str],
    pub fields: &'static [FieldDescriptor],
    pub supports_extended_contract: bool,
}

impl AdapterDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const BASE_ADDRESS_FIELD: FieldDescriptor = FieldDescriptor {
    name: CONFIG_BASE_ADDRESS,
    description: "Enter the base IPv4 address to identify the authenticated subnet",
    default_value: DEFAULT_BASE_ADDRESS,
};

pub const SUBNET_MASK_FIELD: FieldDescriptor = FieldDescriptor {
    name: CONFIG_SUBNET_MASK,
    description: "Enter the IPv4 subnet mask to identify the authenticated subnet",
    default_value: DEFAULT_SUBNET_MASK,
};

pub const DESCRIPTOR: AdapterDescriptor = AdapterDescriptor {
    name: "Subnet Adapter",
    description: "Set the details of the subnet to identify your SSO clients",
    contract: &[ATTR_IP_ADDRESS, ATTR_ROLE],
    fields: &[BASE_ADDRESS_FIELD, SUBNET_MASK_FIELD],
    supports_extended_contract: false,
};
