use std::collections::HashMap;
use std::env;
use std::net::Ipv4Addr;

use crate::address::parse_ipv4;
use crate::constants::{
    CONFIG_BASE_ADDRESS, CONFIG_SUBNET_MASK, DEFAULT_BASE_ADDRESS, DEFAULT_SUBNET_MASK,
    ENV_BASE_ADDRESS, ENV_SUBNET_MASK, INVALID_ADDRESS_MESSAGE,
};
use crate::descriptor::{FieldDescriptor, BASE_ADDRESS_FIELD, DESCRIPTOR, SUBNET_MASK_FIELD};
use crate::error::ConfigError;

/// Raw configuration values for one adapter instance, as entered by an
/// administrator. Values are validated by [`AdapterConfig::validate`] and
/// parsed when the adapter is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Base address of the authenticated subnet
    pub base_address: String,
    /// Mask applied to both the base and the client address
    pub subnet_mask: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            subnet_mask: DEFAULT_SUBNET_MASK.to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn new(base_address: impl Into<String>, subnet_mask: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
            subnet_mask: subnet_mask.into(),
        }
    }

    /// Load from `SUBNET_AUTHN_BASE_ADDRESS` / `SUBNET_AUTHN_SUBNET_MASK`,
    /// falling back to the field defaults. Values are validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_address = env::var(ENV_BASE_ADDRESS)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_ADDRESS.to_string());

        let subnet_mask = env::var(ENV_SUBNET_MASK)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBNET_MASK.to_string());

        let config = Self::new(base_address, subnet_mask);
        config.validate()?;
        Ok(config)
    }

    /// Build from a map keyed by the descriptor's field names.
    ///
    /// Missing fields take their defaults; unknown field names are rejected.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ConfigError> {
        if let Some(unknown) = fields.keys().find(|k| DESCRIPTOR.field(k).is_none()) {
            return Err(ConfigError::UnknownField(unknown.clone()));
        }

        let value = |name: &str, default: &str| {
            fields
                .get(name)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let config = Self::new(
            value(CONFIG_BASE_ADDRESS, DEFAULT_BASE_ADDRESS),
            value(CONFIG_SUBNET_MASK, DEFAULT_SUBNET_MASK),
        );
        config.validate()?;
        Ok(config)
    }

    /// Run each field's validator, reporting the first rejected field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parse().map(|_| ())
    }

    /// Decode the base address and mask, base first.
    pub(crate) fn parse(&self) -> Result<(Ipv4Addr, Ipv4Addr), ConfigError> {
        let base = parse_field(&BASE_ADDRESS_FIELD, &self.base_address)?;
        let mask = parse_field(&SUBNET_MASK_FIELD, &self.subnet_mask)?;
        Ok((base, mask))
    }
}

fn parse_field(field: &FieldDescriptor, value: &str) -> Result<Ipv4Addr, ConfigError> {
    parse_ipv4(value).map_err(|source| ConfigError::InvalidField {
        field: field.name,
        message: INVALID_ADDRESS_MESSAGE,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AddressError;
    use std::error::Error;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_matches_descriptor() {
        let config = AdapterConfig::default();
        assert_eq!(config.base_address, "0.0.0.0");
        assert_eq!(config.subnet_mask, "255.255.255.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_fields_reads_named_fields() {
        let config = AdapterConfig::from_fields(&fields(&[
            ("Network Base Address", "10.0.1.0"),
            ("Subnet Mask", "255.255.255.0"),
        ]))
        .unwrap();
        assert_eq!(config, AdapterConfig::new("10.0.1.0", "255.255.255.0"));
    }

    #[test]
    fn from_fields_fills_defaults() {
        let config =
            AdapterConfig::from_fields(&fields(&[("Network Base Address", "10.0.1.0")])).unwrap();
        assert_eq!(config.subnet_mask, "255.255.255.0");
    }

    #[test]
    fn from_fields_rejects_invalid_mask() {
        let err = AdapterConfig::from_fields(&fields(&[
            ("Network Base Address", "10.0.1.0"),
            ("Subnet Mask", "999.255.255.0"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidField {
                field: "Subnet Mask",
                message: "Not a valid IP address",
                source: AddressError::InvalidAddressFormat {
                    input: "999.255.255.0".to_string()
                },
            }
        );
        assert_eq!(err.to_string(), "Subnet Mask: Not a valid IP address");
    }

    #[test]
    fn invalid_field_keeps_the_address_error() {
        let err = AdapterConfig::new("10.0.1.0", "255.255.255")
            .validate()
            .unwrap_err();
        let source = err
            .source()
            .and_then(|e| e.downcast_ref::<AddressError>())
            .unwrap();
        assert_eq!(
            source,
            &AddressError::InvalidAddressFormat {
                input: "255.255.255".to_string()
            }
        );
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn from_env_reads_overrides_and_defaults() {
        env::remove_var(ENV_BASE_ADDRESS);
        env::remove_var(ENV_SUBNET_MASK);
        assert_eq!(AdapterConfig::from_env().unwrap(), AdapterConfig::default());

        env::set_var(ENV_BASE_ADDRESS, "10.0.1.0");
        env::set_var(ENV_SUBNET_MASK, "  ");
        assert_eq!(
            AdapterConfig::from_env().unwrap(),
            AdapterConfig::new("10.0.1.0", "255.255.255.0")
        );

        env::set_var(ENV_SUBNET_MASK, "999.255.255.0");
        let err = AdapterConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "Subnet Mask",
                ..
            }
        ));

        env::remove_var(ENV_BASE_ADDRESS);
        env::remove_var(ENV_SUBNET_MASK);
    }

    #[test]
    fn from_fields_rejects_unknown_field() {
        let err = AdapterConfig::from_fields(&fields(&[("Netmask", "255.0.0.0")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownField("Netmask".to_string()));
    }

    #[test]
    fn validate_checks_base_first() {
        let err = AdapterConfig::new("10.0.1", "bogus")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "Network Base Address",
                ..
            }
        ));
    }
}
