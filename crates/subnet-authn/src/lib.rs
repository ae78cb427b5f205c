//! IdP authentication adapter that authenticates clients by subnet.
//!
//! The adapter looks at the network-layer source address of a sign-on
//! request (the client, or the last proxy in front of it) and authenticates
//! the principal when that address lies inside a configured IPv4 subnet.
//!
//! # Roles
//!
//! - Run standalone, every client on the subnet is a `GUEST`.
//! - Chained after another adapter that already identified the user (its
//!   result carries a `username`), the client is a `CORP_USER`.
//!
//! Non-loopback IPv6 sources always fail; `::1` is treated as `127.0.0.1`.
//!
//! # Example
//!
//! ```
//! use subnet_authn::{AdapterConfig, AuthnAdapter, AuthnRequest, Role, SubnetAdapter};
//!
//! let adapter = SubnetAdapter::configure(&AdapterConfig::new("10.0.1.0", "255.255.255.0"))?;
//! let resp = adapter.lookup_authn(&AuthnRequest::new("10.0.1.42", "sp:example"))?;
//!
//! let attrs = resp.attributes.expect("authenticated");
//! assert_eq!(attrs.ip_address, "10.0.1.42");
//! assert_eq!(attrs.role, Role::Guest);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod address;
pub mod constants;
pub mod error;
pub mod network;
pub mod response;
pub mod subnet;

pub mod adapter;
pub mod config;
pub mod descriptor;

pub use address::{is_valid_ipv4, parse_ipv4};
pub use adapter::{AuthnAdapter, AuthnIdentifiers, SubnetAdapter};
pub use config::AdapterConfig;
pub use constants::*;
pub use descriptor::{AdapterDescriptor, FieldDescriptor, DESCRIPTOR};
pub use error::{AdapterError, AddressError, ConfigError, ValidationError};
pub use response::*;
pub use subnet::{in_subnet, Subnet};
