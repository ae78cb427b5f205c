/// Contract attribute carrying the client's canonical IPv4 address.
pub const ATTR_IP_ADDRESS: &str = "ip_address";

/// Contract attribute carrying the assigned role.
pub const ATTR_ROLE: &str = "role";

/// Chained attribute set by an upstream adapter once it has identified the user.
pub const CHAINED_ATTR_USERNAME: &str = "username";

/// Role assigned to any client on the configured subnet.
pub const ROLE_GUEST: &str = "GUEST";

/// Role assigned when an upstream adapter already established a username.
pub const ROLE_CORP_USER: &str = "CORP_USER";

/// Configuration field name for the subnet's base address.
pub const CONFIG_BASE_ADDRESS: &str = "Network Base Address";

/// Configuration field name for the subnet mask.
pub const CONFIG_SUBNET_MASK: &str = "Subnet Mask";

pub const DEFAULT_BASE_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SUBNET_MASK: &str = "255.255.255.0";

/// Address substituted for an IPv6 loopback source before IPv4 parsing.
pub const IPV4_LOOPBACK: &str = "127.0.0.1";

/// Message reported to administrators for a rejected address field.
pub const INVALID_ADDRESS_MESSAGE: &str = "Not a valid IP address";

/// Environment variable overriding the base address.
pub const ENV_BASE_ADDRESS: &str = "SUBNET_AUTHN_BASE_ADDRESS";

/// Environment variable overriding the subnet mask.
pub const ENV_SUBNET_MASK: &str = "SUBNET_AUTHN_SUBNET_MASK";
