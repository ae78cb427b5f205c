use std::fmt;
use std::net::Ipv4Addr;

use crate::address::parse_ipv4;
use crate::error::AddressError;

/// An IPv4 subnet given as a base address and a mask.
///
/// The mask is applied octet by octet and need not be contiguous. The base is
/// stored as configured; host bits are masked off at comparison time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    base: Ipv4Addr,
    mask: Ipv4Addr,
}

impl Subnet {
    pub fn new(base: Ipv4Addr, mask: Ipv4Addr) -> Self {
        Self { base, mask }
    }

    /// Build a subnet from its textual base address and mask.
    ///
    /// Both fields are parsed before anything is constructed, so a bad mask
    /// never leaves a half-configured subnet behind.
    pub fn configure(base: &str, mask: &str) -> Result<Self, AddressError> {
        let base = parse_ipv4(base)?;
        let mask = parse_ipv4(mask)?;
        Ok(Self::new(base, mask))
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn mask(&self) -> Ipv4Addr {
        self.mask
    }

    /// Check whether `addr` falls inside this subnet.
    pub fn contains(&self, addr: &Ipv4Addr) -> bool {
        in_subnet(addr, &self.base, &self.mask)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.mask)
    }
}

/// True iff `addr & mask == base & mask` for every octet.
pub fn in_subnet(addr: &Ipv4Addr, base: &Ipv4Addr, mask: &Ipv4Addr) -> bool {
    addr.octets()
        .iter()
        .zip(base.octets())
        .zip(mask.octets())
        .all(|((a, b), m)| a & m == b & m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        parse_ipv4(s).unwrap()
    }

    #[test]
    fn class_c_subnet() {
        let net = Subnet::configure("10.0.1.0", "255.255.255.0").unwrap();
        assert!(net.contains(&ip("10.0.1.5")));
        assert!(net.contains(&ip("10.0.1.255")));
        assert!(net.contains(&ip("10.0.1.0")));
        assert!(!net.contains(&ip("10.0.2.1")));
        assert!(!net.contains(&ip("11.0.1.5")));
    }

    #[test]
    fn zero_mask_matches_everything() {
        let net = Subnet::configure("0.0.0.0", "0.0.0.0").unwrap();
        for addr in ["0.0.0.0", "8.8.8.8", "255.255.255.255", "10.0.1.42"] {
            assert!(net.contains(&ip(addr)), "{addr} not contained");
        }
    }

    #[test]
    fn full_mask_matches_only_the_base() {
        let net = Subnet::configure("192.168.1.10", "255.255.255.255").unwrap();
        assert!(net.contains(&ip("192.168.1.10")));
        assert!(!net.contains(&ip("192.168.1.11")));
    }

    #[test]
    fn host_bits_in_base_are_ignored() {
        let net = Subnet::configure("10.0.1.77", "255.255.255.0").unwrap();
        assert!(net.contains(&ip("10.0.1.1")));
    }

    #[test]
    fn non_contiguous_mask_compares_octetwise() {
        // Only the first and third octets are significant.
        let net = Subnet::configure("172.0.5.0", "255.0.255.0").unwrap();
        assert!(net.contains(&ip("172.99.5.200")));
        assert!(!net.contains(&ip("172.99.6.200")));
    }

    #[test]
    fn partial_octet_mask() {
        let net = Subnet::configure("10.0.0.0", "255.240.0.0").unwrap();
        assert!(net.contains(&ip("10.15.255.255")));
        assert!(!net.contains(&ip("10.16.0.0")));
    }

    #[test]
    fn configure_rejects_bad_mask() {
        let err = Subnet::configure("10.0.1.0", "999.255.255.0").unwrap_err();
        assert!(matches!(err, AddressError::InvalidAddressFormat { .. }));
    }

    #[test]
    fn display_shows_base_and_mask() {
        let net = Subnet::configure("10.0.1.0", "255.255.255.0").unwrap();
        assert_eq!(net.to_string(), "10.0.1.0/255.255.255.0");
    }
}
