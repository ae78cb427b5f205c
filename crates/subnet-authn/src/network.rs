//! Source-address classification.
//!
//! Subnet matching is only defined over four octets, so the lookup first
//! decides which address family the caller handed us. IPv6 loopback is
//! folded onto IPv4 loopback so local deployments keep working; every other
//! IPv6 source is rejected outright.

use std::net::Ipv6Addr;

use crate::constants::IPV4_LOOPBACK;

/// Result of classifying a raw source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceClass<'a> {
    /// Text to be decoded as a dotted quad. For an IPv6 loopback source this
    /// is the substituted IPv4 loopback literal.
    Ipv4Candidate(&'a str),
    /// A non-loopback IPv6 source. Never authenticated.
    Ipv6Rejected(Ipv6Addr),
}

/// Classify the network-layer source address supplied by the host.
///
/// Recognises bare IPv6 literals, bracketed literals (`[::1]`) and literals
/// with a zone suffix (`fe80::1%eth0`). Anything else, including garbage, is
/// passed through as an IPv4 candidate and left to the strict decoder.
pub fn classify_source(remote_addr: &str) -> SourceClass<'_> {
    match parse_ipv6_literal(remote_addr) {
        Some(ip) if ip.is_loopback() => SourceClass::Ipv4Candidate(IPV4_LOOPBACK),
        Some(ip) => SourceClass::Ipv6Rejected(ip),
        None => SourceClass::Ipv4Candidate(remote_addr),
    }
}

fn parse_ipv6_literal(text: &str) -> Option<Ipv6Addr> {
    let unbracketed = text
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(text);
    let without_zone = match unbracketed.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() => addr,
        Some(_) => return None,
        None => unbracketed,
    };
    without_zone.parse().ok()
}
