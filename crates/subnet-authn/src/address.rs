//! Strict dotted-quad IPv4 decoding.
//!
//! [`parse_ipv4`] is the single validation primitive for addresses: the
//! configuration field validator and the runtime lookup both go through it,
//! so both reject exactly the same inputs.
//!
//! The accepted octet grammar is `25[0-5] | 2[0-4][0-9] | [01]?[0-9][0-9]?`,
//! i.e. one to three ASCII digits with a value of at most 255. Leading zeros
//! are allowed and carry no octal meaning (`"010"` is ten), which is why this
//! does not defer to `Ipv4Addr::from_str`.

use std::net::Ipv4Addr;

use crate::error::AddressError;

const NUM_OCTETS: usize = 4;
const MAX_OCTET_DIGITS: usize = 3;

/// Parse a dotted-quad string into an [`Ipv4Addr`].
///
/// Fails with [`AddressError::InvalidAddressFormat`] unless the input splits
/// on `.` into exactly four octets that each satisfy the octet grammar.
pub fn parse_ipv4(text: &str) -> Result<Ipv4Addr, AddressError> {
    let invalid = || AddressError::InvalidAddressFormat {
        input: text.to_string(),
    };

    let mut octets = [0u8; NUM_OCTETS];
    let mut parts = text.split('.');

    for slot in octets.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        *slot = parse_octet(part).ok_or_else(invalid)?;
    }

    // Trailing components ("1.2.3.4.5", "1.2.3.4.") make the address invalid.
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(Ipv4Addr::from(octets))
}

/// Returns true if `text` would be accepted by [`parse_ipv4`].
pub fn is_valid_ipv4(text: &str) -> bool {
    parse_ipv4(text).is_ok()
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty()
        || part.len() > MAX_OCTET_DIGITS
        || !part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    // At most three digits, so this only rejects 256..=999.
    part.parse::<u8>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn parses_plain_dotted_quad() {
        assert_eq!(parse_ipv4("10.0.1.42").unwrap(), Ipv4Addr::new(10, 0, 1, 42));
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(
            parse_ipv4("255.255.255.255").unwrap(),
            Ipv4Addr::BROADCAST
        );
    }

    #[test]
    fn leading_zeros_normalise_in_display() {
        let addr = parse_ipv4("010.001.000.099").unwrap();
        assert_eq!(addr, Ipv4Addr::new(10, 1, 0, 99));
        assert_eq!(addr.to_string(), "10.1.0.99");
    }

    #[test]
    fn rejects_wrong_arity() {
        for input in ["", "1", "1.2.3", "1.2.3.4.5", "1.2.3.4.", ".1.2.3", "1..2.3"] {
            assert!(parse_ipv4(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_octets() {
        for input in ["256.0.0.0", "10.0.1.300", "999.255.255.0", "1.2.3.0255"] {
            assert!(parse_ipv4(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn rejects_non_digit_octets() {
        for input in [
            "+1.2.3.4",
            "-1.2.3.4",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1.2.3.a",
            "0x1.2.3.4",
            "::1",
            "1.2.3.٣",
        ] {
            assert!(parse_ipv4(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn error_carries_the_input() {
        let err = parse_ipv4("10.0.1").unwrap_err();
        assert_eq!(
            err,
            AddressError::InvalidAddressFormat {
                input: "10.0.1".to_string()
            }
        );
    }

    #[test]
    fn octet_rule_agrees_with_reference_pattern() {
        let re = Regex::new(r"\A(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\z").unwrap();

        let mut candidates: Vec<String> = Vec::new();
        for n in 0..1000u32 {
            candidates.push(n.to_string());
            candidates.push(format!("{n:02}"));
            candidates.push(format!("{n:03}"));
        }
        candidates.extend(["", "0000", "1a", "+5", " 7"].map(String::from));

        for candidate in &candidates {
            assert_eq!(
                parse_octet(candidate).is_some(),
                re.is_match(candidate),
                "octet rule disagrees on {candidate:?}"
            );
        }
    }

    #[test]
    fn is_valid_matches_parse() {
        assert!(is_valid_ipv4("192.168.0.1"));
        assert!(!is_valid_ipv4("192.168.0"));
    }
}
