//! Textual IPv4 to 32-bit key conversion.
//!
//! An address key is the big-endian integer value of the dotted-quad, so
//! `10.0.0.1` maps to `10 << 24 | 1`. The key indexes directly into the
//! membership bitmap, one bit per possible address.

use crate::error::{Result, UniqipError};
use std::net::Ipv4Addr;

/// Parse a dotted-quad IPv4 literal into its canonical 32-bit key.
///
/// The input must already be trimmed of surrounding whitespace. Anything that
/// is not a well-formed dotted-quad (including IPv6 literals, out-of-range
/// octets, and leading-zero octets) is rejected with an error naming the
/// offending text. Pure function, no side effects.
pub fn parse_ipv4(text: &str) -> Result<u32> {
    let addr: Ipv4Addr = text.parse().map_err(|_| UniqipError::parse(text))?;
    Ok(u32::from(addr))
}
