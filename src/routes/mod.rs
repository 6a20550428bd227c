// Routes module - IPv6 route records and the netsh output parser

pub mod classify;
pub mod command;
pub mod parser;
pub mod source;

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use crate::error::{FieldError, PrefixError};

/// A destination prefix such as `2001:db8::/32`, validated once at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPrefix {
    raw: String,
    address: Ipv6Addr,
    prefix_len: u8,
}

impl DestinationPrefix {
    pub fn address(&self) -> Ipv6Addr {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The prefix exactly as it appeared in the input
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for DestinationPrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, length) = s.split_once('/').ok_or(PrefixError::MissingSlash)?;
        let address: Ipv6Addr = address.parse()?;

        // Parsed wider than u8 so that 129..=65535 reports as out of range
        let length: u16 = length
            .parse()
            .map_err(|_| PrefixError::InvalidLength(length.to_string()))?;
        if length > 128 {
            return Err(PrefixError::LengthOutOfRange(length));
        }

        Ok(DestinationPrefix {
            raw: s.to_string(),
            address,
            prefix_len: length as u8,
        })
    }
}

impl fmt::Display for DestinationPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One IPv6 route entry. Fields stay `None` when their label never appeared in the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(dead_code)]
pub struct RouteRecord {
    pub destination_prefix: Option<DestinationPrefix>,
    pub source_prefix: Option<String>,
    pub interface_index: Option<i32>,
    pub interface_name: Option<String>, // gateway address or interface alias
    pub publish: Option<bool>,
    pub route_type: Option<String>,
    pub metric: Option<i32>,
    pub site_prefix_length: Option<i32>,
    pub valid_lifetime: Option<String>,
    pub preferred_lifetime: Option<String>,
}

impl fmt::Display for RouteRecord {
    /// Renders `<destination prefix> via <interface name>`, unset fields as empty strings
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self
            .destination_prefix
            .as_ref()
            .map(DestinationPrefix::as_str)
            .unwrap_or("");
        let interface = self.interface_name.as_deref().unwrap_or("");
        write!(f, "{} via {}", prefix, interface)
    }
}

pub(crate) fn parse_prefix(value: &str) -> Result<DestinationPrefix, FieldError> {
    value.parse().map_err(|source| FieldError::InvalidPrefix {
        value: value.to_string(),
        source,
    })
}

/// Signed 32-bit, so `-1` parses and anything past `i32::MAX` is rejected
pub(crate) fn parse_integer(value: &str) -> Result<i32, FieldError> {
    value.parse().map_err(|source| FieldError::InvalidInteger {
        value: value.to_string(),
        source,
    })
}

/// netsh prints Yes/No; plain boolean literals are accepted in any case
pub(crate) fn parse_publish(value: &str) -> Result<bool, FieldError> {
    match value {
        "Yes" => Ok(true),
        "No" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(FieldError::InvalidBoolean {
            value: value.to_string(),
        }),
    }
}
