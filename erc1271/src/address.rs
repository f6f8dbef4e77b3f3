//! Address helpers.
//!
//! [`is_zero_address`] accepts either a typed [`Address`], raw bytes, or a hex
//! string. Inputs that are not a well-formed 20-byte address never count as
//! zero.

use alloy_primitives::Address;

use crate::error::ValidationError;

/// A value that may denote an on-chain address.
pub trait AddressLike {
    /// Returns the address, or `None` if the value is not a well-formed
    /// 20-byte address.
    fn to_address(&self) -> Option<Address>;
}

impl AddressLike for Address {
    fn to_address(&self) -> Option<Address> {
        Some(*self)
    }
}

impl AddressLike for str {
    fn to_address(&self) -> Option<Address> {
        self.trim().parse().ok()
    }
}

impl AddressLike for String {
    fn to_address(&self) -> Option<Address> {
        self.as_str().to_address()
    }
}

impl AddressLike for [u8; 20] {
    fn to_address(&self) -> Option<Address> {
        Some(Address::from(*self))
    }
}

impl AddressLike for [u8] {
    fn to_address(&self) -> Option<Address> {
        <[u8; 20]>::try_from(self).ok().map(Address::from)
    }
}

/// Returns `true` iff `address` is the all-zero 20-byte address.
///
/// ```
/// use alloy_primitives::Address;
/// use erc1271::is_zero_address;
///
/// assert!(is_zero_address(&Address::ZERO));
/// assert!(is_zero_address("0x0000000000000000000000000000000000000000"));
/// assert!(!is_zero_address("0x0"));
/// ```
#[must_use]
pub fn is_zero_address<A: AddressLike + ?Sized>(address: &A) -> bool {
    address.to_address().is_some_and(|a| a == Address::ZERO)
}

/// Parses a hex address, with or without `0x` prefix. Checksums are not
/// enforced.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAddress`] if `input` is not 20 bytes of hex.
pub fn parse_address(input: &str) -> Result<Address, ValidationError> {
    input
        .trim()
        .parse()
        .map_err(|source| ValidationError::InvalidAddress {
            input: input.to_owned(),
            source,
        })
}
