//! # Identifier Handles
//!
//! Fixed-length opaque handles flowing across the ledger boundary. Party
//! and token identifiers are 20 bytes; stream identifiers are 32 bytes (a
//! content hash of the stream parameters, not sequential). The canonical
//! textual form is `0x`-prefixed lowercase hex; equality and lookup always
//! use the full value, human display uses a shortened form.

use crate::errors::StreamError;

/// Macro to generate a fixed-length identifier newtype with hex parsing,
/// canonical display, and string-based serde.
macro_rules! fixed_bytes_id {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Length of the raw handle in bytes
            pub const LEN: usize = $len;

            /// All-zero handle, used as "unset"
            pub const ZERO: Self = Self([0u8; $len]);

            pub fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Short display form: first 5 and last 4 characters of the
            /// canonical string, e.g. `0x123...abcd`.
            pub fn short(&self) -> String {
                let full = self.to_string();
                format!("{}...{}", &full[..5], &full[full.len() - 4..])
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl std::str::FromStr for $name {
            type Err = StreamError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let stripped = s.strip_prefix("0x").unwrap_or(s);
                if stripped.len() != $len * 2 {
                    return Err(StreamError::MalformedIdentifier(s.to_string()));
                }
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(stripped, &mut bytes)
                    .map_err(|_| StreamError::MalformedIdentifier(s.to_string()))?;
                Ok(Self(bytes))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes_id!(Address, 20, "Party or token identity handle (20 bytes).");
fixed_bytes_id!(StreamId, 32, "Stream handle (32 bytes, content hash of the stream parameters).");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_roundtrip() {
        let addr: Address = "0xfd3c782ae7ab6950409c65ba839349f5c0b32f19".parse().unwrap();
        assert_eq!(addr.to_string(), "0xfd3c782ae7ab6950409c65ba839349f5c0b32f19");

        // Prefix is optional on parse
        let bare: Address = "fd3c782ae7ab6950409c65ba839349f5c0b32f19".parse().unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_short_display() {
        let addr: Address = "0xfd3c782ae7ab6950409c65ba839349f5c0b32f19".parse().unwrap();
        assert_eq!(addr.short(), "0xfd3...2f19");
    }

    #[test]
    fn test_malformed_rejected() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz3c782ae7ab6950409c65ba839349f5c0b32f19".parse::<Address>().is_err());
        // Address-length input is not a stream id
        assert!("0xfd3c782ae7ab6950409c65ba839349f5c0b32f19".parse::<StreamId>().is_err());
    }

    #[test]
    fn test_zero_handle() {
        assert!(Address::ZERO.is_zero());
        let addr: Address = "0x0000000000000000000000000000000000000000".parse().unwrap();
        assert_eq!(addr, Address::ZERO);
    }
}
