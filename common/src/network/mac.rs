use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressParseError;

/// A 48-bit hardware address.
///
/// Parsing accepts `:`, `-` and `.` separated forms as well as 12 bare hex
/// digits, in any case. Display is always uppercase and colon separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }

    /// The organizationally unique identifier, i.e. the first three octets.
    pub fn oui(&self) -> OuiPrefix {
        OuiPrefix([self.0[0], self.0[1], self.0[2]])
    }

    /// Bit 1 of the first octet marks locally administered (randomized or virtual) addresses.
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl FromStr for MacAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_octets::<6>(s).map(Self)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_octets(f, &self.0)
    }
}

/// First three octets of a MAC address, e.g. `AA:BB:CC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OuiPrefix([u8; 3]);

impl OuiPrefix {
    pub const fn new(octets: [u8; 3]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 3] {
        self.0
    }

    /// The lowest address inside this block, `AA:BB:CC:00:00:00`.
    pub fn first_address(&self) -> MacAddress {
        MacAddress([self.0[0], self.0[1], self.0[2], 0, 0, 0])
    }
}

impl FromStr for OuiPrefix {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_octets::<3>(s).map(Self)
    }
}

impl fmt::Display for OuiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_octets(f, &self.0)
    }
}

fn parse_octets<const N: usize>(s: &str) -> Result<[u8; N], AddressParseError> {
    let digits: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .collect();

    if digits.len() != N * 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressParseError::new(s));
    }

    let mut octets = [0u8; N];
    for (idx, octet) in octets.iter_mut().enumerate() {
        *octet = u8::from_str_radix(&digits[idx * 2..idx * 2 + 2], 16)
            .map_err(|_| AddressParseError::new(s))?;
    }
    Ok(octets)
}

fn write_octets(f: &mut fmt::Formatter<'_>, octets: &[u8]) -> fmt::Result {
    for (idx, octet) in octets.iter().enumerate() {
        if idx > 0 {
            f.write_str(":")?;
        }
        write!(f, "{octet:02X}")?;
    }
    Ok(())
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(MacAddress);
string_serde!(OuiPrefix);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_notations() {
        let expected = MacAddress::new([0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33]);
        for raw in [
            "AA:BB:CC:11:22:33",
            "aa:bb:cc:11:22:33",
            "aa-bb-cc-11-22-33",
            "aabb.cc11.2233",
            "AABBCC112233",
            "  aa:bb:cc:11:22:33\n",
        ] {
            assert_eq!(raw.parse::<MacAddress>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "AA:BB:CC", "AA:BB:CC:11:22:33:44", "GG:BB:CC:11:22:33", "AA:BB:CC:11:22:3"] {
            assert!(raw.parse::<MacAddress>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn displays_canonical_uppercase() {
        let mac: MacAddress = "24:f5:aa:11:22:33".parse().unwrap();
        assert_eq!(mac.to_string(), "24:F5:AA:11:22:33");
        assert_eq!(mac.oui().to_string(), "24:F5:AA");
    }

    #[test]
    fn oui_groups_addresses_by_first_three_octets() {
        let a: MacAddress = "08:00:27:ab:cd:ef".parse().unwrap();
        let b: MacAddress = "08:00:27:44:55:66".parse().unwrap();
        let c: MacAddress = "52:54:00:12:34:56".parse().unwrap();
        assert_eq!(a.oui(), b.oui());
        assert_ne!(a.oui(), c.oui());
        assert_eq!(a.oui().first_address().to_string(), "08:00:27:00:00:00");
    }

    #[test]
    fn detects_locally_administered_bit() {
        assert!("02:42:ac:11:00:02".parse::<MacAddress>().unwrap().is_locally_administered());
        assert!(!"00:1c:b3:00:00:00".parse::<MacAddress>().unwrap().is_locally_administered());
    }
}
