use serde::Deserialize;

/// Selects one of the compiled-in CRC profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ProfileKind {
    /// Any even frame length from 2 to 30 bytes, single-bit correction by backward CRC search
    General,
    /// Exactly 30 bytes (240 bits), burst correction of 1..=15 bits by syndrome table lookup
    Fixed240,
}

impl ProfileKind {
    /// Parses a user supplied profile name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "general" | "gen" | "g" => Some(ProfileKind::General),
            "fixed240" | "fixed" | "ecc240" | "f" => Some(ProfileKind::Fixed240),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProfileKind::General => write!(f, "General"),
            ProfileKind::Fixed240 => write!(f, "Fixed240"),
        }
    }
}
