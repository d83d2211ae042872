use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

/// Sample depth shared by the input and both outputs of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitDepth {
    Eight,
    #[default]
    Sixteen,
}

impl BitDepth {
    pub fn bits(&self) -> u8 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }
}

impl Serialize for BitDepth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for BitDepth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        raw.try_into()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = InvalidConfig;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            value => Err(InvalidConfig::new(format!(
                "Invalid bit depth: {value} (expected 8 or 16)"
            ))),
        }
    }
}
