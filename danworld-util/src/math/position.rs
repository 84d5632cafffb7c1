use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vector3::Vector3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
/// Aka Block Position
pub struct BlockPos(pub Vector3<i32>);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParsePositionError {
    #[error("Expected three `:` separated components, got {0}")]
    WrongComponentCount(usize),
    #[error("Component `{0}` is not an integer")]
    NotAnInteger(String),
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn offset(&self, offset: Vector3<i32>) -> Self {
        BlockPos(self.0 + offset)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.x, self.0.y, self.0.z)
    }
}

/// Parses the `x:y:z` corner notation
impl FromStr for BlockPos {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(ParsePositionError::WrongComponentCount(parts.len()));
        }

        let mut components = [0i32; 3];
        for (component, part) in components.iter_mut().zip(&parts) {
            *component = part
                .trim()
                .parse()
                .map_err(|_| ParsePositionError::NotAnInteger((*part).to_string()))?;
        }

        let [x, y, z] = components;
        Ok(Self::new(x, y, z))
    }
}
