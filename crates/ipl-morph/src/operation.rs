//! Operation selector

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{MorphError, MorphResult};

/// Which morphological operation a stage runs.
///
/// The discriminants match the host's radio-button index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphOp {
    /// Grow foreground
    #[default]
    Dilate = 0,
    /// Shrink foreground
    Erode = 1,
    /// Erosion followed by dilation
    #[serde(alias = "opening")]
    Open = 2,
    /// Dilation followed by erosion
    #[serde(alias = "closing")]
    Close = 3,
}

impl MorphOp {
    /// All operations, in host index order.
    pub const ALL: [MorphOp; 4] = [MorphOp::Dilate, MorphOp::Erode, MorphOp::Open, MorphOp::Close];

    /// Number of operator-core passes per iteration.
    pub fn passes(self) -> usize {
        match self {
            MorphOp::Dilate | MorphOp::Erode => 1,
            MorphOp::Open | MorphOp::Close => 2,
        }
    }

    /// Look up an operation by host index.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownOperation`] for indices outside 0..=3.
    pub fn from_index(index: i64) -> MorphResult<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| MorphError::UnknownOperation(format!("index {index}")))
    }

    /// Host index of this operation.
    pub fn index(self) -> i64 {
        self as i64
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            MorphOp::Dilate => "dilate",
            MorphOp::Erode => "erode",
            MorphOp::Open => "open",
            MorphOp::Close => "close",
        }
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MorphOp {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dilate" => Ok(MorphOp::Dilate),
            "erode" => Ok(MorphOp::Erode),
            "open" | "opening" => Ok(MorphOp::Open),
            "close" | "closing" => Ok(MorphOp::Close),
            _ => Err(MorphError::UnknownOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for op in MorphOp::ALL {
            assert_eq!(MorphOp::from_index(op.index()).unwrap(), op);
        }
        assert!(MorphOp::from_index(4).is_err());
        assert!(MorphOp::from_index(-1).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Dilate".parse::<MorphOp>().unwrap(), MorphOp::Dilate);
        assert_eq!(" erode ".parse::<MorphOp>().unwrap(), MorphOp::Erode);
        assert_eq!("Opening".parse::<MorphOp>().unwrap(), MorphOp::Open);
        assert_eq!("closing".parse::<MorphOp>().unwrap(), MorphOp::Close);
        assert!(matches!(
            "tophat".parse::<MorphOp>(),
            Err(MorphError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_display_and_passes() {
        assert_eq!(MorphOp::Close.to_string(), "close");
        assert_eq!(MorphOp::Dilate.passes(), 1);
        assert_eq!(MorphOp::Open.passes(), 2);
    }

    #[test]
    fn test_serde_names() {
        let op: MorphOp = serde_json::from_str("\"opening\"").unwrap();
        assert_eq!(op, MorphOp::Open);
        assert_eq!(serde_json::to_string(&MorphOp::Erode).unwrap(), "\"erode\"");
    }
}
