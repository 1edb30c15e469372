use crate::error::{Error, Result};
use crate::tables;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named anatomical region.
///
/// The set is closed: the placement, hit-region and asset tables in [`crate::tables`] match on
/// every variant, so adding a region without table entries does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Head,
    Brain,
    Heart,
    Lungs,
    Liver,
    Stomach,
    Pancreas,
    SmallIntestine,
    LargeIntestine,
    Kidneys,
    Thyroid,
    Bladder,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    /// Every region, in draw order.
    pub const ALL: [BodyPart; 16] = [
        BodyPart::Head,
        BodyPart::Brain,
        BodyPart::Heart,
        BodyPart::Lungs,
        BodyPart::Liver,
        BodyPart::Stomach,
        BodyPart::Pancreas,
        BodyPart::SmallIntestine,
        BodyPart::LargeIntestine,
        BodyPart::Kidneys,
        BodyPart::Thyroid,
        BodyPart::Bladder,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];

    /// Compact identifier form (`largeIntestine`), as stored on conditions.
    pub const fn as_str(self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Brain => "brain",
            BodyPart::Heart => "heart",
            BodyPart::Lungs => "lungs",
            BodyPart::Liver => "liver",
            BodyPart::Stomach => "stomach",
            BodyPart::Pancreas => "pancreas",
            BodyPart::SmallIntestine => "smallIntestine",
            BodyPart::LargeIntestine => "largeIntestine",
            BodyPart::Kidneys => "kidneys",
            BodyPart::Thyroid => "thyroid",
            BodyPart::Bladder => "bladder",
            BodyPart::LeftArm => "leftArm",
            BodyPart::RightArm => "rightArm",
            BodyPart::LeftLeg => "leftLeg",
            BodyPart::RightLeg => "rightLeg",
        }
    }

    /// Human-readable label (`Large Intestine`).
    pub fn label(self) -> String {
        crate::label::format_label(self.as_str())
    }

    /// True when the region has a dedicated illustration asset.
    pub const fn is_illustrated(self) -> bool {
        tables::asset_file(self).is_some()
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = Error;

    /// Accepts the compact identifier and, leniently, its snake/kebab/spaced spellings
    /// (`large_intestine`, `Large Intestine`).
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        if let Some(part) = BodyPart::ALL.iter().find(|p| p.as_str() == raw) {
            return Ok(*part);
        }

        let folded: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        BodyPart::ALL
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(&folded))
            .copied()
            .ok_or_else(|| Error::UnknownBodyPart {
                identifier: raw.to_string(),
            })
    }
}
