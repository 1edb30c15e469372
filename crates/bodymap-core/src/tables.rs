//! Static per-region lookup tables.
//!
//! All coordinates live in the overlay coordinate space (`VIEW_BOX_WIDTH` x `VIEW_BOX_HEIGHT`,
//! origin top-left, body centred on x = 250). Values are hand-tuned against the base silhouette
//! and must not be adjusted independently of it.

use crate::BodyPart;
use serde::Serialize;

pub const VIEW_BOX_WIDTH: f64 = 500.0;
pub const VIEW_BOX_HEIGHT: f64 = 1000.0;

/// File name of the base silhouette under the asset route.
pub const SILHOUETTE_FILE: &str = "body.svg";

/// Position of an illustration layer: `translate(x,y) scale(s)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Placement {
    const fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }
}

/// Asset file name for regions with a dedicated illustration.
pub const fn asset_file(part: BodyPart) -> Option<&'static str> {
    match part {
        BodyPart::Brain => Some("brain.svg"),
        BodyPart::Heart => Some("heart.svg"),
        BodyPart::Lungs => Some("lungs.svg"),
        BodyPart::Liver => Some("liver.svg"),
        BodyPart::Stomach => Some("stomach.svg"),
        BodyPart::Pancreas => Some("pancreas.svg"),
        BodyPart::LargeIntestine => Some("large_intestine.svg"),
        BodyPart::Kidneys => Some("kidney.svg"),
        BodyPart::Thyroid => Some("thyroid.svg"),
        BodyPart::Bladder => Some("bladder.svg"),
        BodyPart::Head
        | BodyPart::SmallIntestine
        | BodyPart::LeftArm
        | BodyPart::RightArm
        | BodyPart::LeftLeg
        | BodyPart::RightLeg => None,
    }
}

/// Illustration placement; `None` exactly when [`asset_file`] is `None`.
pub const fn placement(part: BodyPart) -> Option<Placement> {
    match part {
        BodyPart::Brain => Some(Placement::new(170.0, 60.0, 0.8)),
        BodyPart::Heart => Some(Placement::new(200.0, 220.0, 0.6)),
        BodyPart::Lungs => Some(Placement::new(150.0, 180.0, 0.9)),
        BodyPart::Liver => Some(Placement::new(160.0, 300.0, 0.7)),
        BodyPart::Stomach => Some(Placement::new(240.0, 300.0, 0.6)),
        BodyPart::Pancreas => Some(Placement::new(200.0, 350.0, 0.6)),
        BodyPart::LargeIntestine => Some(Placement::new(160.0, 380.0, 0.9)),
        BodyPart::Kidneys => Some(Placement::new(170.0, 340.0, 0.8)),
        BodyPart::Thyroid => Some(Placement::new(225.0, 165.0, 0.4)),
        BodyPart::Bladder => Some(Placement::new(215.0, 470.0, 0.5)),
        BodyPart::Head
        | BodyPart::SmallIntestine
        | BodyPart::LeftArm
        | BodyPart::RightArm
        | BodyPart::LeftLeg
        | BodyPart::RightLeg => None,
    }
}

/// Clickable region path data, drawn directly in overlay space.
///
/// Every region has one: illustrated parts fall back to it while their asset is unavailable.
pub const fn hit_region(part: BodyPart) -> &'static str {
    match part {
        BodyPart::Head => "M195,90 A55,65 0 1,1 305,90 A55,65 0 1,1 195,90 Z",
        BodyPart::Brain => "M205,70 A45,35 0 1,1 295,70 A45,35 0 1,1 205,70 Z",
        BodyPart::Thyroid => "M235,170 L265,170 L262,185 L238,185 Z",
        BodyPart::Lungs => {
            "M185,200 C170,240 170,300 190,330 L240,330 L240,210 Z M315,200 C330,240 330,300 310,330 L260,330 L260,210 Z"
        }
        BodyPart::Heart => {
            "M245,240 C230,225 210,240 220,265 L250,295 L280,265 C290,240 270,225 255,240 Z"
        }
        BodyPart::Liver => "M180,320 L260,315 L250,360 L190,365 Z",
        BodyPart::Stomach => "M265,320 C300,315 315,350 295,375 C280,390 260,380 262,360 Z",
        BodyPart::Pancreas => "M215,370 L290,362 L292,375 L218,384 Z",
        BodyPart::Kidneys => {
            "M186,377 A14,22 0 1,1 214,377 A14,22 0 1,1 186,377 Z M286,377 A14,22 0 1,1 314,377 A14,22 0 1,1 286,377 Z"
        }
        BodyPart::SmallIntestine => {
            "M210,410 C200,440 220,470 250,470 C280,470 300,440 290,410 C270,400 230,400 210,410 Z"
        }
        BodyPart::LargeIntestine => {
            "M185,395 L315,395 L315,485 L290,485 L290,420 L210,420 L210,485 L185,485 Z"
        }
        BodyPart::Bladder => {
            "M230,490 C230,475 270,475 270,490 C270,510 255,518 250,518 C245,518 230,510 230,490 Z"
        }
        BodyPart::LeftArm => "M160,180 L120,200 L90,420 L70,520 L95,525 L120,430 L160,260 Z",
        BodyPart::RightArm => "M340,180 L380,200 L410,420 L430,520 L405,525 L380,430 L340,260 Z",
        BodyPart::LeftLeg => "M190,520 L245,520 L240,760 L235,960 L200,960 L195,760 Z",
        BodyPart::RightLeg => "M255,520 L310,520 L305,760 L300,960 L265,960 L260,760 Z",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_and_asset_tables_agree() {
        for part in BodyPart::ALL {
            assert_eq!(
                asset_file(part).is_some(),
                placement(part).is_some(),
                "{part}"
            );
        }
    }

    #[test]
    fn every_part_has_a_closed_hit_region() {
        for part in BodyPart::ALL {
            let d = hit_region(part);
            assert!(d.starts_with('M'), "{part}: {d}");
            assert!(d.ends_with('Z'), "{part}: {d}");
        }
    }

    #[test]
    fn asset_files_are_unique_svg_names() {
        let mut files: Vec<&str> = BodyPart::ALL.into_iter().filter_map(asset_file).collect();
        assert_eq!(files.len(), 10);
        assert!(files.iter().all(|f| f.ends_with(".svg")));
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), 10);
    }

    #[test]
    fn hand_tuned_placements_are_preserved() {
        assert_eq!(
            placement(BodyPart::Brain),
            Some(Placement {
                translate_x: 170.0,
                translate_y: 60.0,
                scale: 0.8
            })
        );
        assert_eq!(
            placement(BodyPart::Heart),
            Some(Placement {
                translate_x: 200.0,
                translate_y: 220.0,
                scale: 0.6
            })
        );
        assert_eq!(asset_file(BodyPart::Kidneys), Some("kidney.svg"));
    }
}
