use crate::assets::LoadedAssets;
use bodymap_core::{BodyPart, ConditionIndex, InteractionState, Placement, tables};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFill {
    Transparent,
    Affected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind<'a> {
    /// A loaded illustration, positioned by the placement table.
    Illustration {
        placement: Placement,
        fragment: &'a str,
    },
    /// A hand-authored clickable region in overlay coordinates.
    Region {
        path: &'static str,
        fill: RegionFill,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer<'a> {
    pub part: BodyPart,
    pub kind: LayerKind<'a>,
    pub hovered: bool,
    pub selected: bool,
}

impl OverlayLayer<'_> {
    /// True when the layer is drawn with affected styling.
    pub fn shows_affected(&self) -> bool {
        match self.kind {
            LayerKind::Illustration { .. } => true,
            LayerKind::Region { fill, .. } => fill == RegionFill::Affected,
        }
    }
}

/// One layer per body part, in [`BodyPart::ALL`] order.
///
/// Affected parts with a loaded illustration get an illustration layer. Affected parts without a
/// dedicated illustration (head, limbs, small intestine) get a filled region. Illustrated parts
/// whose asset is not available degrade to a transparent region, as do unaffected parts, so every
/// part stays hoverable and clickable.
pub fn compose_overlays<'a>(
    assets: &'a LoadedAssets,
    conditions: &ConditionIndex,
    state: InteractionState,
) -> Vec<OverlayLayer<'a>> {
    BodyPart::ALL
        .into_iter()
        .map(|part| {
            let affected = conditions.is_affected(part);
            let illustration = tables::placement(part)
                .zip(assets.get(part))
                .filter(|_| affected);

            let kind = match illustration {
                Some((placement, asset)) => LayerKind::Illustration {
                    placement,
                    fragment: asset.fragment.as_str(),
                },
                None => LayerKind::Region {
                    path: tables::hit_region(part),
                    fill: if affected && !part.is_illustrated() {
                        RegionFill::Affected
                    } else {
                        RegionFill::Transparent
                    },
                },
            };

            OverlayLayer {
                part,
                kind,
                hovered: state.hovered == Some(part),
                selected: state.selected == Some(part),
            }
        })
        .collect()
}
