pub(crate) mod util;

use crate::assets::LoadedAssets;
use crate::overlay::{LayerKind, OverlayLayer, RegionFill, compose_overlays};
use crate::source::resolve_asset_path;
use bodymap_core::{BodyMapConfig, BodyPart, ConditionIndex, InteractionState};
use std::fmt::Write as _;
use util::{escape_xml, fmt, placement_transform};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also prefixes the embedded CSS so several maps can share a page.
    pub diagram_id: Option<String>,
    /// When false, the hover label and detail panel are omitted (hosts drawing their own).
    pub include_labels: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            include_labels: true,
        }
    }
}

/// Everything a single render reads.
#[derive(Debug, Clone, Copy)]
pub struct BodyMapView<'a> {
    pub config: &'a BodyMapConfig,
    pub conditions: &'a ConditionIndex,
    pub assets: &'a LoadedAssets,
    pub silhouette: Option<&'a str>,
    pub state: InteractionState,
    pub read_only: bool,
}

impl BodyMapView<'_> {
    pub fn hover_label(&self) -> Option<String> {
        if self.read_only {
            return None;
        }
        self.state.hovered.map(BodyPart::label)
    }

    /// `(label, description)` for the selected part's first condition.
    pub fn detail(&self) -> Option<(String, &str)> {
        let part = self.state.selected?;
        let condition = self.conditions.first_for(part)?;
        Some((part.label(), condition.description.as_str()))
    }
}

/// Converts an arbitrary string into a conservative SVG `id` token suitable for embedding
/// multiple body maps in the same UI tree.
///
/// The root `<svg id>` prefixes every rule of the embedded stylesheet, so two maps sharing
/// an id would restyle each other.
///
/// This helper:
/// - trims whitespace
/// - replaces unsupported characters with `-`
/// - ensures the id starts with an ASCII letter by prefixing `bm-` when needed
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "bm-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_ok {
        out.insert_str(0, "bm-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "bm" {
        return "bm-untitled".to_string();
    }
    out.to_string()
}

fn body_map_css(id: &str, config: &BodyMapConfig) -> String {
    let affected_fill = config.theme_color("affectedFill", "rgba(220, 38, 38, 0.45)");
    let affected_stroke = config.theme_color("affectedStroke", "#dc2626");
    let hover_stroke = config.theme_color("hoverStroke", "#2563eb");
    let selected_stroke = config.theme_color("selectedStroke", "#1d4ed8");
    let label_color = config.theme_color("labelColor", "#111827");
    let panel_fill = config.theme_color("panelFill", "#ffffff");

    let mut css = String::new();
    let _ = write!(
        &mut css,
        "#{id} .overlay{{cursor:pointer;}}\
#{id}[data-read-only=\"true\"] .overlay{{cursor:default;pointer-events:none;}}\
#{id} .region.transparent{{fill:transparent;stroke:none;}}\
#{id} .region.affected{{fill:{affected_fill};stroke:{affected_stroke};stroke-width:1.5;}}\
#{id} .illustration.affected *{{fill:{affected_fill};stroke:{affected_stroke};}}\
#{id} .overlay.hovered{{stroke:{hover_stroke};stroke-width:2;}}\
#{id} .overlay.selected{{stroke:{selected_stroke};stroke-width:3;}}\
#{id} .hover-label text{{fill:{label_color};font-family:sans-serif;font-size:18px;text-anchor:middle;}}\
#{id} .detail-panel rect{{fill:{panel_fill};stroke:{label_color};stroke-width:1;}}\
#{id} .detail-panel text{{fill:{label_color};font-family:sans-serif;}}\
#{id} .detail-title{{font-size:20px;font-weight:bold;}}\
#{id} .detail-description{{font-size:16px;}}"
    );
    css
}

fn layer_class(layer: &OverlayLayer<'_>) -> String {
    let mut class = String::from("overlay");
    match layer.kind {
        LayerKind::Illustration { .. } => class.push_str(" illustration affected"),
        LayerKind::Region {
            fill: RegionFill::Affected,
            ..
        } => class.push_str(" region affected"),
        LayerKind::Region {
            fill: RegionFill::Transparent,
            ..
        } => class.push_str(" region transparent"),
    }
    if layer.hovered {
        class.push_str(" hovered");
    }
    if layer.selected {
        class.push_str(" selected");
    }
    class
}

fn render_layer(out: &mut String, layer: &OverlayLayer<'_>) {
    let class = layer_class(layer);
    let part = layer.part.as_str();
    let label = escape_xml(&layer.part.label());
    match &layer.kind {
        LayerKind::Illustration {
            placement,
            fragment,
        } => {
            let _ = write!(
                out,
                r#"<g class="{class}" data-part="{part}" aria-label="{label}" transform="{transform}">{fragment}</g>"#,
                transform = placement_transform(placement),
            );
        }
        LayerKind::Region { path, .. } => {
            let _ = write!(
                out,
                r#"<path class="{class}" data-part="{part}" aria-label="{label}" d="{path}"/>"#
            );
        }
    }
}

fn render_silhouette(out: &mut String, view: &BodyMapView<'_>, width: f64, height: f64) {
    if let Some(fragment) = view.silhouette {
        let _ = write!(out, r#"<g class="silhouette">{fragment}</g>"#);
        return;
    }

    // Not loaded (yet): point the host at the static route instead.
    let Ok(href) = resolve_asset_path(&view.config.asset_route(), view.config.silhouette()) else {
        return;
    };
    let _ = write!(
        out,
        r#"<image class="silhouette" href="{href}" x="0" y="0" width="{w}" height="{h}"/>"#,
        href = escape_xml(&href),
        w = fmt(width),
        h = fmt(height),
    );
}

fn render_labels(out: &mut String, view: &BodyMapView<'_>, width: f64, height: f64) {
    if let Some(label) = view.hover_label() {
        let _ = write!(
            out,
            r#"<g class="hover-label"><text x="{x}" y="32">{text}</text></g>"#,
            x = fmt(width / 2.0),
            text = escape_xml(&label),
        );
    }

    if let Some((label, description)) = view.detail() {
        let panel_x = 20.0;
        let panel_h = 100.0;
        let panel_y = height - panel_h - 20.0;
        let _ = write!(
            out,
            r#"<g class="detail-panel"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="8"/><text class="detail-title" x="{tx}" y="{ty}">{title}</text><text class="detail-description" x="{tx}" y="{dy}">{description}</text></g>"#,
            x = fmt(panel_x),
            y = fmt(panel_y),
            w = fmt(width - 2.0 * panel_x),
            h = fmt(panel_h),
            tx = fmt(panel_x + 20.0),
            ty = fmt(panel_y + 36.0),
            dy = fmt(panel_y + 70.0),
            title = escape_xml(&label),
            description = escape_xml(description),
        );
    }
}

/// Renders the body map as a standalone SVG document.
pub fn render_body_map_svg(view: &BodyMapView<'_>, options: &SvgRenderOptions) -> String {
    let diagram_id = options
        .diagram_id
        .as_deref()
        .map(sanitize_svg_id)
        .unwrap_or_else(|| "bodymap".to_string());
    let width = view.config.view_width();
    let height = view.config.view_height();

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{diagram_id}" width="100%" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {w} {h}" style="max-width: {w}px;" role="graphics-document document" aria-roledescription="body-map" data-read-only="{read_only}">"#,
        w = fmt(width),
        h = fmt(height),
        read_only = view.read_only,
    );
    let _ = write!(
        &mut out,
        "<style>{}</style>",
        body_map_css(&diagram_id, view.config)
    );

    render_silhouette(&mut out, view, width, height);

    out.push_str(r#"<g class="overlays">"#);
    for layer in compose_overlays(view.assets, view.conditions, view.state) {
        render_layer(&mut out, &layer);
    }
    out.push_str("</g>");

    if options.include_labels {
        render_labels(&mut out, view, width, height);
    }

    out.push_str("</svg>\n");
    out
}
