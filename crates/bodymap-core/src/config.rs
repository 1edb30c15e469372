use crate::error::{Error, Result};
use crate::tables;
use serde_json::{Value, json};

/// Body-map configuration: a JSON object deep-merged over [`BodyMapConfig::default`].
///
/// Keys: `assetRoute`, `silhouette`, `viewBox.width`, `viewBox.height` and `theme.*` colors.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyMapConfig(Value);

pub const DEFAULT_ASSET_ROUTE: &str = "/body-parts/";

impl Default for BodyMapConfig {
    fn default() -> Self {
        Self(json!({
            "assetRoute": DEFAULT_ASSET_ROUTE,
            "silhouette": tables::SILHOUETTE_FILE,
            "viewBox": {
                "width": tables::VIEW_BOX_WIDTH,
                "height": tables::VIEW_BOX_HEIGHT,
            },
            "theme": {
                "affectedFill": "rgba(220, 38, 38, 0.45)",
                "affectedStroke": "#dc2626",
                "hoverStroke": "#2563eb",
                "selectedStroke": "#1d4ed8",
                "labelColor": "#111827",
                "panelFill": "#ffffff",
            },
        }))
    }
}

impl BodyMapConfig {
    /// Defaults with `overrides` merged on top.
    pub fn from_value(overrides: Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(&overrides);
        cfg
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfigJson {
            message: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(Error::InvalidConfigJson {
                message: "expected a JSON object".to_string(),
            });
        }
        Ok(Self::from_value(value))
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.get(dotted_path)?;
        v.as_f64().or_else(|| v.as_i64().map(|n| n as f64))
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// Static route the assets are served from; always ends with `/`.
    pub fn asset_route(&self) -> String {
        let route = self
            .get_str("assetRoute")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ASSET_ROUTE);
        if route.ends_with('/') {
            route.to_string()
        } else {
            format!("{route}/")
        }
    }

    pub fn silhouette(&self) -> &str {
        self.get_str("silhouette")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(tables::SILHOUETTE_FILE)
    }

    pub fn view_width(&self) -> f64 {
        self.get_f64("viewBox.width")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(tables::VIEW_BOX_WIDTH)
    }

    pub fn view_height(&self) -> f64 {
        self.get_f64("viewBox.height")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(tables::VIEW_BOX_HEIGHT)
    }

    /// A `theme.*` color, or `fallback` when unset or not embeddable in a stylesheet.
    pub fn theme_color(&self, key: &str, fallback: &str) -> String {
        self.get(&format!("theme.{key}"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| is_css_color_token(s))
            .unwrap_or(fallback)
            .to_string()
    }
}

fn is_css_color_token(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, '<' | '>' | '&' | '{' | '}' | ';' | '"' | '\\') || c.is_control())
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (k, v) in incoming_map {
                match base_map.get_mut(k) {
                    Some(existing) => deep_merge_value(existing, v),
                    None => {
                        base_map.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (base_slot, incoming_value) => {
            *base_slot = incoming_value.clone();
        }
    }
}
