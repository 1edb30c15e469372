#![forbid(unsafe_code)]

//! `bodymap` is a headless, interactive body map in Rust.
//!
//! Conditions are attached to body parts; affected organs are drawn from per-part illustrations
//! over a full-body silhouette, and every part stays hoverable and selectable.
//!
//! # Features
//!
//! - `render`: enable asset loading + SVG rendering (`bodymap::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use bodymap_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use bodymap_render::{
        AssetLoad, AssetResponse, AssetSource, BodyMap, BodyMapProps, Detail, LoadFailure,
        LoadReport, LoadTarget, MemorySource, StaticDirSource, SvgRenderOptions, sanitize_svg_id,
    };

    use bodymap_core::{BodyMapConfig, BodyPart, Condition, ConditionIndex};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] bodymap_core::Error),
        #[error(transparent)]
        Render(#[from] bodymap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Output of a one-shot render, together with what the asset load managed to fetch.
    #[derive(Debug, Clone)]
    pub struct RenderedBodyMap {
        pub svg: String,
        pub report: LoadReport,
    }

    /// Convenience wrapper that bundles configuration and a fixed interaction snapshot for
    /// one-shot headless rendering.
    ///
    /// Each render mounts a fresh [`BodyMap`], drives its asset load to completion with
    /// `futures::executor::block_on`, replays `hover`/`select` as pointer input and renders.
    /// Interactive hosts should mount a [`BodyMap`] themselves instead.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessBodyMap {
        pub config: BodyMapConfig,
        pub svg: SvgRenderOptions,
        pub read_only: bool,
        pub hover: Option<BodyPart>,
        pub select: Option<BodyPart>,
    }

    impl HeadlessBodyMap {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: BodyMapConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_diagram_id(mut self, diagram_id: &str) -> Self {
            self.svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self
        }

        pub fn read_only(mut self, read_only: bool) -> Self {
            self.read_only = read_only;
            self
        }

        pub fn hover(mut self, part: Option<BodyPart>) -> Self {
            self.hover = part;
            self
        }

        pub fn select(mut self, part: Option<BodyPart>) -> Self {
            self.select = part;
            self
        }

        /// A [`StaticDirSource`] serving `root` under the configured asset route.
        pub fn static_dir_source(&self, root: impl Into<std::path::PathBuf>) -> StaticDirSource {
            StaticDirSource::new(root).with_route(self.config.asset_route())
        }

        /// Synchronous render helper (blocks on the asset load).
        pub fn render_sync<S>(&self, source: S, conditions: Vec<Condition>) -> Result<RenderedBodyMap>
        where
            S: AssetSource + 'static,
        {
            // Fail on an unusable asset route.
            bodymap_render::resolve_asset_path(&self.config.asset_route(), self.config.silhouette())?;

            let props = BodyMapProps::new(conditions).read_only(self.read_only);
            let (mut map, load) = BodyMap::mount(self.config.clone(), props, source);
            let report = futures::executor::block_on(load);

            if let Some(part) = self.hover {
                if !map.pointer_enter(part).needs_render() {
                    tracing::debug!(part = part.as_str(), "hover not applied");
                }
            }
            if let Some(part) = self.select {
                if !map.click(part).needs_render() {
                    tracing::debug!(part = part.as_str(), "selection not applied");
                }
            }
            if self.select.is_some() && map.detail().is_none() {
                tracing::debug!(
                    part = ?self.select,
                    "selected part has no condition, no detail panel"
                );
            }

            let svg = map.render_svg(&self.svg);
            Ok(RenderedBodyMap { svg, report })
        }

        pub fn render_svg_sync<S>(&self, source: S, conditions: Vec<Condition>) -> Result<String>
        where
            S: AssetSource + 'static,
        {
            Ok(self.render_sync(source, conditions)?.svg)
        }

        /// Like [`Self::render_svg_sync`], with conditions given as a JSON array of
        /// `{ "bodyPart": ..., "description": ... }` objects.
        pub fn render_svg_json_sync<S>(&self, source: S, conditions_json: &str) -> Result<String>
        where
            S: AssetSource + 'static,
        {
            let conditions = ConditionIndex::from_json_str(conditions_json)?;
            self.render_svg_sync(source, conditions.conditions().to_vec())
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync<S>(
            &self,
            source: S,
            conditions: Vec<Condition>,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>>
        where
            S: AssetSource + 'static,
        {
            let svg = self.render_svg_sync(source, conditions)?;
            raster::svg_to_png(&svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync<S>(
            &self,
            source: S,
            conditions: Vec<Condition>,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>>
        where
            S: AssetSource + 'static,
        {
            let svg = self.render_svg_sync(source, conditions)?;
            raster::svg_to_jpeg(&svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync<S>(
            &self,
            source: S,
            conditions: Vec<Condition>,
        ) -> raster::Result<Vec<u8>>
        where
            S: AssetSource + 'static,
        {
            let svg = self.render_svg_sync(source, conditions)?;
            raster::svg_to_pdf(&svg)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn invalid_asset_route_is_reported() {
            let config =
                BodyMapConfig::from_value(serde_json::json!({ "assetRoute": "http://[::1" }));
            let err = HeadlessBodyMap::new()
                .with_config(config)
                .render_svg_sync(MemorySource::new(), Vec::new())
                .unwrap_err();
            assert!(matches!(
                err,
                HeadlessError::Render(bodymap_render::Error::InvalidAssetRoute { .. })
            ));
        }
    }
}
