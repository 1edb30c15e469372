#![forbid(unsafe_code)]

//! Headless body-map renderer.
//!
//! A [`BodyMap`] is mounted with a condition list and an [`AssetSource`]. Mounting returns an
//! [`AssetLoad`] future that fetches the silhouette and organ illustrations once; the caller
//! drives it on whatever executor it already has. The component renders immediately and picks
//! up assets as they arrive. Dropping the component cancels the load.

pub mod assets;
pub mod component;
pub mod overlay;
pub mod source;
pub mod svg;

pub use assets::{
    LoadEvent, LoadFailure, LoadReport, LoadTarget, LoadedAssets, OverlayAsset,
    extract_drawable_fragment, load_assets,
};
pub use component::{AssetLoad, BodyMap, BodyMapProps, Detail};
pub use overlay::{LayerKind, OverlayLayer, RegionFill, compose_overlays};
pub use source::{AssetResponse, AssetSource, MemorySource, StaticDirSource, resolve_asset_path};
pub use svg::{BodyMapView, SvgRenderOptions, render_body_map_svg, sanitize_svg_id};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("asset fetch failed for {path}: {message}")]
    Fetch { path: String, message: String },
    #[error("invalid asset route {route:?}: {message}")]
    InvalidAssetRoute { route: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
