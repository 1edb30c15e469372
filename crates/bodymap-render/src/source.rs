//! Where overlay graphics come from.
//!
//! The loader only sees `(status, body)` pairs for a static asset path, so hosts can back it with
//! a browser fetch, an HTTP client, embedded bytes or a directory on disk.

use crate::{Error, Result};
use bodymap_core::config::DEFAULT_ASSET_ROUTE;
use std::collections::HashMap;
use std::future::{Future, ready};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub body: String,
}

impl AssetResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait AssetSource {
    /// Fetches one asset. Non-2xx statuses are returned as responses; `Err` means the request
    /// itself failed.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<AssetResponse>>;
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<AssetResponse>> {
        (**self).fetch(path)
    }
}

/// Joins an asset file onto the static route.
///
/// Absolute routes (`https://cdn.example/body-parts/`) are resolved as URLs; anything else is
/// treated as a site-relative path.
pub fn resolve_asset_path(route: &str, file: &str) -> Result<String> {
    let route = route.trim();
    if route.contains("://") {
        let mut base = Url::parse(route).map_err(|e| Error::InvalidAssetRoute {
            route: route.to_string(),
            message: e.to_string(),
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let joined = base.join(file).map_err(|e| Error::InvalidAssetRoute {
            route: route.to_string(),
            message: e.to_string(),
        })?;
        return Ok(joined.to_string());
    }

    let route = route.trim_end_matches('/');
    Ok(format!("{route}/{file}"))
}

/// Serves the static asset route from a directory.
///
/// Missing files answer 404, paths outside the route answer 404, other I/O failures are errors.
#[derive(Debug, Clone)]
pub struct StaticDirSource {
    root: PathBuf,
    route: String,
}

impl StaticDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            route: DEFAULT_ASSET_ROUTE.to_string(),
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    fn relative_path(&self, path: &str) -> Option<PathBuf> {
        // Resolving through a URL collapses `.` and `..` segments before the route is stripped.
        let base = Url::parse("http://localhost/").ok()?;
        let requested = base.join(path).ok()?;
        let route = base.join(self.route.trim()).ok()?;
        let mut route_path = route.path().to_string();
        if !route_path.ends_with('/') {
            route_path.push('/');
        }

        let rest = requested.path().strip_prefix(route_path.as_str())?;
        let rel: PathBuf = rest.split('/').filter(|s| !s.is_empty()).collect();
        if rel.as_os_str().is_empty() {
            return None;
        }
        Some(rel)
    }

    fn read(&self, path: &str) -> Result<AssetResponse> {
        let Some(rel) = self.relative_path(path) else {
            return Ok(AssetResponse::with_status(404));
        };
        let full = self.root.join(rel);
        match std::fs::read_to_string(&full) {
            Ok(body) => Ok(AssetResponse::ok(body)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(AssetResponse::with_status(404))
            }
            Err(source) => Err(Error::Io {
                path: full.display().to_string(),
                source,
            }),
        }
    }
}

impl AssetSource for StaticDirSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<AssetResponse>> {
        ready(self.read(path))
    }
}

/// In-memory assets keyed by request path; unknown paths answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, std::result::Result<AssetResponse, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.entries
            .insert(path.into(), Ok(AssetResponse::ok(body)));
        self
    }

    pub fn with_status(mut self, path: impl Into<String>, status: u16) -> Self {
        self.entries
            .insert(path.into(), Ok(AssetResponse::with_status(status)));
        self
    }

    /// Makes requests for `path` fail as if the network call raised.
    pub fn with_failure(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(path.into(), Err(message.into()));
        self
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<AssetResponse>> {
        let out = match self.entries.get(path) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(Error::Fetch {
                path: path.to_string(),
                message: message.clone(),
            }),
            None => Ok(AssetResponse::with_status(404)),
        };
        ready(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn resolves_site_relative_routes() {
        assert_eq!(
            resolve_asset_path("/body-parts/", "heart.svg").unwrap(),
            "/body-parts/heart.svg"
        );
        assert_eq!(
            resolve_asset_path("/static/organs", "kidney.svg").unwrap(),
            "/static/organs/kidney.svg"
        );
    }

    #[test]
    fn resolves_absolute_routes_as_urls() {
        assert_eq!(
            resolve_asset_path("https://cdn.example.com/assets", "brain.svg").unwrap(),
            "https://cdn.example.com/assets/brain.svg"
        );
        assert!(matches!(
            resolve_asset_path("http://[::1/", "brain.svg"),
            Err(Error::InvalidAssetRoute { .. })
        ));
    }

    #[test]
    fn memory_source_reports_missing_paths_as_404() {
        let source = MemorySource::new()
            .with_asset("/body-parts/heart.svg", "<svg/>")
            .with_failure("/body-parts/brain.svg", "connection reset");

        let ok = block_on(source.fetch("/body-parts/heart.svg")).unwrap();
        assert!(ok.is_success());
        let missing = block_on(source.fetch("/body-parts/lungs.svg")).unwrap();
        assert_eq!(missing.status, 404);
        assert!(matches!(
            block_on(source.fetch("/body-parts/brain.svg")),
            Err(Error::Fetch { .. })
        ));
    }

    #[test]
    fn static_dir_source_stays_inside_the_route() {
        let source = StaticDirSource::new("/nonexistent-root");
        assert_eq!(
            source.relative_path("/body-parts/heart.svg"),
            Some(PathBuf::from("heart.svg"))
        );
        assert_eq!(
            source.relative_path("/body-parts/../secrets/key.pem"),
            None
        );
        assert_eq!(source.relative_path("/other/heart.svg"), None);
        assert_eq!(source.relative_path("/body-parts/"), None);
    }
}
