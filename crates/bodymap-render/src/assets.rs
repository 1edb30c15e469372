//! Overlay asset loading.
//!
//! Assets are fetched once per mount, sequentially, and every successful result is pushed to the
//! mounted component as soon as it resolves. Failures never escape this module: a part whose
//! asset cannot be fetched or parsed is logged and left without an illustration.

use crate::source::{AssetSource, resolve_asset_path};
use crate::svg::util::escape_xml_into;
use bodymap_core::{BodyPart, tables};
use futures::channel::mpsc::UnboundedSender;
use indexmap::IndexMap;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A drawable graphic fragment for an illustrated part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayAsset {
    pub part: BodyPart,
    pub fragment: String,
}

/// Assets delivered so far, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedAssets {
    by_part: IndexMap<BodyPart, OverlayAsset>,
}

impl LoadedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: OverlayAsset) {
        self.by_part.insert(asset.part, asset);
    }

    pub fn get(&self, part: BodyPart) -> Option<&OverlayAsset> {
        self.by_part.get(&part)
    }

    pub fn len(&self) -> usize {
        self.by_part.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_part.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadTarget {
    Silhouette,
    Part(BodyPart),
}

impl std::fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadTarget::Silhouette => f.write_str("silhouette"),
            LoadTarget::Part(part) => write!(f, "{part}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Silhouette(String),
    Overlay(OverlayAsset),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The source answered with a non-2xx status.
    Status(u16),
    /// The request itself failed, or its path could not be built.
    Source(String),
    /// The body was not an SVG document or had no drawable content.
    EmptyContent,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadFailure::Status(status) => write!(f, "HTTP {status}"),
            LoadFailure::Source(message) => f.write_str(message),
            LoadFailure::EmptyContent => f.write_str("no drawable content"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<LoadTarget>,
    pub failed: Vec<(LoadTarget, LoadFailure)>,
    /// Set when the component was unmounted before the load finished.
    pub aborted: bool,
}

impl LoadReport {
    pub fn aborted() -> Self {
        Self {
            aborted: true,
            ..Self::default()
        }
    }

    pub fn is_loaded(&self, target: LoadTarget) -> bool {
        self.loaded.contains(&target)
    }

    pub fn failure(&self, target: LoadTarget) -> Option<&LoadFailure> {
        self.failed
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, failure)| failure)
    }
}

/// Silhouette first, then every illustrated part in draw order.
fn load_targets(silhouette: &str) -> Vec<(LoadTarget, &str)> {
    let mut out = vec![(LoadTarget::Silhouette, silhouette)];
    out.extend(
        BodyPart::ALL
            .into_iter()
            .filter_map(|part| tables::asset_file(part).map(|file| (LoadTarget::Part(part), file))),
    );
    out
}

/// Fetches the silhouette and every illustrated part's asset, delivering each success on `sink`.
///
/// Stops early, marking the report aborted, once the receiving component is gone.
pub async fn load_assets<S: AssetSource + ?Sized>(
    source: &S,
    route: &str,
    silhouette: &str,
    sink: &UnboundedSender<LoadEvent>,
) -> LoadReport {
    let mut report = LoadReport::default();

    for (target, file) in load_targets(silhouette) {
        if sink.is_closed() {
            report.aborted = true;
            break;
        }

        let fragment = match fetch_fragment(source, route, file).await {
            Ok(fragment) => fragment,
            Err(failure) => {
                tracing::warn!(%target, file, %failure, "body-map asset unavailable");
                report.failed.push((target, failure));
                continue;
            }
        };

        let event = match target {
            LoadTarget::Silhouette => LoadEvent::Silhouette(fragment),
            LoadTarget::Part(part) => LoadEvent::Overlay(OverlayAsset { part, fragment }),
        };
        if sink.unbounded_send(event).is_err() {
            tracing::debug!(%target, "body map unmounted; discarding asset");
            report.aborted = true;
            break;
        }
        tracing::debug!(%target, file, "body-map asset loaded");
        report.loaded.push(target);
    }

    tracing::info!(
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        aborted = report.aborted,
        "body-map asset load finished"
    );
    report
}

async fn fetch_fragment<S: AssetSource + ?Sized>(
    source: &S,
    route: &str,
    file: &str,
) -> Result<String, LoadFailure> {
    let path = resolve_asset_path(route, file).map_err(|e| LoadFailure::Source(e.to_string()))?;
    let response = source
        .fetch(&path)
        .await
        .map_err(|e| LoadFailure::Source(e.to_string()))?;
    if !response.is_success() {
        return Err(LoadFailure::Status(response.status));
    }

    let fragment = extract_drawable_fragment(&response.body);
    if fragment.trim().is_empty() {
        return Err(LoadFailure::EmptyContent);
    }
    Ok(fragment)
}

/// Serialises the drawable children of an SVG document's root element.
///
/// `title`, `desc` and `metadata` elements are dropped at any depth, as are elements and
/// attributes from editor namespaces. Anything that does not parse as an `<svg>` document yields
/// an empty string.
pub fn extract_drawable_fragment(svg: &str) -> String {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let Ok(doc) = roxmltree::Document::parse_with_options(svg, opts) else {
        return String::new();
    };
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return String::new();
    }

    let mut out = String::new();
    for child in root.children().filter(|n| n.is_element()) {
        write_element(&mut out, child);
    }
    out
}

fn is_drawable(node: roxmltree::Node<'_, '_>) -> bool {
    let tag = node.tag_name();
    if !matches!(tag.namespace(), None | Some(SVG_NS)) {
        return false;
    }
    !matches!(tag.name(), "title" | "desc" | "metadata")
}

fn write_element(out: &mut String, node: roxmltree::Node<'_, '_>) {
    if !is_drawable(node) {
        return;
    }

    let name = node.tag_name().name();
    out.push('<');
    out.push_str(name);
    for attr in node.attributes() {
        let prefix = match attr.namespace() {
            None => "",
            Some(XLINK_NS) => "xlink:",
            Some(XML_NS) => "xml:",
            Some(_) => continue,
        };
        out.push(' ');
        out.push_str(prefix);
        out.push_str(attr.name());
        out.push_str("=\"");
        escape_xml_into(out, attr.value());
        out.push('"');
    }

    let mut children = node.children().peekable();
    if children.peek().is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in children {
        if child.is_element() {
            write_element(out, child);
        } else if child.is_text() {
            escape_xml_into(out, child.text().unwrap_or_default());
        }
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
