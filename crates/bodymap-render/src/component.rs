//! The mounted body-map component.
//!
//! A [`BodyMap`] owns its render state exclusively: the condition index, the interaction state
//! machine and whatever assets have been delivered so far. Mounting also returns the one-shot
//! [`AssetLoad`] future. The load is bound to the component's lifetime: dropping the component
//! aborts it, and anything that resolves afterwards is discarded with the delivery channel.

use crate::assets::{LoadEvent, LoadReport, LoadedAssets, load_assets};
use crate::source::AssetSource;
use crate::svg::{BodyMapView, SvgRenderOptions, render_body_map_svg};
use bodymap_core::interaction::SelectCallback;
use bodymap_core::{
    BodyMapConfig, BodyPart, Condition, ConditionIndex, Interaction, InteractionOutcome,
    InteractionState,
};
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::{FutureExt as _, StreamExt as _};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Inputs supplied by the parent view.
#[derive(Default)]
pub struct BodyMapProps {
    pub conditions: Vec<Condition>,
    pub read_only: bool,
    pub on_select: Option<SelectCallback>,
}

impl std::fmt::Debug for BodyMapProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyMapProps")
            .field("conditions", &self.conditions)
            .field("read_only", &self.read_only)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl BodyMapProps {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn on_select(mut self, on_select: impl FnMut(BodyPart) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }
}

/// Detail panel content for the selected part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub part: BodyPart,
    pub label: String,
    pub description: String,
}

/// The mount-time asset load. Resolves to a [`LoadReport`]; an aborted load reports
/// `aborted: true`.
#[must_use = "the asset load does nothing unless polled"]
pub struct AssetLoad {
    inner: Abortable<LocalBoxFuture<'static, LoadReport>>,
}

impl Future for AssetLoad {
    type Output = LoadReport;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.inner).poll(cx) {
            Poll::Ready(Ok(report)) => Poll::Ready(report),
            Poll::Ready(Err(_aborted)) => Poll::Ready(LoadReport::aborted()),
            Poll::Pending => Poll::Pending,
        }
    }
}

pub struct BodyMap {
    config: BodyMapConfig,
    conditions: ConditionIndex,
    interaction: Interaction,
    assets: LoadedAssets,
    silhouette: Option<String>,
    deliveries: Option<UnboundedReceiver<LoadEvent>>,
    load_handle: AbortHandle,
}

impl std::fmt::Debug for BodyMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyMap")
            .field("conditions", &self.conditions)
            .field("interaction", &self.interaction)
            .field("loaded_assets", &self.assets.len())
            .field("silhouette_loaded", &self.silhouette.is_some())
            .field("loading", &self.deliveries.is_some())
            .finish()
    }
}

impl BodyMap {
    /// Mounts a body map and returns it together with its asset load.
    ///
    /// The map is usable immediately; drive the returned future on any executor to fill in the
    /// illustrations.
    pub fn mount<S>(config: BodyMapConfig, props: BodyMapProps, source: S) -> (Self, AssetLoad)
    where
        S: AssetSource + 'static,
    {
        let (tx, rx) = mpsc::unbounded();
        let route = config.asset_route();
        let silhouette = config.silhouette().to_string();
        let load = async move { load_assets(&source, &route, &silhouette, &tx).await }.boxed_local();
        let (load_handle, registration) = AbortHandle::new_pair();

        let mut interaction = Interaction::new(props.read_only);
        interaction.set_on_select(props.on_select);

        tracing::debug!(
            conditions = props.conditions.len(),
            read_only = props.read_only,
            "body map mounted"
        );

        let map = Self {
            config,
            conditions: ConditionIndex::new(props.conditions),
            interaction,
            assets: LoadedAssets::new(),
            silhouette: None,
            deliveries: Some(rx),
            load_handle,
        };
        let load = AssetLoad {
            inner: Abortable::new(load, registration),
        };
        (map, load)
    }

    /// Tears the component down, cancelling any in-flight load.
    pub fn unmount(self) {
        drop(self);
    }

    /// Applies every asset delivered since the last call. Returns how many arrived.
    pub fn poll_assets(&mut self) -> usize {
        let mut applied = 0usize;
        loop {
            let Some(rx) = self.deliveries.as_mut() else {
                break;
            };
            let next = rx.next().now_or_never();
            match next {
                Some(Some(event)) => {
                    self.apply(event);
                    applied += 1;
                }
                Some(None) => {
                    // Sender dropped: the load finished (or was aborted).
                    self.deliveries = None;
                }
                None => break,
            }
        }
        applied
    }

    fn apply(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Silhouette(fragment) => self.silhouette = Some(fragment),
            LoadEvent::Overlay(asset) => self.assets.insert(asset),
        }
    }

    /// True until the load has finished and every delivery has been applied.
    pub fn is_loading(&self) -> bool {
        self.deliveries.is_some()
    }

    pub fn loaded_assets(&self) -> &LoadedAssets {
        &self.assets
    }

    pub fn has_silhouette(&self) -> bool {
        self.silhouette.is_some()
    }

    pub fn config(&self) -> &BodyMapConfig {
        &self.config
    }

    pub fn conditions(&self) -> &ConditionIndex {
        &self.conditions
    }

    /// Replaces the condition list. Assets are not reloaded.
    pub fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.conditions = ConditionIndex::new(conditions);
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.interaction.set_read_only(read_only);
    }

    pub fn is_read_only(&self) -> bool {
        self.interaction.is_read_only()
    }

    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn pointer_enter(&mut self, part: BodyPart) -> InteractionOutcome {
        self.interaction.pointer_enter(part)
    }

    pub fn pointer_leave(&mut self) -> InteractionOutcome {
        self.interaction.pointer_leave()
    }

    pub fn click(&mut self, part: BodyPart) -> InteractionOutcome {
        self.interaction.click(part)
    }

    pub fn view(&self) -> BodyMapView<'_> {
        BodyMapView {
            config: &self.config,
            conditions: &self.conditions,
            assets: &self.assets,
            silhouette: self.silhouette.as_deref(),
            state: self.interaction.state(),
            read_only: self.interaction.is_read_only(),
        }
    }

    pub fn hover_label(&self) -> Option<String> {
        self.view().hover_label()
    }

    pub fn detail(&self) -> Option<Detail> {
        let view = self.view();
        let part = view.state.selected?;
        let (label, description) = view.detail()?;
        Some(Detail {
            part,
            label,
            description: description.to_string(),
        })
    }

    /// Applies pending asset deliveries, then renders.
    pub fn render_svg(&mut self, options: &SvgRenderOptions) -> String {
        self.poll_assets();
        render_body_map_svg(&self.view(), options)
    }
}

impl Drop for BodyMap {
    fn drop(&mut self) {
        self.load_handle.abort();
        if self.deliveries.is_some() {
            tracing::debug!("body map unmounted while assets were loading");
        }
    }
}
