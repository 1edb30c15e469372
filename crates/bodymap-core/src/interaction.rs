//! Hover / selection state machine.
//!
//! Hover and selection are tracked independently: leaving a part clears the hover but keeps the
//! selection. In read-only mode every handler is a no-op. When an `on_select` callback is
//! installed, clicks are delegated to it and local selection never changes.

use crate::BodyPart;

pub type SelectCallback = Box<dyn FnMut(BodyPart)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: Option<BodyPart>,
    pub selected: Option<BodyPart>,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.hovered.is_none() && self.selected.is_none()
    }
}

/// What a pointer event did, so hosts know whether a re-render is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Ignored,
    HoverChanged,
    SelectionChanged,
    Delegated(BodyPart),
}

impl InteractionOutcome {
    /// True when local state changed. Delegated clicks leave it untouched.
    pub fn needs_render(self) -> bool {
        matches!(self, Self::HoverChanged | Self::SelectionChanged)
    }
}

pub struct Interaction {
    state: InteractionState,
    read_only: bool,
    on_select: Option<SelectCallback>,
}

impl std::fmt::Debug for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interaction")
            .field("state", &self.state)
            .field("read_only", &self.read_only)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Interaction {
    pub fn new(read_only: bool) -> Self {
        Self {
            state: InteractionState::default(),
            read_only,
            on_select: None,
        }
    }

    /// Switches clicks to delegation mode.
    pub fn with_on_select(mut self, on_select: impl FnMut(BodyPart) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    pub fn set_on_select(&mut self, on_select: Option<SelectCallback>) {
        self.on_select = on_select;
    }

    /// Entering read-only mode drops the transient hover; the selection is kept.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.state.hovered = None;
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_delegating(&self) -> bool {
        self.on_select.is_some()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn hovered(&self) -> Option<BodyPart> {
        self.state.hovered
    }

    pub fn selected(&self) -> Option<BodyPart> {
        self.state.selected
    }

    pub fn pointer_enter(&mut self, part: BodyPart) -> InteractionOutcome {
        if self.read_only || self.state.hovered == Some(part) {
            return InteractionOutcome::Ignored;
        }
        self.state.hovered = Some(part);
        InteractionOutcome::HoverChanged
    }

    pub fn pointer_leave(&mut self) -> InteractionOutcome {
        if self.read_only || self.state.hovered.is_none() {
            return InteractionOutcome::Ignored;
        }
        self.state.hovered = None;
        InteractionOutcome::HoverChanged
    }

    pub fn click(&mut self, part: BodyPart) -> InteractionOutcome {
        if self.read_only {
            return InteractionOutcome::Ignored;
        }
        if let Some(on_select) = self.on_select.as_mut() {
            tracing::debug!(part = part.as_str(), "delegating body part selection");
            on_select(part);
            return InteractionOutcome::Delegated(part);
        }

        self.state.selected = if self.state.selected == Some(part) {
            None
        } else {
            Some(part)
        };
        InteractionOutcome::SelectionChanged
    }
}
