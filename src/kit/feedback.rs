use {
    crate::{
        core,
        kit::{ColorButton, ColorButtonRef},
        signal::{ListenerRef, PointerEvent},
        theme::ThemeColor,
    },
    reclutch::display as gfx,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PressState {
    Idle,
    Pressed,
}

/// Highlights a [`ColorButton`](ColorButton) while it is held down.
///
/// On press the button's background override is set to the highlight color; on release the override is
/// cleared. The background the button had when the feedback was attached is remembered but is *not* what
/// a release goes back to; a release always leaves the button with no override at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressFeedback {
    target: ColorButtonRef,
    highlight: gfx::Color,
    original: gfx::Color,
    state: PressState,
}

impl PressFeedback {
    pub fn new(target: ColorButtonRef, highlight: gfx::Color, original: gfx::Color) -> Self {
        PressFeedback {
            target,
            highlight,
            original,
            state: PressState::Idle,
        }
    }

    /// Creates feedback for `widget` using the theme highlight, and registers it as a reaction on `widget`.
    pub fn attach(globals: &core::Globals, widget: &mut ColorButton) -> ListenerRef {
        let original = widget
            .background()
            .unwrap_or_else(|| globals.color(ThemeColor::Background));
        let mut feedback =
            PressFeedback::new(widget.cref(), globals.color(ThemeColor::Highlight), original);

        widget.register_reaction(move |globals, event| feedback.react(globals, event))
    }

    #[inline]
    pub fn state(&self) -> PressState {
        self.state
    }

    /// The background captured when the feedback was created.
    #[inline]
    pub fn original(&self) -> gfx::Color {
        self.original
    }

    /// Advances the state machine. Events other than a press while idle or a release while pressed are ignored.
    pub fn react(&mut self, globals: &mut core::Globals, event: &PointerEvent) {
        let background = match (self.state, event) {
            (PressState::Idle, PointerEvent::Pressed(_)) => {
                self.state = PressState::Pressed;
                Some(self.highlight)
            }
            (PressState::Pressed, PointerEvent::Released(_)) => {
                self.state = PressState::Idle;
                None
            }
            _ => return,
        };

        if !globals.contains(self.target) {
            return;
        }

        tracing::trace!(id = core::CRef::id(&self.target), state = ?self.state, "press feedback");
        globals.get_mut(self.target).set_background(background);
        globals.update(self.target, core::Repaint::Yes, core::Propagate::No);
    }
}
