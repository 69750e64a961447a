//! Button widget.

use std::sync::mpsc::Receiver;

use crate::{
    Context,
    core::{signal::Signal, text},
    error::Result,
    geom::Line,
    geometry::SizeRequest,
    keymap,
    render::Render,
    state::NodeName,
    widget::{DrawContext, EventOutcome, Widget},
};

/// Action that presses the button.
const ACTIVATE: &str = "activate";

/// A focusable push button drawn as `[label]`.
#[derive(Debug, Default)]
pub struct Button {
    /// Button label.
    label: String,
    /// Fired on each press.
    activated: Signal<()>,
}

impl Button {
    /// Construct a button with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            activated: Signal::new(),
        }
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the button label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Subscribe to presses.
    pub fn subscribe(&mut self) -> Receiver<()> {
        self.activated.subscribe()
    }

    /// Press the button.
    pub fn activate(&mut self) {
        tracing::debug!(label = %self.label, "button activated");
        self.activated.emit(());
    }
}

impl Widget for Button {
    fn wish(&self) -> SizeRequest {
        SizeRequest::fixed(text::str_width(&self.label, text::DEFAULT_TAB_STOP) + 2, 1)
    }

    fn render(&mut self, r: &mut Render, ctx: &DrawContext) -> Result<()> {
        let style = if ctx.focused { "button/focus" } else { "button" };
        r.text(style, Line::new(0, 0, ctx.size.w), &format!("[{}]", self.label))
    }

    fn on_action(&mut self, action: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        if action != ACTIVATE {
            return Ok(EventOutcome::Ignore);
        }
        self.activate();
        Ok(EventOutcome::Handle)
    }

    fn accept_focus(&self) -> bool {
        true
    }

    fn contexts(&self) -> &'static [&'static str] {
        &[keymap::BUTTON]
    }

    fn name(&self) -> NodeName {
        NodeName::convert("button")
    }
}
