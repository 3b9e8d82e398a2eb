//! Pointer-event state machine shared by every drawing tool.
//!
//! ```text
//! Idle ──down──▶ Active ──up──▶ AwaitingConfirm ──confirm──▶ Committed
//!                  │ ▲move        │ (down restarts a drag)
//!                  └─┘            │
//! any live state ──cancel──▶ Cancelled
//! ```
//!
//! The line tool has no drag phase: each press adds an end point and the
//! second one moves the session straight to `AwaitingConfirm`.

use crate::canvas::Canvas;
use crate::input::{KeyEvent, PixelPoint, PointerEvent};
use crate::shapes::{Shape, ShapeStyle};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Lifecycle of a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for the first press.
    #[default]
    Idle,
    /// Collecting samples.
    Active,
    /// Shape is complete and waits for confirm or cancel.
    AwaitingConfirm,
    Committed,
    Cancelled,
}

impl SessionStatus {
    /// Committed and Cancelled sessions accept no more events.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Committed | SessionStatus::Cancelled)
    }
}

/// One interaction producing at most one shape.
#[derive(Debug, Clone)]
pub struct ShapeSession {
    tool: ToolKind,
    status: SessionStatus,
    samples: Vec<PixelPoint>,
    style: ShapeStyle,
}

impl ShapeSession {
    /// Create a new idle session for `tool`.
    pub fn new(tool: ToolKind, style: ShapeStyle) -> Self {
        Self {
            tool,
            status: SessionStatus::Idle,
            samples: Vec::with_capacity(tool.sample_count()),
            style,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Samples collected so far.
    pub fn samples(&self) -> &[PixelPoint] {
        &self.samples
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// The shape described by the current samples.
    pub fn shape(&self) -> Option<Shape> {
        self.tool.shape(&self.samples)
    }

    /// Whether a confirm would be accepted right now.
    pub fn can_confirm(&self) -> bool {
        self.status == SessionStatus::AwaitingConfirm && self.tool.is_valid_to_commit(&self.samples)
    }

    /// Feed a pointer event. Returns true when the preview was redrawn.
    pub fn handle_pointer(&mut self, event: PointerEvent, canvas: &mut Canvas) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        match event {
            PointerEvent::Down(point) => self.press(point, canvas),
            PointerEvent::Move(point) if self.is_dragging() => {
                self.tool.update_from_pointer(&mut self.samples, point);
                self.redraw(canvas);
                true
            }
            PointerEvent::Up(point) if self.is_dragging() => {
                self.tool.update_from_pointer(&mut self.samples, point);
                self.redraw(canvas);
                self.set_status(SessionStatus::AwaitingConfirm);
                true
            }
            PointerEvent::Move(_) | PointerEvent::Up(_) => false,
        }
    }

    /// Feed a key event. Returns true when the status changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key {
            KeyEvent::Confirm => {
                if self.can_confirm() {
                    self.set_status(SessionStatus::Committed);
                    true
                } else {
                    log::debug!(
                        "Ignoring confirm for {} session in {:?} ({} samples)",
                        self.tool,
                        self.status,
                        self.samples.len()
                    );
                    false
                }
            }
            KeyEvent::Cancel => {
                if self.status.is_terminal() {
                    return false;
                }
                self.samples.clear();
                self.set_status(SessionStatus::Cancelled);
                true
            }
        }
    }

    fn is_dragging(&self) -> bool {
        self.status == SessionStatus::Active && self.tool.has_drag_phase()
    }

    fn press(&mut self, point: PixelPoint, canvas: &mut Canvas) -> bool {
        if !self.tool.has_drag_phase() && self.tool.is_complete(&self.samples) {
            return false;
        }

        self.tool.press(&mut self.samples, point);
        self.redraw(canvas);

        let next = if !self.tool.has_drag_phase() && self.tool.is_complete(&self.samples) {
            SessionStatus::AwaitingConfirm
        } else {
            SessionStatus::Active
        };
        self.set_status(next);
        true
    }

    fn redraw(&self, canvas: &mut Canvas) {
        canvas.redraw_preview(|buffer| self.tool.rasterize(&self.samples, &self.style, buffer));
    }

    fn set_status(&mut self, status: SessionStatus) {
        if self.status != status {
            log::debug!("{} session: {:?} -> {:?}", self.tool, self.status, status);
            self.status = status;
        }
    }
}
