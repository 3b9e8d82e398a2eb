//! Session controller: owns the canvas and at most one drawing session.

use crate::canvas::{Canvas, SaveError};
use crate::codec::ImageCodec;
use crate::input::{KeyEvent, PointerEvent, Surface};
use crate::session::{SessionStatus, ShapeSession};
use crate::shapes::{Shape, ShapeStyle};
use crate::tools::ToolKind;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Controller errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("A {0} session is already in progress")]
    SessionBusy(ToolKind),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Committed(Shape),
    Cancelled,
}

/// Routes window events into the live session and applies its result to
/// the canvas.
#[derive(Debug, Clone)]
pub struct SessionController {
    canvas: Canvas,
    session: Option<ShapeSession>,
    style: ShapeStyle,
}

impl SessionController {
    /// Create a controller with the default style.
    pub fn new(canvas: Canvas) -> Self {
        Self::with_style(canvas, ShapeStyle::default())
    }

    /// Create a controller whose sessions draw with `style`.
    pub fn with_style(canvas: Canvas, style: ShapeStyle) -> Self {
        Self {
            canvas,
            session: None,
            style,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&ShapeSession> {
        self.session.as_ref()
    }

    /// True when no session is live.
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Start a drawing session with `tool`.
    pub fn begin(&mut self, tool: ToolKind) -> Result<(), ControllerError> {
        if let Some(session) = &self.session {
            log::warn!("Cannot start {} session while {} is live", tool, session.tool());
            return Err(ControllerError::SessionBusy(session.tool()));
        }

        self.canvas.begin_preview();
        self.session = Some(ShapeSession::new(tool, self.style));
        log::info!("Started {} session", tool);
        Ok(())
    }

    /// Forward a pointer event. Returns true when the preview changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match self.session.as_mut() {
            Some(session) => session.handle_pointer(event, &mut self.canvas),
            None => {
                log::debug!("Ignoring pointer at {}: no live session", event.position());
                false
            }
        }
    }

    /// Forward a key event. Returns the outcome if the session ended.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SessionOutcome> {
        let session = self.session.as_mut()?;
        if !session.handle_key(key) {
            return None;
        }
        self.retire_finished()
    }

    /// Cancel the live session, if any.
    pub fn cancel(&mut self) -> Option<SessionOutcome> {
        self.handle_key(KeyEvent::Cancel)
    }

    /// Drop every commit and return to the loaded image.
    pub fn reset(&mut self) {
        self.cancel();
        self.canvas.reset();
        log::info!("Image reset to original");
    }

    /// Save the committed drawing to the filesystem.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.canvas.save(path)
    }

    /// Save the committed drawing through `codec`.
    pub fn save_with(&self, codec: &dyn ImageCodec, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.canvas.save_with(codec, path)
    }

    /// The buffer a window should show: the preview while a session is
    /// live, the committed drawing otherwise.
    pub fn display_buffer(&self) -> &RgbaImage {
        if self.session.is_some() {
            self.canvas.preview()
        } else {
            self.canvas.committed()
        }
    }

    /// Hand the display buffer to `surface`.
    pub fn present(&self, surface: &mut dyn Surface) {
        surface.present(self.display_buffer());
    }

    fn retire_finished(&mut self) -> Option<SessionOutcome> {
        let status = self.session.as_ref()?.status();
        if !status.is_terminal() {
            return None;
        }
        let session = self.session.take()?;

        let outcome = match (status, session.shape()) {
            (SessionStatus::Committed, Some(shape)) => {
                self.canvas.commit();
                log::info!("{}", shape);
                SessionOutcome::Committed(shape)
            }
            _ => {
                self.canvas.discard();
                log::info!("{} operation cancelled", session.tool());
                SessionOutcome::Cancelled
            }
        };
        Some(outcome)
    }
}
