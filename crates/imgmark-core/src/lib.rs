//! imgmark Core Library
//!
//! Window-independent drawing engine for the imgmark image annotator: the
//! three-buffer canvas, the per-tool pointer state machines and the
//! controller that ties them to a window's event stream.

pub mod canvas;
pub mod codec;
pub mod controller;
pub mod input;
pub mod raster;
pub mod session;
pub mod shapes;
pub mod tools;

pub use canvas::{Canvas, LoadError, SaveError};
pub use codec::{CodecError, FileCodec, ImageCodec, MemoryCodec};
pub use controller::{ControllerError, SessionController, SessionOutcome};
pub use input::{KeyEvent, PixelPoint, PointerEvent, Surface};
pub use session::{SessionStatus, ShapeSession};
pub use shapes::{Shape, ShapeStyle, StrokeColor};
pub use tools::ToolKind;
