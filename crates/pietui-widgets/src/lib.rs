#![forbid(unsafe_code)]

//! Widgets for pietui.
//!
//! A `Widget` is a renderable component with a static [`Descriptor`]
//! telling the host layout how to size it and which input it accepts.
//! Drawing is fallible: a widget may be handed an area its surface cannot
//! be allocated for, and drawing primitives can reject bad parameters.

pub mod pie;

pub use pie::{DEFAULT_COLORS, Pie, PieOptions, Slice};

use pietui_core::event::{KeyEvent, MouseEvent};
use pietui_core::geometry::{Rect, Size};
use pietui_render::braille::SurfaceError;
use pietui_render::buffer::Buffer;

/// A renderable component.
pub trait Widget {
    /// Draw one frame into the buffer at the given cell area.
    ///
    /// A failed draw must not leave a partial frame in `buf`.
    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<(), WidgetError>;

    /// Handle a keyboard event.
    fn on_key(&self, event: KeyEvent) -> Result<(), WidgetError>;

    /// Handle a mouse event.
    fn on_mouse(&self, event: MouseEvent) -> Result<(), WidgetError>;

    /// Static description of this widget for the host layout.
    fn descriptor(&self) -> Descriptor;
}

/// Static widget metadata reported to the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Preferred cell aspect ratio as (rows, cols) of the sub-cell grid,
    /// so the host can keep drawn shapes circular.
    pub aspect_ratio: (u16, u16),
    /// Smallest cell area the widget can render into.
    pub minimum_size: Size,
    /// Whether the widget wants keyboard focus.
    pub wants_keyboard: bool,
    /// Whether the widget wants mouse events.
    pub wants_mouse: bool,
}

/// Validation failures for widget input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// The magnitude list was empty.
    EmptyValues,
    /// A magnitude was negative.
    NegativeValue {
        /// Position of the offending magnitude.
        index: usize,
        /// The offending magnitude.
        value: i64,
    },
    /// The color palette override was empty.
    EmptyPalette,
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValues => write!(f, "values cannot be empty"),
            Self::NegativeValue { index, value } => {
                write!(f, "all values must be non-negative, got {value} at index {index}")
            }
            Self::EmptyPalette => write!(f, "color palette cannot be empty"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Errors raised by widget operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetError {
    /// Input data failed validation; prior state is untouched.
    InvalidInput(InvalidInput),
    /// The drawing surface could not be allocated for the given area.
    Allocation(SurfaceError),
    /// A drawing primitive failed mid-slice; no frame was committed.
    Draw {
        /// Index of the slice that failed.
        slice: usize,
        /// The underlying primitive error.
        source: SurfaceError,
    },
    /// The widget does not handle this kind of event.
    UnsupportedEvent(&'static str),
}

impl From<InvalidInput> for WidgetError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err)
    }
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Allocation(err) => write!(f, "surface allocation failed: {err}"),
            Self::Draw { slice, source } => {
                write!(f, "failed to draw pie slice {slice}: {source}")
            }
            Self::UnsupportedEvent(kind) => {
                write!(f, "the widget doesn't support {kind} events")
            }
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Allocation(err) => Some(err),
            Self::Draw { source, .. } => Some(source),
            Self::UnsupportedEvent(_) => None,
        }
    }
}
