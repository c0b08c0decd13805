#![forbid(unsafe_code)]

//! Pie chart widget.
//!
//! Partitions a full revolution into angular slices proportional to a
//! list of non-negative magnitudes and rasterizes each slice as a filled
//! annular wedge: one arc per integer radius between the inner and outer
//! radius, drawn on a braille [`Surface`].
//!
//! Two rasterization styles exist in the wild for this kind of chart:
//! concentric arc bands and radial strokes at a fixed angular step. This
//! widget deliberately uses arc bands only, since they stay contiguous at
//! every radius without tuning a stroke step.
//!
//! Values are replaced wholesale with [`Pie::set_values`]; a failed
//! validation leaves the previous state untouched. Updates and draws are
//! mutually exclusive: both hold the state mutex for their full duration,
//! so a draw never observes a half-updated value set.

use crate::{Descriptor, InvalidInput, Widget, WidgetError};
use pietui_core::event::{KeyEvent, MouseEvent};
use pietui_core::geometry::{Point, Rect, Size};
use pietui_render::braille::{COLS_PER_CELL, ROWS_PER_CELL, Surface, SurfaceError};
use pietui_render::buffer::Buffer;
use pietui_render::cell::PackedRgba;
use std::sync::{Mutex, PoisonError};

/// Default slice palette, assigned to slices in round-robin order.
pub const DEFAULT_COLORS: [PackedRgba; 7] = [
    PackedRgba::RED,
    PackedRgba::GREEN,
    PackedRgba::BLUE,
    PackedRgba::YELLOW,
    PackedRgba::MAGENTA,
    PackedRgba::CYAN,
    PackedRgba::WHITE,
];

/// Smallest cell area the pie renders into.
const MINIMUM_SIZE: Size = Size::new(5, 5);

/// Dots kept free between the outer radius and the surface edge.
const RADIUS_MARGIN: i32 = 2;

/// Inner radius as a fraction of the outer radius.
const INNER_RADIUS_RATIO: f64 = 0.6;

const FULL_TURN_DEG: f64 = 360.0;

/// Configuration for a [`Pie`].
#[derive(Debug, Clone)]
pub struct PieOptions {
    colors: Vec<PackedRgba>,
}

impl PieOptions {
    /// Create options with the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }

    /// Override the slice palette.
    ///
    /// Colors are assigned to slices by index modulo palette length, so
    /// the palette may be shorter than the value list.
    #[must_use]
    pub fn colors(mut self, colors: Vec<PackedRgba>) -> Self {
        self.colors = colors;
        self
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.colors.is_empty() {
            return Err(InvalidInput::EmptyPalette);
        }
        Ok(())
    }
}

impl Default for PieOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// One angular wedge of the pie. Ephemeral: recomputed on every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Start of the angular range, degrees.
    pub start_deg: f64,
    /// End of the angular range, degrees.
    pub end_deg: f64,
    /// Color assigned from the palette.
    pub color: PackedRgba,
}

/// Current chart data. Invariant: `total == values.iter().sum()` and
/// `colors` is non-empty, on every exit path of every critical section.
#[derive(Debug)]
struct PieState {
    values: Vec<i64>,
    total: i64,
    colors: Vec<PackedRgba>,
}

/// The pie chart widget.
///
/// Shared between an updater and a draw loop; all methods take `&self`.
#[derive(Debug)]
pub struct Pie {
    state: Mutex<PieState>,
}

impl Pie {
    /// Create a new pie with no values.
    ///
    /// Drawing before [`Pie::set_values`] succeeds and renders nothing.
    /// An empty palette in `options` falls back to [`DEFAULT_COLORS`].
    #[must_use]
    pub fn new(options: PieOptions) -> Self {
        let colors = if options.colors.is_empty() {
            DEFAULT_COLORS.to_vec()
        } else {
            options.colors
        };
        Self {
            state: Mutex::new(PieState {
                values: Vec::new(),
                total: 0,
                colors,
            }),
        }
    }

    /// Replace the chart values, keeping the current palette.
    ///
    /// Fails with [`InvalidInput::EmptyValues`] for an empty list and
    /// [`InvalidInput::NegativeValue`] for any negative magnitude. On
    /// failure the previous state is left untouched.
    pub fn set_values(&self, values: &[i64]) -> Result<(), WidgetError> {
        self.update(values, None)
    }

    /// Replace the chart values and the palette in one atomic update.
    pub fn set_values_with(&self, values: &[i64], options: PieOptions) -> Result<(), WidgetError> {
        self.update(values, Some(options))
    }

    fn update(&self, values: &[i64], options: Option<PieOptions>) -> Result<(), WidgetError> {
        let mut state = self.lock();

        if values.is_empty() {
            return Err(InvalidInput::EmptyValues.into());
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(InvalidInput::NegativeValue { index, value }.into());
        }
        if let Some(options) = &options {
            options.validate()?;
        }

        // All validation passed; replace wholesale.
        state.values = values.to_vec();
        state.total = values.iter().sum();
        if let Some(options) = options {
            state.colors = options.colors;
        }
        Ok(())
    }

    /// Sum of the current values.
    pub fn total(&self) -> i64 {
        self.lock().total
    }

    /// Snapshot of the current values.
    pub fn values(&self) -> Vec<i64> {
        self.lock().values.clone()
    }

    /// Compute the current slice partition.
    ///
    /// Returns an empty list when no data is set (`total <= 0`). Spans
    /// are proportional to each value's share of the total; boundaries
    /// are cumulative and the last slice ends at exactly 360°.
    pub fn slices(&self) -> Vec<Slice> {
        let state = self.lock();
        if state.total <= 0 {
            return Vec::new();
        }
        partition(&state.values, state.total, &state.colors)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PieState> {
        // Both critical sections uphold the state invariant on every exit
        // path, so a poisoned lock is safe to adopt.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Widget for Pie {
    /// Draw one frame.
    ///
    /// With no data set this is a successful no-op. An area below the
    /// minimum size fails with [`WidgetError::Allocation`] before any
    /// drawing occurs. The finished surface is committed to `buf` in a
    /// single step only after every slice drew successfully.
    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<(), WidgetError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_draw",
            widget = "Pie",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let state = self.lock();
        if state.total <= 0 {
            return Ok(());
        }

        if area.width < MINIMUM_SIZE.width || area.height < MINIMUM_SIZE.height {
            return Err(WidgetError::Allocation(SurfaceError::TooSmall {
                width: area.width,
                height: area.height,
            }));
        }
        let mut surface = Surface::new(area).map_err(WidgetError::Allocation)?;
        let geometry = resolve_geometry(area);

        for (i, slice) in partition(&state.values, state.total, &state.colors)
            .iter()
            .enumerate()
        {
            // Zero magnitudes occupy no arc.
            if slice.end_deg <= slice.start_deg {
                continue;
            }
            for radius in geometry.inner..=geometry.outer {
                surface
                    .arc(
                        geometry.center,
                        radius,
                        slice.start_deg,
                        slice.end_deg,
                        slice.color,
                    )
                    .map_err(|source| WidgetError::Draw { slice: i, source })?;
            }
        }

        surface.commit(buf);
        Ok(())
    }

    fn on_key(&self, _event: KeyEvent) -> Result<(), WidgetError> {
        Err(WidgetError::UnsupportedEvent("keyboard"))
    }

    fn on_mouse(&self, _event: MouseEvent) -> Result<(), WidgetError> {
        Err(WidgetError::UnsupportedEvent("mouse"))
    }

    fn descriptor(&self) -> Descriptor {
        Descriptor {
            aspect_ratio: (ROWS_PER_CELL, COLS_PER_CELL),
            minimum_size: MINIMUM_SIZE,
            wants_keyboard: false,
            wants_mouse: false,
        }
    }
}

/// Center point and radii derived from a cell area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Geometry {
    center: Point,
    outer: i32,
    inner: i32,
}

/// Map a cell area to the pie's center and radii in surface-local dots.
///
/// The outer radius is half the dot width minus a fixed margin, floored
/// at 1 so degenerate areas still yield a drawable radius. The inner
/// radius is 0.6 of the outer, likewise floored at 1.
fn resolve_geometry(area: Rect) -> Geometry {
    let width = area.width as i32 * COLS_PER_CELL as i32;
    let height = area.height as i32 * ROWS_PER_CELL as i32;

    let outer = (width / 2 - RADIUS_MARGIN).max(1);
    let inner = ((outer as f64 * INNER_RADIUS_RATIO) as i32).max(1);

    Geometry {
        center: Point::new(width / 2, height / 2),
        outer,
        inner,
    }
}

/// Partition a full revolution into slices proportional to `values`.
///
/// Boundaries are cumulative and monotonically non-decreasing. The last
/// boundary is pinned to exactly 360° to absorb floating-point drift.
/// Colors cycle through the palette by index.
fn partition(values: &[i64], total: i64, palette: &[PackedRgba]) -> Vec<Slice> {
    debug_assert!(total > 0, "partition requires a positive total");
    debug_assert!(!palette.is_empty(), "partition requires a palette");

    let mut slices = Vec::with_capacity(values.len());
    let mut current = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let end = if i == values.len() - 1 {
            FULL_TURN_DEG
        } else {
            current + value as f64 / total as f64 * FULL_TURN_DEG
        };
        slices.push(Slice {
            start_deg: current,
            end_deg: end,
            color: palette[i % palette.len()],
        });
        current = end;
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pie_with(values: &[i64], colors: &[PackedRgba]) -> Pie {
        let pie = Pie::new(PieOptions::new());
        pie.set_values_with(values, PieOptions::new().colors(colors.to_vec()))
            .unwrap();
        pie
    }

    #[test]
    fn set_values_recomputes_total() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[10, 20]).unwrap();
        assert_eq!(pie.total(), 30);
        assert_eq!(pie.values(), vec![10, 20]);

        pie.set_values(&[1, 2, 3]).unwrap();
        assert_eq!(pie.total(), 6);
    }

    #[test]
    fn empty_values_rejected_state_untouched() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[5]).unwrap();

        let err = pie.set_values(&[]).unwrap_err();
        assert_eq!(err, WidgetError::InvalidInput(InvalidInput::EmptyValues));
        assert_eq!(pie.values(), vec![5]);
        assert_eq!(pie.total(), 5);
    }

    #[test]
    fn negative_value_rejected_state_untouched() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[5]).unwrap();

        let err = pie.set_values(&[10, -5]).unwrap_err();
        assert_eq!(
            err,
            WidgetError::InvalidInput(InvalidInput::NegativeValue { index: 1, value: -5 })
        );
        assert_eq!(pie.values(), vec![5]);
        assert_eq!(pie.total(), 5);
    }

    #[test]
    fn empty_palette_override_rejected_state_untouched() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[5]).unwrap();

        let err = pie
            .set_values_with(&[1, 2], PieOptions::new().colors(Vec::new()))
            .unwrap_err();
        assert_eq!(err, WidgetError::InvalidInput(InvalidInput::EmptyPalette));
        assert_eq!(pie.values(), vec![5]);
    }

    #[test]
    fn empty_palette_at_construction_falls_back_to_default() {
        let pie = Pie::new(PieOptions::new().colors(Vec::new()));
        pie.set_values(&[1, 1]).unwrap();
        let slices = pie.slices();
        assert_eq!(slices[0].color, DEFAULT_COLORS[0]);
        assert_eq!(slices[1].color, DEFAULT_COLORS[1]);
    }

    #[test]
    fn two_value_partition() {
        let pie = pie_with(&[10, 20], &[PackedRgba::RED, PackedRgba::BLUE]);
        let slices = pie.slices();
        assert_eq!(slices.len(), 2);

        assert_eq!(slices[0].start_deg, 0.0);
        assert!((slices[0].end_deg - 120.0).abs() < 1e-9);
        assert_eq!(slices[0].color, PackedRgba::RED);

        assert!((slices[1].start_deg - 120.0).abs() < 1e-9);
        assert_eq!(slices[1].end_deg, 360.0);
        assert_eq!(slices[1].color, PackedRgba::BLUE);
    }

    #[test]
    fn equal_values_split_evenly() {
        let pie = pie_with(&[1, 1], &[PackedRgba::GREEN, PackedRgba::RED]);
        let slices = pie.slices();
        assert!((slices[0].end_deg - 180.0).abs() < 1e-9);
        assert_eq!(slices[0].color, PackedRgba::GREEN);
        assert_eq!(slices[1].end_deg - slices[1].start_deg, 180.0);
        assert_eq!(slices[1].color, PackedRgba::RED);
    }

    #[test]
    fn single_color_palette_cycles() {
        let pie = pie_with(&[10, 20, 30], &[PackedRgba::BLUE]);
        for slice in pie.slices() {
            assert_eq!(slice.color, PackedRgba::BLUE);
        }
    }

    #[test]
    fn palette_cycles_past_its_length() {
        let values = [1i64; 9];
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&values).unwrap();
        let slices = pie.slices();
        assert_eq!(slices[7].color, DEFAULT_COLORS[0]);
        assert_eq!(slices[8].color, DEFAULT_COLORS[1]);
    }

    #[test]
    fn slices_empty_without_data() {
        let pie = Pie::new(PieOptions::new());
        assert!(pie.slices().is_empty());

        pie.set_values(&[0, 0]).unwrap();
        assert_eq!(pie.total(), 0);
        assert!(pie.slices().is_empty());
    }

    #[test]
    fn zero_value_slice_has_empty_span() {
        let pie = pie_with(&[0, 10], &[PackedRgba::RED, PackedRgba::BLUE]);
        let slices = pie.slices();
        assert_eq!(slices[0].start_deg, slices[0].end_deg);
        assert_eq!(slices[1].start_deg, 0.0);
        assert_eq!(slices[1].end_deg, 360.0);
    }

    #[test]
    fn geometry_follows_area() {
        let g = resolve_geometry(Rect::from_size(10, 5));
        // 20 dots wide: outer = 20/2 - 2 = 8, inner = 4 (floor of 4.8).
        assert_eq!(g.outer, 8);
        assert_eq!(g.inner, 4);
        assert_eq!(g.center, Point::new(10, 10));
        assert!(g.inner <= g.outer);
    }

    #[test]
    fn geometry_floors_degenerate_radii() {
        let g = resolve_geometry(Rect::from_size(1, 1));
        assert_eq!(g.outer, 1);
        assert_eq!(g.inner, 1);

        let g = resolve_geometry(Rect::from_size(3, 3));
        // 6 dots wide: outer = 1, inner floors to 1.
        assert_eq!(g.outer, 1);
        assert_eq!(g.inner, 1);
    }

    #[test]
    fn draw_without_data_is_a_noop() {
        let pie = Pie::new(PieOptions::new());
        let mut buf = Buffer::new(10, 10);
        pie.draw(Rect::from_size(10, 10), &mut buf).unwrap();
        assert_eq!(buf.non_blank_count(), 0);
    }

    #[test]
    fn draw_below_minimum_size_fails_allocation() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[1, 2]).unwrap();
        let mut buf = Buffer::new(10, 10);

        let err = pie.draw(Rect::from_size(1, 1), &mut buf).unwrap_err();
        assert_eq!(
            err,
            WidgetError::Allocation(SurfaceError::TooSmall { width: 1, height: 1 })
        );
        assert_eq!(buf.non_blank_count(), 0, "no drawing calls were issued");

        let err = pie.draw(Rect::from_size(20, 4), &mut buf).unwrap_err();
        assert!(matches!(err, WidgetError::Allocation(_)));
    }

    #[test]
    fn draw_renders_braille_cells() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[10, 20]).unwrap();
        let mut buf = Buffer::new(12, 6);
        pie.draw(Rect::from_size(12, 6), &mut buf).unwrap();
        assert!(buf.non_blank_count() > 0);

        // Every drawn cell is a braille character.
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let cell = buf.get(x, y).copied().unwrap();
                if !cell.is_blank() {
                    let cp = cell.ch as u32;
                    assert!((0x2800..=0x28FF).contains(&cp), "cell ({x},{y}) = {:?}", cell.ch);
                }
            }
        }
    }

    #[test]
    fn draw_is_idempotent() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[3, 1, 4, 1, 5]).unwrap();

        let mut a = Buffer::new(20, 10);
        let mut b = Buffer::new(20, 10);
        pie.draw(Rect::from_size(20, 10), &mut a).unwrap();
        pie.draw(Rect::from_size(20, 10), &mut b).unwrap();

        for y in 0..10 {
            for x in 0..20 {
                assert_eq!(a.get(x, y), b.get(x, y), "cell ({x},{y}) differs");
            }
        }
    }

    #[test]
    fn events_are_declined() {
        use pietui_core::event::{KeyCode, MouseButton, MouseEventKind};
        let pie = Pie::new(PieOptions::new());

        let err = pie.on_key(KeyEvent::new(KeyCode::Enter)).unwrap_err();
        assert_eq!(err, WidgetError::UnsupportedEvent("keyboard"));

        let err = pie
            .on_mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 0, 0))
            .unwrap_err();
        assert_eq!(err, WidgetError::UnsupportedEvent("mouse"));
    }

    #[test]
    fn descriptor_reports_braille_contract() {
        let pie = Pie::new(PieOptions::new());
        let desc = pie.descriptor();
        assert_eq!(desc.aspect_ratio, (ROWS_PER_CELL, COLS_PER_CELL));
        assert_eq!(desc.minimum_size, Size::new(5, 5));
        assert!(!desc.wants_keyboard);
        assert!(!desc.wants_mouse);
    }

    #[test]
    fn widget_usable_after_failed_update_and_draw() {
        let pie = Pie::new(PieOptions::new());
        pie.set_values(&[2, 2]).unwrap();
        assert!(pie.set_values(&[-1]).is_err());

        let mut small = Buffer::new(2, 2);
        assert!(pie.draw(Rect::from_size(2, 2), &mut small).is_err());

        let mut buf = Buffer::new(10, 5);
        pie.draw(Rect::from_size(10, 5), &mut buf).unwrap();
        assert!(buf.non_blank_count() > 0);
    }
}
