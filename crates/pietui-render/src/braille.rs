#![forbid(unsafe_code)]

//! Braille sub-cell drawing surface.
//!
//! Each terminal cell addresses a 2×4 grid of dots via Unicode Braille
//! patterns (U+2800..U+28FF), giving quasi-pixel resolution inside text
//! cells. A [`Surface`] accumulates colored dots in surface-local dot
//! coordinates, then [`Surface::commit`] packs them into braille
//! characters and writes them to a [`Buffer`] at the surface's cell area.
//!
//! Angles are in degrees: 0° at the positive x-axis, increasing
//! counter-clockwise. The y-axis is flipped for screen space (dot y grows
//! downward).

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba};
use pietui_core::geometry::{Point, Rect};

/// Dot columns per terminal cell.
pub const COLS_PER_CELL: u16 = 2;
/// Dot rows per terminal cell.
pub const ROWS_PER_CELL: u16 = 4;

/// Braille dot numbering to bit mapping, indexed `[col][row]`:
/// dot 1 (0,0) = bit 0, dot 4 (1,0) = bit 3, ... dot 7 (0,3) = bit 6,
/// dot 8 (1,3) = bit 7.
const DOT_BITS: [[u8; 4]; 2] = [
    [0, 1, 2, 6], // column 0: dots 1,2,3,7
    [3, 4, 5, 7], // column 1: dots 4,5,6,8
];

/// Errors raised by surface allocation or drawing primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceError {
    /// The cell area cannot host even a one-dot grid.
    TooSmall {
        /// Requested area width in cells.
        width: u16,
        /// Requested area height in cells.
        height: u16,
    },
    /// An arc was requested with a radius below 1 dot.
    BadRadius {
        /// The offending radius.
        radius: i32,
    },
    /// An arc was requested with a start angle past its end angle.
    BadAngles {
        /// Start of the angular range, degrees.
        start_deg: f64,
        /// End of the angular range, degrees.
        end_deg: f64,
    },
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall { width, height } => {
                write!(f, "area {width}x{height} is too small for a braille surface")
            }
            Self::BadRadius { radius } => write!(f, "arc radius must be >= 1, got {radius}"),
            Self::BadAngles { start_deg, end_deg } => {
                write!(f, "arc start angle {start_deg}° is past end angle {end_deg}°")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A sub-cell drawing surface backed by a braille dot grid.
///
/// Dots are addressed in surface-local coordinates, (0, 0) at the
/// top-left dot of the surface's cell area. Out-of-range dots are
/// silently clipped, the same way [`Buffer::set`] clips cells.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Target cell area in buffer coordinates.
    area: Rect,
    /// Width in dots.
    width: u16,
    /// Height in dots.
    height: u16,
    /// Dot grid, row-major; a set dot always carries its color.
    dots: Vec<Option<PackedRgba>>,
}

impl Surface {
    /// Allocate a surface covering `area`.
    ///
    /// Fails with [`SurfaceError::TooSmall`] when the area has zero width
    /// or height.
    pub fn new(area: Rect) -> Result<Self, SurfaceError> {
        if area.is_empty() {
            return Err(SurfaceError::TooSmall {
                width: area.width,
                height: area.height,
            });
        }
        let width = area.width * COLS_PER_CELL;
        let height = area.height * ROWS_PER_CELL;
        Ok(Self {
            area,
            width,
            height,
            dots: vec![None; width as usize * height as usize],
        })
    }

    /// Surface dimensions in dots.
    #[inline]
    pub const fn dot_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// The cell area this surface commits to.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Set a single dot. Out-of-range dots are clipped.
    pub fn point(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(idx) = self.index(x, y) {
            self.dots[idx] = Some(color);
        }
    }

    /// Get the color of a dot, if set.
    pub fn get(&self, x: i32, y: i32) -> Option<PackedRgba> {
        self.index(x, y).and_then(|i| self.dots[i])
    }

    /// Draw a circular arc.
    ///
    /// The arc is centered at `center` (dot coordinates) with the given
    /// radius in dots, spanning `start_deg..=end_deg`. Sampling is dense
    /// enough (at most half a dot of arc length per step) that coverage
    /// is contiguous at any radius.
    pub fn arc(
        &mut self,
        center: Point,
        radius: i32,
        start_deg: f64,
        end_deg: f64,
        color: PackedRgba,
    ) -> Result<(), SurfaceError> {
        if radius < 1 {
            return Err(SurfaceError::BadRadius { radius });
        }
        if start_deg > end_deg {
            return Err(SurfaceError::BadAngles { start_deg, end_deg });
        }

        // Half a dot of arc length per sample: step = 0.5/r radians.
        let step_deg = (0.5 / radius as f64).to_degrees();
        let mut angle = start_deg;
        while angle < end_deg {
            self.plot_polar(center, radius, angle, color);
            angle += step_deg;
        }
        // Close the range so the last sample lands exactly on end_deg.
        self.plot_polar(center, radius, end_deg, color);
        Ok(())
    }

    fn plot_polar(&mut self, center: Point, radius: i32, angle_deg: f64, color: PackedRgba) {
        let rad = angle_deg.to_radians();
        let x = center.x + (radius as f64 * rad.cos()).round() as i32;
        // Screen y grows downward, so positive angles go up.
        let y = center.y - (radius as f64 * rad.sin()).round() as i32;
        self.point(x, y, color);
    }

    /// Pack the dot grid into braille characters and write them into
    /// `buf` at the surface's cell area.
    ///
    /// Cells with no set dots are skipped, leaving the destination cell
    /// untouched. When a cell holds dots of several colors, the first set
    /// dot in scan order wins.
    pub fn commit(&self, buf: &mut Buffer) {
        for cy in 0..self.area.height {
            for cx in 0..self.area.width {
                let (bits, color) = self.pack_cell(
                    (cx * COLS_PER_CELL) as i32,
                    (cy * ROWS_PER_CELL) as i32,
                );
                if bits == 0 {
                    continue;
                }
                // Braille patterns start at U+2800; all 256 are valid.
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                let cell = Cell::from_char(ch).with_fg(color.unwrap_or(PackedRgba::WHITE));
                buf.set(
                    self.area.x.saturating_add(cx),
                    self.area.y.saturating_add(cy),
                    cell,
                );
            }
        }
    }

    /// Compute the braille bits and color for the 2×4 dot block at
    /// (`px_x`, `px_y`).
    fn pack_cell(&self, px_x: i32, px_y: i32) -> (u8, Option<PackedRgba>) {
        let mut bits: u8 = 0;
        let mut first_color: Option<PackedRgba> = None;

        for col in 0..2 {
            for row in 0..4 {
                if let Some(c) = self.get(px_x + col, px_y + row) {
                    bits |= 1 << DOT_BITS[col as usize][row as usize];
                    if first_color.is_none() {
                        first_color = Some(c);
                    }
                }
            }
        }

        (bits, first_color)
    }
}
