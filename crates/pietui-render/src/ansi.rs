#![forbid(unsafe_code)]

//! Minimal ANSI presenter: dump a [`Buffer`] as a true-color string.
//!
//! One line per buffer row, SGR reset at the end of each row. Foreground
//! changes are emitted only when the color differs from the previous
//! cell. Intended for demos and snapshot-style tests, not for diffing
//! against a live terminal.

use crate::buffer::Buffer;
use crate::cell::PackedRgba;
use std::fmt::Write as _;

const RESET: &str = "\x1b[0m";

/// Render the buffer as a string with 24-bit foreground colors.
pub fn render_ansi(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.height() {
        let mut current_fg: Option<PackedRgba> = None;
        for x in 0..buf.width() {
            // Coordinates iterate the buffer bounds, so the cell exists.
            let Some(cell) = buf.get(x, y) else { continue };
            if cell.is_blank() {
                if current_fg.is_some() {
                    out.push_str(RESET);
                    current_fg = None;
                }
                out.push(' ');
                continue;
            }
            if current_fg != Some(cell.fg) {
                let (r, g, b) = (cell.fg.r(), cell.fg.g(), cell.fg.b());
                let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
                current_fg = Some(cell.fg);
            }
            out.push(cell.ch);
        }
        if current_fg.is_some() {
            out.push_str(RESET);
        }
        out.push('\n');
    }
    out
}
