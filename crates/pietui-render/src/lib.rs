#![forbid(unsafe_code)]

//! Rendering substrate for pietui: the cell grid, the braille sub-cell
//! surface, and a small ANSI presenter.

pub mod ansi;
pub mod braille;
pub mod buffer;
pub mod cell;
