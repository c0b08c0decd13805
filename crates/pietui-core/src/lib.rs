#![forbid(unsafe_code)]

//! Core primitives for pietui: geometry and canonical input events.

pub mod event;
pub mod geometry;
