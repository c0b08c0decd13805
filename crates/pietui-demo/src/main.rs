#![forbid(unsafe_code)]

//! Renders one frame of a sample pie chart and prints it with ANSI
//! true-color escapes. Periodic update/redraw is a host's job; this demo
//! just shows the widget's output.

use pietui_core::geometry::Rect;
use pietui_render::ansi::render_ansi;
use pietui_render::buffer::Buffer;
use pietui_render::cell::PackedRgba;
use pietui_widgets::{Pie, PieOptions, Widget};
use std::process::ExitCode;

const WIDTH: u16 = 40;
const HEIGHT: u16 = 20;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pie = Pie::new(PieOptions::new());
    pie.set_values_with(
        &[30, 20, 50],
        PieOptions::new().colors(vec![PackedRgba::RED, PackedRgba::GREEN, PackedRgba::BLUE]),
    )?;

    let area = Rect::from_size(WIDTH, HEIGHT);
    let mut buf = Buffer::new(WIDTH, HEIGHT);
    pie.draw(area, &mut buf)?;

    print!("{}", render_ansi(&buf));

    for (i, slice) in pie.slices().iter().enumerate() {
        println!(
            "slice {i}: {:>6.1}° .. {:>6.1}°",
            slice.start_deg, slice.end_deg
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pietui-demo: {err}");
            ExitCode::FAILURE
        }
    }
}
