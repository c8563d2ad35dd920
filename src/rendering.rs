use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::{String, Vec};
use ufmt::uwrite;

use crate::profiles::{Mode, PhStatus};
use crate::sensors::SensorReading;

pub const LINE_LENGTH: usize = 21; // 128px / 6px glyphs
pub const STATUS_LINES: usize = 5;
const LINE_HEIGHT: i32 = 12;

pub type StatusLine = String<LINE_LENGTH>;
pub type StatusLines = Vec<StatusLine, STATUS_LINES>;

/// Builds the status screen text
/// param mode: The selected plant profile
/// param irrigating: If irrigation is currently on
/// param reading: Latest sensor snapshot
/// returns moisture, pH, mode, pH verdict and irrigation lines, top to bottom
pub fn status_lines(mode: Mode, irrigating: bool, reading: &SensorReading) -> StatusLines {
    let mut lines = StatusLines::new();
    // Every line fits LINE_LENGTH, so the writes below cannot overflow
    let mut line = StatusLine::new();

    uwrite!(line, "Umidade: {}%", reading.moisture).ok();
    lines.push(core::mem::take(&mut line)).ok();

    let (whole, tenth) = ph_digits(reading.ph);
    uwrite!(line, "pH: {}.{}", whole, tenth).ok();
    lines.push(core::mem::take(&mut line)).ok();

    uwrite!(line, "Modo: {}", mode.name()).ok();
    lines.push(core::mem::take(&mut line)).ok();

    let verdict = match mode.profile().ph_status(reading.ph) {
        PhStatus::Low => "pH baixo!",
        PhStatus::High => "pH alto!",
        PhStatus::Ok => "pH ok!",
    };
    uwrite!(line, "{}", verdict).ok();
    lines.push(core::mem::take(&mut line)).ok();

    if irrigating {
        uwrite!(line, "Irrigando...").ok();
    } else {
        uwrite!(line, "Irrigacao: off").ok();
    }
    lines.push(line).ok();

    lines
}

/// Splits a pH value into whole and tenth digits, rounded to one decimal
fn ph_digits(ph: f32) -> (u16, u16) {
    let tenths = (ph.clamp(0.0, 14.0) * 10.0 + 0.5) as u16;
    (tenths / 10, tenths % 10)
}

/// Clears the display and writes each line from the top
/// param lines: Text to render, one entry per row
/// param display: Any monochrome draw target
pub fn render_text<D, S>(lines: &[S], display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
    S: AsRef<str>,
{
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build();

    display.clear(BinaryColor::Off)?;
    for (row, line) in lines.iter().enumerate() {
        Text::with_baseline(
            line.as_ref(),
            Point::new(0, row as i32 * LINE_HEIGHT),
            style,
            Baseline::Top,
        )
        .draw(display)?;
    }
    Ok(())
}
