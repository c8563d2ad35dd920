use smart_leds::{SmartLedsWrite, RGB8};

use crate::profiles::Glyph;

pub const MATRIX_SIZE: usize = 5;
pub const LED_COUNT: usize = MATRIX_SIZE * MATRIX_SIZE;

/// Strip position of a logical glyph pixel
/// The strip snakes up from the bottom right corner of the panel
/// param row: 0 is the top row
/// param col: 0 is the leftmost column
/// returns the index into the LED strip
pub const fn strip_index(row: usize, col: usize) -> usize {
    let r = MATRIX_SIZE - 1 - row;
    let c = MATRIX_SIZE - 1 - col;
    if r % 2 == 0 {
        r * MATRIX_SIZE + c
    } else {
        r * MATRIX_SIZE + (MATRIX_SIZE - 1 - c)
    }
}

/// Lays a glyph out in strip order
pub fn glyph_frame(glyph: &Glyph) -> [RGB8; LED_COUNT] {
    let mut frame = [RGB8::default(); LED_COUNT];
    for (row, pixels) in glyph.iter().enumerate() {
        for (col, pixel) in pixels.iter().enumerate() {
            frame[strip_index(row, col)] = *pixel;
        }
    }
    frame
}

pub fn show_glyph<W>(strip: &mut W, glyph: &Glyph) -> Result<(), W::Error>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    strip.write(glyph_frame(glyph))
}

pub fn clear_matrix<W>(strip: &mut W) -> Result<(), W::Error>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    strip.write([RGB8::default(); LED_COUNT])
}
