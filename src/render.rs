//! Rendered status images: error messages and the startup placeholder.
//!
//! Pixel content is a pure function of the input text, so callers can
//! compare rendered frames byte-for-byte. Text is drawn from an 8x8
//! bitmap font at 2x scale, white on black, clipped at the frame edge.

use std::time::Instant;

use font8x8::legacy::BASIC_LEGACY;

use crate::camera::{Frame, FrameFormat};

/// Width of every rendered status image in pixels.
pub const FRAME_WIDTH: u32 = 640;
/// Height of every rendered status image in pixels.
pub const FRAME_HEIGHT: u32 = 480;

const CHANNELS: usize = 3;
const TEXT_MARGIN_X: u32 = 20;
const TEXT_START_Y: u32 = 50;
const LINE_STEP: u32 = 40;
const MAX_LINES: usize = 7;
const GLYPH_SIZE: u32 = 8;
const GLYPH_SCALE: u32 = 2;
const TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// Render a multi-line error message onto a black 640x480 frame.
///
/// Lines start at y=50 with a 40 pixel vertical step and a fixed left
/// margin; anything past the seventh line is dropped.
pub fn error_image(message: &str) -> Frame {
    let mut frame = blank_frame();
    for (i, line) in message.lines().enumerate() {
        if i >= MAX_LINES {
            break;
        }
        draw_text(
            &mut frame,
            TEXT_MARGIN_X,
            TEXT_START_Y + LINE_STEP * i as u32,
            line,
        );
    }
    frame
}

/// The frame shown before any camera frame has been captured.
pub fn placeholder_image() -> Frame {
    let mut frame = blank_frame();
    draw_text(&mut frame, 50, 240, "Start the camera to begin");
    frame
}

fn blank_frame() -> Frame {
    Frame {
        data: vec![0; (FRAME_WIDTH * FRAME_HEIGHT) as usize * CHANNELS],
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        format: FrameFormat::Rgb,
        timestamp: Instant::now(),
    }
}

/// Draw one line of text. Characters that would cross the right edge
/// are clipped rather than wrapped.
fn draw_text(frame: &mut Frame, x: u32, y: u32, text: &str) {
    let advance = GLYPH_SIZE * GLYPH_SCALE;
    let mut cursor_x = x;
    for ch in text.chars() {
        if cursor_x >= frame.width {
            break;
        }
        draw_glyph(frame, cursor_x, y, ch);
        cursor_x += advance;
    }
}

fn draw_glyph(frame: &mut Frame, origin_x: u32, origin_y: u32, ch: char) {
    let code = ch as usize;
    let glyph = if code < BASIC_LEGACY.len() {
        BASIC_LEGACY[code]
    } else {
        BASIC_LEGACY[b'?' as usize]
    };

    for (row_index, row) in glyph.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            // Bit x of each font row is the pixel at column x.
            if row & (1 << col) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    put_pixel(
                        frame,
                        origin_x + col * GLYPH_SCALE + dx,
                        origin_y + row_index as u32 * GLYPH_SCALE + dy,
                        TEXT_COLOR,
                    );
                }
            }
        }
    }
}

fn put_pixel(frame: &mut Frame, x: u32, y: u32, color: [u8; 3]) {
    if x >= frame.width || y >= frame.height {
        return;
    }
    let offset = (y * frame.width + x) as usize * CHANNELS;
    frame.data[offset..offset + CHANNELS].copy_from_slice(&color);
}
