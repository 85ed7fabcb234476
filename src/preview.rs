//! Frame to ASCII character grid conversion for the terminal panel.
//!
//! Three stages: RGB to grayscale (integer BT.601 luminance),
//! box-average downsampling to the character grid, and brightness to
//! glyph mapping over a density ramp.

use crate::camera::Frame;

/// Standard ASCII density ramp (10 levels).
/// Characters ordered from darkest (space) to brightest (@).
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Block character set (5 levels).
/// Uses Unicode block characters for higher perceived resolution.
pub const BLOCKS_CHARSET: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Minimal character set (4 levels).
/// Clean, less noisy look.
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', ':', '#'];

/// Character set used for the terminal preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Standard ASCII density ramp (10 levels)
    #[default]
    Standard,
    /// Block character set (5 levels) using Unicode blocks
    Blocks,
    /// Minimal character set (4 levels) for a clean look
    Minimal,
}

impl CharSet {
    /// Get the character slice for this charset.
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    /// Get a human-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }

    /// Parse a charset name as written in the config file.
    pub fn from_name(name: &str) -> Option<CharSet> {
        match name {
            "standard" => Some(CharSet::Standard),
            "blocks" => Some(CharSet::Blocks),
            "minimal" => Some(CharSet::Minimal),
            _ => None,
        }
    }
}

/// Convert an RGB frame to grayscale using the ITU-R BT.601 luminance
/// formula, Y = 0.299*R + 0.587*G + 0.114*B, in integer math with the
/// coefficients scaled by 1000.
pub fn to_grayscale(frame: &Frame) -> Vec<u8> {
    let pixel_count = (frame.width * frame.height) as usize;
    let mut gray = Vec::with_capacity(pixel_count);

    for rgb in frame.data.chunks_exact(3) {
        let r = rgb[0] as u32;
        let g = rgb[1] as u32;
        let b = rgb[2] as u32;
        let luminance = (299 * r + 587 * g + 114 * b) / 1000;
        gray.push(luminance as u8);
    }

    gray
}

/// Downsample a grayscale image to a character grid by averaging the
/// brightness of all pixels within each cell.
///
/// Returns one brightness value (0-255) per cell in row-major order;
/// the length is `char_width * char_height`. Degenerate dimensions
/// yield an empty vector.
pub fn downsample(
    gray: &[u8],
    img_width: u32,
    img_height: u32,
    char_width: u16,
    char_height: u16,
) -> Vec<u8> {
    if char_width == 0 || char_height == 0 || img_width == 0 || img_height == 0 || gray.is_empty() {
        return Vec::new();
    }

    // Cell size in pixels, kept fractional for accurate bounds
    let cell_w = img_width as f32 / char_width as f32;
    let cell_h = img_height as f32 / char_height as f32;

    let mut result = Vec::with_capacity((char_width as usize) * (char_height as usize));

    for cy in 0..char_height {
        for cx in 0..char_width {
            let start_x = (cx as f32 * cell_w) as u32;
            let end_x = ((cx + 1) as f32 * cell_w) as u32;
            let start_y = (cy as f32 * cell_h) as u32;
            let end_y = ((cy + 1) as f32 * cell_h) as u32;

            let mut sum = 0u32;
            let mut count = 0u32;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let idx = (py * img_width + px) as usize;
                    if idx < gray.len() {
                        sum += gray[idx] as u32;
                        count += 1;
                    }
                }
            }

            result.push(if count > 0 { (sum / count) as u8 } else { 0 });
        }
    }

    result
}

/// Map brightness values to characters from the charset, ordered from
/// darkest to brightest. `invert` flips the ramp for light terminals.
pub fn map_to_chars(brightness: &[u8], charset: &[char], invert: bool) -> Vec<char> {
    if charset.is_empty() {
        return vec![' '; brightness.len()];
    }

    let levels = charset.len();
    brightness
        .iter()
        .map(|&b| {
            let b = if invert { 255 - b } else { b };
            let idx = (b as usize * (levels - 1)) / 255;
            charset[idx]
        })
        .collect()
}

/// Character grid dimensions for a frame at the requested column
/// count, assuming terminal cells are twice as tall as they are wide.
pub fn grid_size(frame_width: u32, frame_height: u32, columns: u16) -> (u16, u16) {
    if frame_width == 0 || frame_height == 0 || columns == 0 {
        return (0, 0);
    }
    let rows = (columns as u32 * frame_height) / (frame_width * 2);
    (columns, rows.max(1) as u16)
}

/// Render a frame as a newline-separated character grid.
pub fn render_grid(frame: &Frame, columns: u16, charset: CharSet, invert: bool) -> String {
    let (cols, rows) = grid_size(frame.width, frame.height, columns);
    if cols == 0 || rows == 0 {
        return String::new();
    }

    let gray = to_grayscale(frame);
    let brightness = downsample(&gray, frame.width, frame.height, cols, rows);
    let chars = map_to_chars(&brightness, charset.chars(), invert);

    let mut out = String::with_capacity((cols as usize + 1) * rows as usize);
    for row in chars.chunks(cols as usize) {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
