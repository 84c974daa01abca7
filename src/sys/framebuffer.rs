//! The linear framebuffer the window manager paints into.
//!
//! The host hands us a row-major buffer of 32-bit ARGB pixels together with
//! its visible width and height and its pitch (pixels per row, which can be
//! larger than the width because of padding). Every write is clipped to the
//! visible area; padding columns and anything past the last row are never
//! touched.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Rect, Size};

/// A 32-bit `0xAARRGGBB` pixel value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn red(self) -> u8 { (self.0 >> 16) as u8 }

    pub const fn green(self) -> u8 { (self.0 >> 8) as u8 }

    pub const fn blue(self) -> u8 { self.0 as u8 }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{:08x}", self.0) }
}

/// Anything the renderer can paint on.
pub trait Canvas {
    fn size(&self) -> Size;

    /// Writes one pixel. Out-of-bounds coordinates are silently dropped.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Fills `rect`, clipped to the canvas.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersection(&self.size().bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_pixel(x, y, color);
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramebufferError {
    #[error("pitch of {pitch} pixels is smaller than the visible width of {width}")]
    PitchTooSmall { pitch: u32, width: u32 },
    #[error("buffer holds {len} pixels but pitch {pitch} x height {height} needs {required}")]
    BufferTooSmall {
        len: usize,
        pitch: u32,
        height: u32,
        required: usize,
    },
}

/// Pitch-addressed view over a pixel buffer.
///
/// `B` is usually `Vec<u32>` for an owned buffer or `&mut [u32]` when the host
/// lends us its memory.
pub struct Framebuffer<B = Vec<u32>> {
    buffer: B,
    width: u32,
    height: u32,
    pitch: u32,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u32]> + AsMut<[u32]>,
{
    pub fn new(buffer: B, width: u32, height: u32, pitch: u32) -> Result<Self, FramebufferError> {
        if pitch < width {
            return Err(FramebufferError::PitchTooSmall { pitch, width });
        }
        let required = pitch as usize * height as usize;
        let len = buffer.as_ref().len();
        if len < required {
            return Err(FramebufferError::BufferTooSmall { len, pitch, height, required });
        }
        Ok(Self { buffer, width, height, pitch })
    }

    pub fn pitch(&self) -> u32 { self.pitch }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color(self.buffer.as_ref()[self.offset(x, y)]))
        } else {
            None
        }
    }

    /// The visible part of row `y`, without padding.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset(0, y);
        Some(&self.buffer.as_ref()[start..start + self.width as usize])
    }

    pub fn raw(&self) -> &[u32] { self.buffer.as_ref() }

    pub fn into_inner(self) -> B { self.buffer }

    fn offset(&self, x: u32, y: u32) -> usize { y as usize * self.pitch as usize + x as usize }
}

impl Framebuffer<Vec<u32>> {
    /// Allocates a zeroed buffer with the given geometry.
    pub fn allocate(width: u32, height: u32, pitch: u32) -> Result<Self, FramebufferError> {
        let pitch = pitch.max(width);
        Self::new(vec![0; pitch as usize * height as usize], width, height, pitch)
    }
}

impl<B> Canvas for Framebuffer<B>
where
    B: AsRef<[u32]> + AsMut<[u32]>,
{
    fn size(&self) -> Size { Size::new(self.width, self.height) }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let offset = self.offset(x, y);
            self.buffer.as_mut()[offset] = color.0;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersection(&self.size().bounds()) else {
            return;
        };
        let pitch = self.pitch as usize;
        let pixels = self.buffer.as_mut();
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * pitch + clipped.x as usize;
            pixels[start..start + clipped.width as usize].fill(color.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: u32 = 0xdead_beef;

    #[test]
    fn rejects_inconsistent_geometry() {
        assert_eq!(
            Framebuffer::new(vec![0u32; 100], 10, 10, 8).err(),
            Some(FramebufferError::PitchTooSmall { pitch: 8, width: 10 })
        );
        assert!(matches!(
            Framebuffer::new(vec![0u32; 99], 10, 10, 10),
            Err(FramebufferError::BufferTooSmall { required: 100, .. })
        ));
    }

    #[test]
    fn writes_are_clipped_to_visible_area() {
        let mut fb = Framebuffer::new(vec![PAD; 12 * 4], 10, 4, 12).unwrap();
        fb.fill_rect(Rect::new(8, 2, 10, 10), Color(1));
        fb.set_pixel(10, 0, Color(2));
        fb.set_pixel(0, 4, Color(2));

        for y in 0..4 {
            for x in 0..10 {
                let expected = if x >= 8 && y >= 2 { 1 } else { PAD };
                assert_eq!(fb.pixel(x, y), Some(Color(expected)), "pixel ({x}, {y})");
            }
        }
        let raw = fb.into_inner();
        for y in 0..4 {
            assert_eq!(raw[y * 12 + 10], PAD);
            assert_eq!(raw[y * 12 + 11], PAD);
        }
    }

    #[test]
    fn default_fill_rect_matches_fast_path() {
        struct Slow(Framebuffer);
        impl Canvas for Slow {
            fn size(&self) -> Size { self.0.size() }

            fn set_pixel(&mut self, x: u32, y: u32, color: Color) { self.0.set_pixel(x, y, color) }
        }

        let mut fast = Framebuffer::allocate(16, 9, 20).unwrap();
        let mut slow = Slow(Framebuffer::allocate(16, 9, 20).unwrap());
        for rect in [Rect::new(3, 1, 5, 5), Rect::new(14, 7, 9, 9), Rect::new(40, 0, 1, 1)] {
            fast.fill_rect(rect, Color(7));
            slow.fill_rect(rect, Color(7));
        }
        assert_eq!(fast.raw(), slow.0.raw());
    }

    #[test]
    fn borrowed_buffer_works() {
        let mut pixels = [0u32; 6];
        {
            let mut fb = Framebuffer::new(&mut pixels[..], 3, 2, 3).unwrap();
            fb.fill_rect(Rect::new(1, 1, 5, 5), Color::rgb(1, 2, 3));
        }
        assert_eq!(pixels, [0, 0, 0, 0, 0x010203, 0x010203]);
    }
}
