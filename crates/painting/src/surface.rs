//! CPU pixel buffer for painting - RGBA8 storage

use tracing::debug;

use crate::types::{Rgba, TRANSPARENT};

/// An owned RGBA8 raster
///
/// Pixels are stored row-major as flat bytes in R, G, B, A order. The byte
/// length is always `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Buffer dimensions
    width: u32,
    height: u32,
    /// Flat channel data
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Wrap existing RGBA bytes
    ///
    /// Returns None if the length does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != byte_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.index(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Get a pixel by signed coordinates (None when negative or out of bounds)
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<Rgba> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        self.get(x, y)
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&color);
        }
    }

    /// Clear the buffer to a solid color
    pub fn clear(&mut self, color: Rgba) {
        self.pixels_mut().fill(color);
    }

    /// Reallocate to new dimensions
    ///
    /// The overlapping region keeps its content; pixels outside the old
    /// bounds start transparent.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }

        let mut data = vec![0; byte_len(width, height)];
        let copy_w = self.width.min(width) as usize * 4;
        let copy_h = self.height.min(height) as usize;
        let old_stride = self.width as usize * 4;
        let new_stride = width as usize * 4;

        for row in 0..copy_h {
            let src = row * old_stride;
            let dst = row * new_stride;
            data[dst..dst + copy_w].copy_from_slice(&self.data[src..src + copy_w]);
        }

        debug!(
            "PixelBuffer::resize: {}x{} -> {}x{}",
            self.width, self.height, width, height
        );

        self.width = width;
        self.height = height;
        self.data = data;
    }

    /// Copy another buffer's content in, cropping or padding to our size
    pub fn copy_from(&mut self, other: &PixelBuffer) {
        let mut source = other.clone();
        source.resize(self.width, self.height);
        self.data = source.data;
    }

    /// Raw RGBA bytes, row-major
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel view of the data
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutable pixel view of the data
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True if every pixel is fully transparent
    pub fn is_blank(&self) -> bool {
        self.pixels().iter().all(|p| *p == TRANSPARENT)
    }
}

#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = PixelBuffer::new(100, 100);
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.height(), 100);
        assert_eq!(buffer.pixel_count(), 10000);
        assert_eq!(buffer.as_bytes().len(), 40000);
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_get_set_pixel() {
        let mut buffer = PixelBuffer::new(10, 10);
        let color = [255, 128, 64, 255];

        buffer.set(5, 5, color);
        assert_eq!(buffer.get(5, 5), Some(color));

        // Out of bounds should return None
        assert_eq!(buffer.get(100, 100), None);
        assert_eq!(buffer.get(10, 0), None);
        assert_eq!(buffer.get_signed(-1, 0), None);
    }

    #[test]
    fn test_out_of_bounds_set_is_noop() {
        let mut buffer = PixelBuffer::new(4, 4);
        let before = buffer.clone();

        buffer.set(4, 0, [255; 4]);
        buffer.set(0, 4, [255; 4]);
        buffer.set(u32::MAX, u32::MAX, [255; 4]);

        assert_eq!(buffer, before);
    }

    #[test]
    fn test_clear() {
        let mut buffer = PixelBuffer::new(10, 10);
        let white = [255, 255, 255, 255];

        buffer.clear(white);

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(buffer.get(x, y), Some(white));
            }
        }
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut buffer = PixelBuffer::new(100, 100);
        buffer.clear([9, 9, 9, 255]);
        buffer.set(10, 10, [1, 2, 3, 4]);

        buffer.resize(50, 200);

        assert_eq!(buffer.width(), 50);
        assert_eq!(buffer.height(), 200);
        assert_eq!(buffer.as_bytes().len(), 50 * 200 * 4);
        assert_eq!(buffer.get(10, 10), Some([1, 2, 3, 4]));
        // Cropped column is gone, new rows are transparent
        assert_eq!(buffer.get(60, 10), None);
        assert_eq!(buffer.get(10, 150), Some(TRANSPARENT));
        assert_eq!(buffer.get(49, 99), Some([9, 9, 9, 255]));
    }

    #[test]
    fn test_resize_grow_zero_fills() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.clear([255; 4]);
        buffer.resize(3, 3);
        assert_eq!(buffer.get(1, 1), Some([255; 4]));
        assert_eq!(buffer.get(2, 0), Some(TRANSPARENT));
        assert_eq!(buffer.get(0, 2), Some(TRANSPARENT));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_copy_from_crops() {
        let mut source = PixelBuffer::new(4, 4);
        source.clear([7, 7, 7, 7]);
        let mut target = PixelBuffer::new(2, 6);
        target.copy_from(&source);
        assert_eq!(target.width(), 2);
        assert_eq!(target.get(1, 3), Some([7, 7, 7, 7]));
        assert_eq!(target.get(1, 5), Some(TRANSPARENT));
    }

    #[test]
    fn test_pixels_view() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.pixels_mut()[1] = [1, 2, 3, 4];
        assert_eq!(buffer.as_bytes(), &[0, 0, 0, 0, 1, 2, 3, 4]);
    }
}
