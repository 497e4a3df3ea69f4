use std::ops::{Index, IndexMut};

/// A single color in file channel order: B, G, R, then A.
///
/// Only the first `bytes_per_pixel` channels are meaningful. Grayscale pixels keep
/// their intensity in channel 0.
#[derive(Debug, Clone, Copy)]
pub struct Pixel {
    pub bgra: [u8; 4],
    pub bytes_per_pixel: u8,
}

impl Pixel {
    pub fn new(bgra: [u8; 4], bytes_per_pixel: u8) -> Self {
        Self {
            bgra,
            bytes_per_pixel: bytes_per_pixel.min(4),
        }
    }

    /// All channels zero.
    pub fn zero(bytes_per_pixel: u8) -> Self {
        Self::new([0; 4], bytes_per_pixel)
    }

    pub fn gray(value: u8) -> Self {
        Self::new([value, 0, 0, 0], 1)
    }

    pub fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self::new([b, g, r, 0], 3)
    }

    pub fn bgra(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self::new([b, g, r, a], 4)
    }

    /// Copies a pixel out of a buffer slice of at most 4 bytes.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut pixel = Self::zero(bytes.len() as u8);
        let n = pixel.bytes_per_pixel as usize;
        pixel.bgra[..n].copy_from_slice(&bytes[..n]);
        pixel
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bgra[..self.bytes_per_pixel as usize]
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::zero(4)
    }
}

impl PartialEq for Pixel {
    fn eq(&self, other: &Self) -> bool {
        self.bytes_per_pixel == other.bytes_per_pixel && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Pixel {}

impl Index<usize> for Pixel {
    type Output = u8;

    fn index(&self, channel: usize) -> &u8 {
        &self.bgra[channel]
    }
}

impl IndexMut<usize> for Pixel {
    fn index_mut(&mut self, channel: usize) -> &mut u8 {
        &mut self.bgra[channel]
    }
}
