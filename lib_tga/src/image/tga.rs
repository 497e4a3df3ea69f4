use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::error;

use super::color::Pixel;
use super::decoder::{decode, DecodeError};
use super::encoder::{encode, EncodeError, WriteOptions};
use super::format::Format;

/// An in-memory TGA image.
///
/// Pixels are stored row-major with the origin at the top-left, `width * height *
/// bytes_per_pixel` bytes in total. A default image is empty: zero-sized, with no
/// format and no pixel storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TgaImage {
    width: u16,
    height: u16,
    format: Option<Format>,
    data: Vec<u8>,
}

impl TgaImage {
    /// Allocates a `width` x `height` image with every pixel set to `fill`.
    ///
    /// Only the first `format.bytes_per_pixel()` channels of `fill` are used.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    pub fn new(width: u16, height: u16, format: Format, fill: Pixel) -> Self {
        assert!(
            width > 0 && height > 0,
            "image dimensions must be positive, got {}x{}",
            width,
            height
        );

        let bytes_per_pixel = format.bytes_per_pixel();
        let data = fill.bgra[..bytes_per_pixel].repeat(width as usize * height as usize);

        Self {
            width,
            height,
            format: Some(format),
            data,
        }
    }

    pub(crate) fn from_raw_parts(width: u16, height: u16, format: Format, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * format.bytes_per_pixel()
        );
        Self {
            width,
            height,
            format: Some(format),
            data,
        }
    }

    /// Replaces this image with the one stored at `path`.
    ///
    /// On failure the image is left as it was, but callers should not rely on
    /// that and must treat a failed read as unusable.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<(), DecodeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            error!("Can't open file {}: {}", path.display(), e);
            DecodeError::Io(e)
        })?;

        *self = decode(&mut BufReader::new(file))?;
        Ok(())
    }

    /// Saves the image to `path`, overwriting any existing file.
    ///
    /// `vertical_flip` selects a bottom-left origin for the stored rows, `rle`
    /// selects run-length encoded pixel data. A failure part way through can
    /// leave a partially written file behind.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        vertical_flip: bool,
        rle: bool,
    ) -> Result<(), EncodeError> {
        self.write_with(path, &WriteOptions { vertical_flip, rle })
    }

    pub fn write_with(
        &self,
        path: impl AsRef<Path>,
        options: &WriteOptions,
    ) -> Result<(), EncodeError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            error!("Can't open file {}: {}", path.display(), e);
            EncodeError::Io(e)
        })?;

        let mut writer = BufWriter::new(file);
        encode(self, &mut writer, *options)
            .and_then(|()| writer.flush().map_err(EncodeError::from))
            .map_err(|e| {
                error!("Can't dump the tga file {}: {}", path.display(), e);
                e
            })
    }

    /// The pixel at (`x`, `y`), or a zero pixel when the coordinates fall outside
    /// the image.
    pub fn get(&self, x: i32, y: i32) -> Pixel {
        let bytes_per_pixel = self.bytes_per_pixel();
        match self.offset(x, y) {
            Some(offset) => Pixel::from_slice(&self.data[offset..offset + bytes_per_pixel]),
            None => Pixel::zero(bytes_per_pixel as u8),
        }
    }

    /// Copies `pixel` into (`x`, `y`). Out of range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, pixel: &Pixel) {
        let bytes_per_pixel = self.bytes_per_pixel();
        if let Some(offset) = self.offset(x, y) {
            self.data[offset..offset + bytes_per_pixel]
                .copy_from_slice(&pixel.bgra[..bytes_per_pixel]);
        }
    }

    /// Mirrors the image left to right.
    pub fn flip_horizontally(&mut self) {
        let bytes_per_pixel = self.bytes_per_pixel();
        let width = self.width as usize;
        if self.data.is_empty() {
            return;
        }

        for row in self.data.chunks_exact_mut(width * bytes_per_pixel) {
            for i in 0..width / 2 {
                let (left, right) = row.split_at_mut((width - 1 - i) * bytes_per_pixel);
                left[i * bytes_per_pixel..(i + 1) * bytes_per_pixel]
                    .swap_with_slice(&mut right[..bytes_per_pixel]);
            }
        }
    }

    /// Mirrors the image top to bottom.
    pub fn flip_vertically(&mut self) {
        let row_len = self.width as usize * self.bytes_per_pixel();
        let height = self.height as usize;

        for j in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - j) * row_len);
            top[j * row_len..(j + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// `None` for an empty image.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.map_or(0, Format::bytes_per_pixel)
    }

    /// The raw pixel buffer, top row first, channels in B, G, R, A order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if self.data.is_empty()
            || x < 0
            || y < 0
            || x >= self.width as i32
            || y >= self.height as i32
        {
            return None;
        }
        Some((x as usize + y as usize * self.width as usize) * self.bytes_per_pixel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u16, height: u16) -> TgaImage {
        let mut image = TgaImage::new(width, height, Format::Grayscale, Pixel::gray(0));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                image.set(x, y, &Pixel::gray((y * width as i32 + x) as u8));
            }
        }
        image
    }

    #[test]
    fn test_new_fills_every_pixel() {
        let fill = Pixel::bgra(1, 2, 3, 4);
        let image = TgaImage::new(3, 2, Format::Rgba, fill);
        assert_eq!(image.as_bytes().len(), 3 * 2 * 4);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(image.get(x, y), fill);
            }
        }
    }

    #[test]
    fn test_new_truncates_fill_to_format() {
        let image = TgaImage::new(1, 1, Format::Rgb, Pixel::bgra(5, 6, 7, 8));
        assert_eq!(image.as_bytes(), &[5, 6, 7]);
        assert_eq!(image.get(0, 0), Pixel::bgr(5, 6, 7));
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_zero_width() {
        TgaImage::new(0, 4, Format::Rgb, Pixel::default());
    }

    #[test]
    fn test_default_is_empty() {
        let mut image = TgaImage::default();
        assert_eq!(image.width(), 0);
        assert_eq!(image.height(), 0);
        assert_eq!(image.format(), None);
        assert_eq!(image.get(0, 0), Pixel::zero(0));
        image.set(0, 0, &Pixel::bgr(1, 1, 1));
        image.flip_horizontally();
        image.flip_vertically();
        assert!(image.as_bytes().is_empty());
    }

    #[test]
    fn test_out_of_range_get_and_set() {
        let mut image = numbered(4, 3);
        let before = image.clone();

        for (x, y) in [(-1, 0), (4, 0), (0, 3), (0, -1), (i32::MAX, i32::MAX)] {
            assert_eq!(image.get(x, y), Pixel::zero(1));
            image.set(x, y, &Pixel::gray(0xFF));
        }
        assert_eq!(image, before);
    }

    #[test]
    fn test_flip_horizontally() {
        let mut image = numbered(3, 2);
        image.flip_horizontally();
        assert_eq!(image.as_bytes(), &[2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_flip_vertically() {
        let mut image = numbered(2, 3);
        image.flip_vertically();
        assert_eq!(image.as_bytes(), &[4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_flips_keep_whole_pixels() {
        let mut image = TgaImage::new(2, 1, Format::Rgb, Pixel::default());
        image.set(0, 0, &Pixel::bgr(1, 2, 3));
        image.set(1, 0, &Pixel::bgr(4, 5, 6));
        image.flip_horizontally();
        assert_eq!(image.as_bytes(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let original = numbered(5, 4);

        let mut image = original.clone();
        image.flip_horizontally();
        assert_ne!(image, original);
        image.flip_horizontally();
        assert_eq!(image, original);

        image.flip_vertically();
        assert_ne!(image, original);
        image.flip_vertically();
        assert_eq!(image, original);
    }
}
