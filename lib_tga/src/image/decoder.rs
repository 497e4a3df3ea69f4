use std::io::{self, Read};

use super::format::{DataType, Format, Header};
use super::tga::TgaImage;
use crate::compression::{rle_decompression, RleDecompressionError};
use crate::constants::{DESCRIPTOR_RIGHT_TO_LEFT, DESCRIPTOR_TOP_ORIGIN};
use log::{debug, error, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Unexpected end of data while reading the header")]
    TruncatedHeader,
    #[error("Bad dimensions or depth: {width}x{height} at {bits_per_pixel} bits per pixel")]
    InvalidDimensions {
        width: u16,
        height: u16,
        bits_per_pixel: u8,
    },
    #[error("Unsupported data type code {0}")]
    UnsupportedDataType(u8),
    #[error("Pixel data ended before {expected_pixels} pixels were read")]
    TruncatedPixelData { expected_pixels: usize },
    #[error("Pixel data decodes to more than {expected_pixels} pixels")]
    OverrunPixelData { expected_pixels: usize },
}

/// Reads one complete TGA image from `reader`.
///
/// The returned image always has its origin at the top-left, whatever order the
/// stream stored its rows and columns in.
pub fn decode<R: Read>(reader: &mut R) -> Result<TgaImage, DecodeError> {
    let mut header_bytes = [0u8; Header::SIZE];
    read_exact_or(reader, &mut header_bytes, DecodeError::TruncatedHeader)?;
    let header = Header::from_bytes(&header_bytes);
    debug!("Header read: {:?}", header);

    let (width, height) = (header.width, header.height);
    let format = match Format::from_bytes_per_pixel(header.bytes_per_pixel()) {
        Some(format) if width > 0 && height > 0 => format,
        _ => {
            error!(
                "Bad bpp (or width/height) value: {}x{}/{}",
                width, height, header.bits_per_pixel
            );
            return Err(DecodeError::InvalidDimensions {
                width,
                height,
                bits_per_pixel: header.bits_per_pixel,
            });
        }
    };

    // The image ID field sits between the header and the pixel data
    if header.id_length > 0 {
        let mut id = vec![0u8; header.id_length as usize];
        read_exact_or(reader, &mut id, DecodeError::TruncatedHeader)?;
        debug!("Skipped {} bytes of image ID", id.len());
    }

    let pixel_count = width as usize * height as usize;
    let data_type = DataType::from_code(header.data_type_code).ok_or_else(|| {
        error!("Unknown file format {}", header.data_type_code);
        DecodeError::UnsupportedDataType(header.data_type_code)
    })?;

    let data = if data_type.is_rle() {
        rle_decompression(reader, pixel_count, format.bytes_per_pixel()).map_err(|e| {
            error!("Failed to expand RLE pixel data: {}", e);
            match e {
                RleDecompressionError::UnexpectedEof { .. } => DecodeError::TruncatedPixelData {
                    expected_pixels: pixel_count,
                },
                RleDecompressionError::Overrun { expected, .. } => DecodeError::OverrunPixelData {
                    expected_pixels: expected,
                },
                RleDecompressionError::Io(e) => DecodeError::Io(e),
            }
        })?
    } else {
        let mut data = vec![0u8; pixel_count * format.bytes_per_pixel()];
        read_exact_or(
            reader,
            &mut data,
            DecodeError::TruncatedPixelData {
                expected_pixels: pixel_count,
            },
        )?;
        data
    };
    debug!("Pixel data read: {} bytes ({:?})", data.len(), data_type);

    let mut image = TgaImage::from_raw_parts(width, height, format, data);

    if header.image_descriptor & DESCRIPTOR_TOP_ORIGIN == 0 {
        debug!("Bottom-left origin, flipping rows");
        image.flip_vertically();
    }
    if header.image_descriptor & DESCRIPTOR_RIGHT_TO_LEFT != 0 {
        debug!("Right-to-left columns, flipping columns");
        image.flip_horizontally();
    }

    info!("Decoded {}x{}/{}", width, height, format.bits_per_pixel());
    Ok(image)
}

/// Like `read_exact`, but a short read becomes `on_eof`.
fn read_exact_or<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    on_eof: DecodeError,
) -> Result<(), DecodeError> {
    reader.read_exact(buf).map_err(|e| {
        error!("An error occurred while reading the data: {}", e);
        match e.kind() {
            io::ErrorKind::UnexpectedEof => on_eof,
            _ => DecodeError::Io(e),
        }
    })
}
