use std::borrow::Cow;
use std::io::{self, Write};

use log::{debug, error, info};
use thiserror::Error;

use super::format::{DataType, Header};
use super::tga::TgaImage;
use crate::compression::{rle_compression, RleCompressionError};
use crate::constants::{
    DESCRIPTOR_TOP_ORIGIN, DEVELOPER_AREA_REF, EXTENSION_AREA_REF, FOOTER_SIGNATURE,
};

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to compress image data")]
    CompressionFailed(#[from] RleCompressionError),
    #[error("Image has no pixels to encode")]
    EmptyImage,
}

/// How an image is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Store rows bottom-to-top and declare a bottom-left origin.
    pub vertical_flip: bool,
    /// Run-length encode the pixel data.
    pub rle: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            vertical_flip: true,
            rle: true,
        }
    }
}

/// Writes `image` to `writer` as a complete TGA stream: header, pixel data,
/// developer/extension area references and the footer signature.
pub fn encode<W: Write>(
    image: &TgaImage,
    writer: &mut W,
    options: WriteOptions,
) -> Result<(), EncodeError> {
    info!("Starting encoding");

    let format = image.format().ok_or_else(|| {
        error!("Refusing to encode an empty image");
        EncodeError::EmptyImage
    })?;
    let data_type = DataType::for_format(format, options.rle);

    // Step 1: Write header
    let header = Header {
        data_type_code: data_type.code(),
        width: image.width(),
        height: image.height(),
        bits_per_pixel: format.bits_per_pixel(),
        image_descriptor: if options.vertical_flip {
            0x00
        } else {
            DESCRIPTOR_TOP_ORIGIN
        },
        ..Header::zeroed()
    };
    writer.write_all(&header.to_bytes())?;
    debug!("Header written: {:?}", header);

    // Step 2: Write pixel data in the row order the descriptor promises
    let pixels: Cow<[u8]> = if options.vertical_flip {
        Cow::Owned(rows_bottom_up(image))
    } else {
        Cow::Borrowed(image.as_bytes())
    };

    if options.rle {
        let packed = rle_compression(&pixels, format.bytes_per_pixel())?;
        debug!(
            "Pixel data compressed: {} -> {} bytes",
            pixels.len(),
            packed.len()
        );
        writer.write_all(&packed)?;
    } else {
        writer.write_all(&pixels)?;
        debug!("Raw pixel data written: {} bytes", pixels.len());
    }

    // Step 3: Write footer
    writer.write_all(&DEVELOPER_AREA_REF)?;
    writer.write_all(&EXTENSION_AREA_REF)?;
    writer.write_all(&FOOTER_SIGNATURE)?;

    info!(
        "Encoded {}x{}/{} ({:?})",
        image.width(),
        image.height(),
        format.bits_per_pixel(),
        data_type
    );
    Ok(())
}

fn rows_bottom_up(image: &TgaImage) -> Vec<u8> {
    let data = image.as_bytes();
    let row_len = image.width() as usize * image.bytes_per_pixel();

    let mut flipped = Vec::with_capacity(data.len());
    for row in data.chunks_exact(row_len).rev() {
        flipped.extend_from_slice(row);
    }
    flipped
}
