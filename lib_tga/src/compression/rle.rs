use std::io::{self, Read};

use log::debug;
use thiserror::Error;

use crate::constants::MAX_PACKET_PIXELS;

#[derive(Error, Debug)]
pub enum RleCompressionError {
    #[error("Invalid bytes per pixel: {0}")]
    InvalidBytesPerPixel(usize),
    #[error("Invalid pixel data length: expected multiple of {bytes_per_pixel} bytes, got {len}")]
    InvalidPixelDataLength { len: usize, bytes_per_pixel: usize },
}

#[derive(Error, Debug)]
pub enum RleDecompressionError {
    #[error("packet stream ended at pixel {position}")]
    UnexpectedEof { position: usize },
    #[error("packet stream decodes past the image: expected {expected} pixels, got at least {got}")]
    Overrun { expected: usize, got: usize },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Scanning,
    ExtendingRaw,
    ExtendingRepeated,
}

/// Packs pixel data into TGA run-length packets.
///
/// Runs are chosen greedily from left to right. The first comparison of a run
/// decides whether it is raw or repeated. A raw run that meets two equal
/// neighbours gives its last pixel back, so that pixel can open the next
/// (repeated) packet. No packet covers more than 128 pixels.
///
/// # Errors
/// - `InvalidBytesPerPixel` if `bytes_per_pixel` is zero or above 4
/// - `InvalidPixelDataLength` if `data` is not a whole number of pixels
pub fn rle_compression(data: &[u8], bytes_per_pixel: usize) -> Result<Vec<u8>, RleCompressionError> {
    if bytes_per_pixel == 0 || bytes_per_pixel > 4 {
        return Err(RleCompressionError::InvalidBytesPerPixel(bytes_per_pixel));
    }
    if data.len() % bytes_per_pixel != 0 {
        return Err(RleCompressionError::InvalidPixelDataLength {
            len: data.len(),
            bytes_per_pixel,
        });
    }

    let pixel_count = data.len() / bytes_per_pixel;
    let pixel = |i: usize| &data[i * bytes_per_pixel..(i + 1) * bytes_per_pixel];

    let mut encoded = Vec::with_capacity(data.len() / 2);
    let mut packets = 0usize;
    let mut start = 0;

    while start < pixel_count {
        let mut run_length = 1;
        let mut state = RunState::Scanning;

        while start + run_length < pixel_count && run_length < MAX_PACKET_PIXELS {
            let same = pixel(start + run_length - 1) == pixel(start + run_length);
            state = match (state, same) {
                (RunState::Scanning, true) => RunState::ExtendingRepeated,
                (RunState::Scanning, false) => RunState::ExtendingRaw,
                (RunState::ExtendingRaw, true) => {
                    run_length -= 1;
                    break;
                }
                (RunState::ExtendingRepeated, false) => break,
                (state, _) => state,
            };
            run_length += 1;
        }

        let chunk_start = start * bytes_per_pixel;
        if state == RunState::ExtendingRepeated {
            encoded.push((run_length + 127) as u8);
            encoded.extend_from_slice(pixel(start));
        } else {
            encoded.push((run_length - 1) as u8);
            encoded.extend_from_slice(&data[chunk_start..chunk_start + run_length * bytes_per_pixel]);
        }

        packets += 1;
        start += run_length;
    }

    debug!(
        "RLE packed {} pixels into {} packets ({} bytes)",
        pixel_count,
        packets,
        encoded.len()
    );
    Ok(encoded)
}

/// Expands a TGA run-length packet stream into exactly `pixel_count` pixels.
///
/// Reading stops as soon as the last pixel is produced; anything after that in
/// `reader` is left untouched. `bytes_per_pixel` must be between 1 and 4.
///
/// # Errors
/// - `UnexpectedEof` if the stream ends before `pixel_count` pixels are decoded
/// - `Overrun` if a packet would produce pixels beyond `pixel_count`
/// - `Io` for any other read failure
pub fn rle_decompression<R: Read>(
    reader: &mut R,
    pixel_count: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, RleDecompressionError> {
    let mut decoded = Vec::with_capacity(pixel_count * bytes_per_pixel);
    let mut color = [0u8; 4];
    let color = &mut color[..bytes_per_pixel];
    let mut current_pixel = 0usize;

    while current_pixel < pixel_count {
        let mut header = [0u8; 1];
        read_or_eof(reader, &mut header, current_pixel)?;

        let (run_length, repeated) = if header[0] < 128 {
            (header[0] as usize + 1, false)
        } else {
            (header[0] as usize - 127, true)
        };

        if current_pixel + run_length > pixel_count {
            return Err(RleDecompressionError::Overrun {
                expected: pixel_count,
                got: current_pixel + run_length,
            });
        }

        if repeated {
            read_or_eof(reader, color, current_pixel)?;
            for _ in 0..run_length {
                decoded.extend_from_slice(color);
            }
            current_pixel += run_length;
        } else {
            for _ in 0..run_length {
                read_or_eof(reader, color, current_pixel)?;
                decoded.extend_from_slice(color);
                current_pixel += 1;
            }
        }
    }

    Ok(decoded)
}

fn read_or_eof<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    position: usize,
) -> Result<(), RleDecompressionError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => RleDecompressionError::UnexpectedEof { position },
        _ => RleDecompressionError::Io(e),
    })
}
