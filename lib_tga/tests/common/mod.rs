#![allow(dead_code)]

use lib_tga::{Format, Header, Pixel, TgaImage};

/// Deterministic xorshift noise, so failures reproduce.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// 256 grayscale-ish BGRA steps, one per pixel.
pub fn gradient() -> Vec<u8> {
    let mut data = Vec::with_capacity(256 * 4);
    for i in 0..256 {
        data.extend_from_slice(&[i as u8, i as u8, i as u8, 255]);
    }
    data
}

pub fn random_image(width: u16, height: u16, format: Format, seed: u32) -> TgaImage {
    let bpp = format.bytes_per_pixel();
    let bytes = noise(width as usize * height as usize * bpp, seed);
    let mut image = TgaImage::new(width, height, format, Pixel::default());
    for (i, chunk) in bytes.chunks_exact(bpp).enumerate() {
        let x = (i % width as usize) as i32;
        let y = (i / width as usize) as i32;
        image.set(x, y, &Pixel::from_slice(chunk));
    }
    image
}

/// Noise with every value repeated in horizontal runs of `run` pixels.
pub fn blocky_image(width: u16, height: u16, format: Format, run: usize, seed: u32) -> TgaImage {
    let bpp = format.bytes_per_pixel();
    let colors = noise(width as usize * height as usize * bpp, seed);
    let mut image = TgaImage::new(width, height, format, Pixel::default());
    for y in 0..height as usize {
        for x in 0..width as usize {
            let block = (y * width as usize + x) / run;
            let pixel = Pixel::from_slice(&colors[block * bpp..(block + 1) * bpp]);
            image.set(x as i32, y as i32, &pixel);
        }
    }
    image
}

pub fn header(data_type_code: u8, width: u16, height: u16, bits_per_pixel: u8, descriptor: u8) -> Vec<u8> {
    Header {
        data_type_code,
        width,
        height,
        bits_per_pixel,
        image_descriptor: descriptor,
        ..Header::zeroed()
    }
    .to_bytes()
    .to_vec()
}
