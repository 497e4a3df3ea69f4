use crate::constants::{
    DATA_TYPE_RAW_COLOR, DATA_TYPE_RAW_GRAYSCALE, DATA_TYPE_RLE_COLOR, DATA_TYPE_RLE_GRAYSCALE,
    HEADER_SIZE,
};

/// Pixel layouts the codec understands, valued by bytes per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl Format {
    pub fn from_bytes_per_pixel(bytes_per_pixel: usize) -> Option<Self> {
        match bytes_per_pixel {
            1 => Some(Format::Grayscale),
            3 => Some(Format::Rgb),
            4 => Some(Format::Rgba),
            _ => None,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        self as usize
    }

    pub fn bits_per_pixel(self) -> u8 {
        (self as u8) << 3
    }
}

/// Supported values of the header's data-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    RawColor,
    RawGrayscale,
    RleColor,
    RleGrayscale,
}

impl DataType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            DATA_TYPE_RAW_COLOR => Some(DataType::RawColor),
            DATA_TYPE_RAW_GRAYSCALE => Some(DataType::RawGrayscale),
            DATA_TYPE_RLE_COLOR => Some(DataType::RleColor),
            DATA_TYPE_RLE_GRAYSCALE => Some(DataType::RleGrayscale),
            _ => None,
        }
    }

    /// Picks the code a writer emits for `format`.
    pub fn for_format(format: Format, rle: bool) -> Self {
        match (format, rle) {
            (Format::Grayscale, false) => DataType::RawGrayscale,
            (Format::Grayscale, true) => DataType::RleGrayscale,
            (_, false) => DataType::RawColor,
            (_, true) => DataType::RleColor,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            DataType::RawColor => DATA_TYPE_RAW_COLOR,
            DataType::RawGrayscale => DATA_TYPE_RAW_GRAYSCALE,
            DataType::RleColor => DATA_TYPE_RLE_COLOR,
            DataType::RleGrayscale => DATA_TYPE_RLE_GRAYSCALE,
        }
    }

    pub fn is_rle(self) -> bool {
        matches!(self, DataType::RleColor | DataType::RleGrayscale)
    }
}

/// The fixed 18-byte TGA header.
///
/// Multi-byte fields are little-endian on disk. The record is (de)serialized one
/// field at a time in declaration order, so there is never any padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id_length: u8,
    pub color_map_type: u8,
    pub data_type_code: u8,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl Header {
    pub const SIZE: usize = HEADER_SIZE;

    pub fn zeroed() -> Self {
        Self {
            id_length: 0,
            color_map_type: 0,
            data_type_code: 0,
            color_map_origin: 0,
            color_map_length: 0,
            color_map_depth: 0,
            x_origin: 0,
            y_origin: 0,
            width: 0,
            height: 0,
            bits_per_pixel: 0,
            image_descriptor: 0,
        }
    }

    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);

        Self {
            id_length: bytes[0],
            color_map_type: bytes[1],
            data_type_code: bytes[2],
            color_map_origin: u16_at(3),
            color_map_length: u16_at(5),
            color_map_depth: bytes[7],
            x_origin: u16_at(8),
            y_origin: u16_at(10),
            width: u16_at(12),
            height: u16_at(14),
            bits_per_pixel: bytes[16],
            image_descriptor: bytes[17],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0] = self.id_length;
        bytes[1] = self.color_map_type;
        bytes[2] = self.data_type_code;
        bytes[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        bytes[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        bytes[7] = self.color_map_depth;
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.bits_per_pixel;
        bytes[17] = self.image_descriptor;
        bytes
    }

    /// Whole bytes per pixel, as declared by `bits_per_pixel`.
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel >> 3) as usize
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_field_offsets() {
        let header = Header {
            data_type_code: DATA_TYPE_RLE_COLOR,
            width: 0x0201,
            height: 0x0403,
            bits_per_pixel: 32,
            image_descriptor: 0x20,
            ..Header::zeroed()
        };

        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), 18);
        assert_eq!(bytes[2], 10);
        assert_eq!(&bytes[12..16], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(bytes[16], 32);
        assert_eq!(bytes[17], 0x20);
        assert!(bytes[3..12].iter().all(|&b| b == 0));

        assert_eq!(Header::from_bytes(&bytes), header);
    }

    #[test]
    fn test_header_zeroed() {
        assert_eq!(Header::default().to_bytes(), [0u8; 18]);
    }

    #[test]
    fn test_format_from_bytes_per_pixel() {
        assert_eq!(Format::from_bytes_per_pixel(1), Some(Format::Grayscale));
        assert_eq!(Format::from_bytes_per_pixel(3), Some(Format::Rgb));
        assert_eq!(Format::from_bytes_per_pixel(4), Some(Format::Rgba));
        assert_eq!(Format::from_bytes_per_pixel(2), None);
        assert_eq!(Format::from_bytes_per_pixel(0), None);
        assert_eq!(Format::Rgb.bits_per_pixel(), 24);
    }

    #[test]
    fn test_data_type_codes() {
        assert_eq!(DataType::for_format(Format::Grayscale, false).code(), 3);
        assert_eq!(DataType::for_format(Format::Grayscale, true).code(), 11);
        assert_eq!(DataType::for_format(Format::Rgb, false).code(), 2);
        assert_eq!(DataType::for_format(Format::Rgba, true).code(), 10);
        assert_eq!(DataType::from_code(1), None);
        assert_eq!(DataType::from_code(9), None);
        assert!(DataType::from_code(11).is_some_and(DataType::is_rle));
    }
}
