/// Size of the fixed on-disk header record.
pub const HEADER_SIZE: usize = 18;

/// Uncompressed true-color image (BGR or BGRA).
pub const DATA_TYPE_RAW_COLOR: u8 = 2;
/// Uncompressed grayscale image.
pub const DATA_TYPE_RAW_GRAYSCALE: u8 = 3;
/// Run-length encoded true-color image.
pub const DATA_TYPE_RLE_COLOR: u8 = 10;
/// Run-length encoded grayscale image.
pub const DATA_TYPE_RLE_GRAYSCALE: u8 = 11;

/// Image descriptor bit: rows are stored top-to-bottom.
pub const DESCRIPTOR_TOP_ORIGIN: u8 = 0x20;
/// Image descriptor bit: columns are stored right-to-left.
pub const DESCRIPTOR_RIGHT_TO_LEFT: u8 = 0x10;

/// Longest run a single RLE packet can describe.
pub const MAX_PACKET_PIXELS: usize = 128;

/// Developer area offset, always zero.
pub const DEVELOPER_AREA_REF: [u8; 4] = [0; 4];
/// Extension area offset, always zero.
pub const EXTENSION_AREA_REF: [u8; 4] = [0; 4];
/// NUL-terminated footer signature.
pub const FOOTER_SIGNATURE: [u8; 18] = *b"TRUEVISION-XFILE.\0";
