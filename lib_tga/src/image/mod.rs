pub mod color;
pub mod decoder;
pub mod encoder;
pub mod format;
pub mod tga;

pub use decoder::decode;
pub use encoder::encode;
