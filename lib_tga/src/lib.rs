pub mod compression;
pub mod constants;
pub mod image;

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub use crate::image::color::Pixel;
pub use crate::image::decoder::DecodeError;
pub use crate::image::encoder::{EncodeError, WriteOptions};
pub use crate::image::format::{DataType, Format, Header};
pub use crate::image::tga::TgaImage;
pub use crate::image::{decode, encode};

/// Routes the crate's log records to `path`, one `[LEVEL file:line] message` line each.
pub fn init_logging(path: impl AsRef<Path>) -> io::Result<()> {
    let target = Box::new(File::create(path)?);

    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(Some("lib_tga"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)
}
