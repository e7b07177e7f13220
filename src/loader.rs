//! Program-image loading and length validation.
//!
//! The loader is the boundary in front of the core: it reads a binary image
//! from a file or any reader, rejects empty or oversized images with
//! [`LoaderError::InvalidProgramLength`], and hands valid ones to
//! [`ReadOnly::from_image`], which zero-pads short images to the full
//! 256-byte space. The core itself never sees an invalid length.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::LoaderError;
use crate::memory::{MEMORY_SIZE, ReadOnly};

/// Read a full program image from `reader` and build program memory.
pub fn from_reader<R: Read>(mut reader: R) -> Result<ReadOnly, LoaderError> {
    let mut image = Vec::new();
    reader.read_to_end(&mut image)?;

    let len = image.len();
    if len < 1 || len > MEMORY_SIZE {
        return Err(LoaderError::InvalidProgramLength { len });
    }
    debug!("loaded {len}-byte program image");

    Ok(ReadOnly::from_image(&image))
}

/// Open `path` and load the program image from it.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ReadOnly, LoaderError> {
    from_reader(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn short_image_loads_zero_padded() {
        let m = from_reader(Cursor::new(vec![0x06, 0x05, 0x00, 0x0F])).unwrap();
        assert_eq!(m.read(0, 4).unwrap(), &[0x06, 0x05, 0x00, 0x0F]);
        assert!(m.as_slice()[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn exact_capacity_image_loads() {
        let image: Vec<u8> = vec![0x0F; 256];
        let m = from_reader(Cursor::new(image.clone())).unwrap();
        assert_eq!(m.as_slice(), &image[..]);
    }

    #[test]
    fn empty_image_rejected() {
        let err = from_reader(Cursor::new(Vec::new())).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidProgramLength { len: 0 }));
    }

    #[test]
    fn oversized_image_rejected() {
        let err = from_reader(Cursor::new(vec![0u8; 257])).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::InvalidProgramLength { len: 257 }
        ));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = from_path("/definitely/not/here.bin").unwrap_err();
        assert!(matches!(err, LoaderError::Io(_)));
    }
}
