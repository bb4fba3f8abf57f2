//! Byte sources consumed by [crate::BitCursor].

use std::io::{self, Read};

/// Yields one byte at a time, `Ok(None)` at end-of-input.
///
/// Implemented for every [Read], so slices, files and sockets all work. Wrap
/// unbuffered readers in [std::io::BufReader]: the cursor asks for one byte
/// per call.
pub trait ByteSource {
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R: Read> ByteSource for R {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
