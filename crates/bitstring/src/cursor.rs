//! Forward-only bit cursor over a [ByteSource].

use tracing::{debug, trace};

use crate::{
    bits::{Extracted, Unsigned, high_bits, shl_byte},
    errors::ReadError,
    source::ByteSource,
};

/// Reads unsigned values of 1 to 64 bits, MSB-first, from a byte source.
///
/// Bits left over from the last byte pulled are kept left-aligned in a
/// single byte and served before the source is touched again. The source
/// is never rewound.
pub struct BitCursor<S> {
    source: S,
    leftover: u8,
    valid: u8,
    started: bool,
}

impl<S: ByteSource> BitCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            leftover: 0,
            valid: 0,
            started: false,
        }
    }

    /// Reads `size` bits into a `T`. Fails without consuming anything if
    /// `size` exceeds `T::BITS`.
    ///
    /// A read of at most [BitCursor::leftover_bits] bits is served from the
    /// buffered byte without touching the source. A read that drains the
    /// input exactly is still [crate::Status::Complete]; the terminal
    /// [crate::Status::Exhausted] arrives on the next call, with 0 bits.
    pub fn read<T: Unsigned>(&mut self, size: u32) -> Result<Extracted<T>, ReadError> {
        if size > T::BITS {
            return Err(ReadError::SizeOverflow {
                requested: size,
                capacity: T::BITS,
            });
        }

        Ok(self.read_split(T::BITS, size)?.map(T::from_u64))
    }

    pub fn read_u8(&mut self, size: u32) -> Result<Extracted<u8>, ReadError> {
        self.read(size)
    }

    pub fn read_u16(&mut self, size: u32) -> Result<Extracted<u16>, ReadError> {
        self.read(size)
    }

    pub fn read_u32(&mut self, size: u32) -> Result<Extracted<u32>, ReadError> {
        self.read(size)
    }

    pub fn read_u64(&mut self, size: u32) -> Result<Extracted<u64>, ReadError> {
        self.read(size)
    }

    /// Reads `count` whole bytes, stopping at end-of-input.
    ///
    /// On exhaustion the bytes read so far are still returned. A trailing
    /// byte holding only some valid bits is pushed right-aligned; `bits`
    /// tells how many bits in the sequence are real.
    pub fn read_bytes(&mut self, count: usize) -> Result<Extracted<Vec<u8>>, ReadError> {
        let mut bytes = Vec::with_capacity(count);
        let mut bits = 0;

        for _ in 0..count {
            let byte = self.read_u8(8)?;
            if byte.bits > 0 {
                bytes.push(byte.value);
                bits += byte.bits;
            }
            if byte.is_exhausted() {
                trace!(requested = count, read = bytes.len(), "byte run cut short");
                return Ok(Extracted::exhausted(bytes, bits));
            }
        }

        Ok(Extracted::complete(bytes, bits))
    }

    /// Valid bits buffered from the last byte pulled.
    pub fn leftover_bits(&self) -> u32 {
        u32::from(self.valid)
    }

    /// Whether any byte has been pulled from the source yet.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Returns the source. Buffered leftover bits are lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    // Requests wider than half the capacity are read as a full half followed
    // by the remainder, most significant chunk first.
    fn read_split(&mut self, capacity: u32, size: u32) -> Result<Extracted<u64>, ReadError> {
        if capacity <= 8 || size <= 8 {
            return self.read_primitive(size);
        }

        let half = capacity / 2;
        if size <= half {
            return self.read_split(half, size);
        }

        let head = self.read_split(half, half)?;
        if head.is_exhausted() {
            return Ok(head);
        }

        let tail = self.read_split(half, size - half)?;

        Ok(Extracted {
            value: (head.value << tail.bits) | tail.value,
            bits: head.bits + tail.bits,
            status: tail.status,
        })
    }

    fn read_primitive(&mut self, size: u32) -> Result<Extracted<u64>, ReadError> {
        debug_assert!(size <= 8);

        if size == 0 {
            return Ok(Extracted::complete(0, 0));
        }

        let valid = u32::from(self.valid);

        if self.started && size <= valid {
            let value = high_bits(self.leftover, size);
            self.leftover = shl_byte(self.leftover, size);
            self.valid -= size as u8;
            return Ok(Extracted::complete(u64::from(value), size as usize));
        }

        let head = high_bits(self.leftover, valid);

        match self.source.next_byte()? {
            None => {
                debug!(remaining = valid, requested = size, "byte source exhausted");
                self.leftover = 0;
                self.valid = 0;
                Ok(Extracted::exhausted(u64::from(head), valid as usize))
            }
            Some(byte) => {
                trace!("pulled byte {byte:#04x}");
                let need = size - valid;
                let value = (u64::from(head) << need) | u64::from(high_bits(byte, need));

                self.leftover = shl_byte(byte, need);
                self.valid = (8 - need) as u8;
                self.started = true;

                Ok(Extracted::complete(value, size as usize))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::*;
    use crate::bits::Status;

    /// Counts reads so tests can check how often the source is touched.
    struct Counting<'a> {
        data: &'a [u8],
        reads: usize,
    }

    impl Read for Counting<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            self.data.read(buf)
        }
    }

    fn counting(data: &[u8]) -> BitCursor<Counting<'_>> {
        BitCursor::new(Counting { data, reads: 0 })
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_first_read_leaves_low_bits() {
        for size in 1..=8u32 {
            for byte in [0x00u8, 0xff, 0xaa, 0x55, 0xf0, 0x0f, 0x81] {
                let data = [byte];
                let mut cursor = BitCursor::new(&data[..]);
                let read = cursor.read_u8(size).unwrap();

                assert_eq!(read.value, byte >> (8 - size));
                assert_eq!(read.bits, size as usize);
                assert_eq!(cursor.leftover_bits(), 8 - size);
                assert_eq!(cursor.leftover, shl_byte(byte, size));
            }
        }
    }

    #[test]
    fn test_read_three_bits_from_head() {
        let mut cursor = BitCursor::new(&[0xaa, 0x55][..]);
        let read = cursor.read_u8(3).unwrap();

        assert_eq!(read.value, 0b101);
        assert_eq!(cursor.leftover_bits(), 5);
        assert_eq!(cursor.leftover, 0x50);
        assert!(cursor.is_started());
    }

    #[test]
    fn test_read_from_leftover_without_source() {
        let mut cursor = counting(&[0xaa, 0x55]);
        cursor.read_u8(3).unwrap();
        assert_eq!(cursor.get_ref().reads, 1);

        let read = cursor.read_u8(2).unwrap();
        assert_eq!(read.value, 0b01);
        assert_eq!(cursor.leftover_bits(), 3);
        assert_eq!(cursor.leftover, 0x40);
        assert_eq!(cursor.get_ref().reads, 1);

        // exactly the buffered bits: still no read
        let read = cursor.read_u8(3).unwrap();
        assert_eq!(read.value, 0b010);
        assert_eq!(cursor.leftover_bits(), 0);
        assert_eq!(cursor.get_ref().reads, 1);
    }

    #[test]
    fn test_read_across_byte_border() {
        let mut cursor = BitCursor::new(&[0xaa, 0x55][..]);
        cursor.read_u8(5).unwrap();

        // |10101 [010|01] 010101|
        let read = cursor.read_u8(5).unwrap();
        assert_eq!(read.value, 0b01001);
        assert_eq!(cursor.leftover_bits(), 6);
        assert_eq!(cursor.leftover, 0b0101_0100);
    }

    #[test]
    fn test_split_reads_match_single_read() {
        let byte = 0b1101_0110u8;
        for a in 1..8u32 {
            for b in 1..=(8 - a) {
                let data = [byte];
                let mut split = BitCursor::new(&data[..]);
                let first = split.read_u8(a).unwrap().value;
                let second = split.read_u8(b).unwrap().value;

                let mut whole = BitCursor::new(&data[..]);
                let joined = whole.read_u8(a + b).unwrap().value;

                assert_eq!((first << b) | second, joined, "a={a} b={b}");
            }
        }
    }

    #[test]
    fn test_byte_reads_round_trip() {
        let data: Vec<u8> = (0..=255u8).collect();
        let mut cursor = BitCursor::new(&data[..]);

        for &expected in &data {
            let read = cursor.read_u8(8).unwrap();
            assert_eq!(read.value, expected);
            assert_eq!(read.status, Status::Complete);
        }
        assert!(cursor.read_u8(8).unwrap().is_exhausted());
    }

    #[test]
    fn test_wide_reads() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];
        let mut cursor = BitCursor::new(&data[..]);

        assert_eq!(cursor.read_u16(12).unwrap().value, 0x123);
        assert_eq!(cursor.read_u32(20).unwrap().value, 0x4_5678);
        assert_eq!(cursor.read_u64(32).unwrap().value, 0x9abc_def0);
        assert!(cursor.read_u8(1).unwrap().is_exhausted());
    }

    #[test]
    fn test_full_width_u64() {
        let data = [0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32, 0x10];
        let mut cursor = BitCursor::new(&data[..]);

        let read = cursor.read_u64(64).unwrap();
        assert_eq!(read.value, 0xfedc_ba98_7654_3210);
        assert_eq!(read.bits, 64);
        assert_eq!(read.status, Status::Complete);
    }

    #[test]
    fn test_unaligned_wide_read() {
        let data = [0b1011_1111, 0xff, 0xff, 0xff, 0xff, 0b1110_0000];
        let mut cursor = BitCursor::new(&data[..]);

        assert_eq!(cursor.read_u8(2).unwrap().value, 0b10);
        assert_eq!(cursor.read_u64(41).unwrap().value, 0x1ff_ffff_ffff);
        assert_eq!(cursor.read_u8(5).unwrap().value, 0);
    }

    #[test]
    fn test_size_overflow_reads_nothing() {
        let mut cursor = counting(&[0xff, 0xff]);

        let err = cursor.read_u8(9).unwrap_err();
        assert!(matches!(
            err,
            ReadError::SizeOverflow {
                requested: 9,
                capacity: 8
            }
        ));
        assert!(matches!(
            cursor.read_u16(17).unwrap_err(),
            ReadError::SizeOverflow { capacity: 16, .. }
        ));
        assert!(matches!(
            cursor.read_u32(33).unwrap_err(),
            ReadError::SizeOverflow { capacity: 32, .. }
        ));
        assert!(matches!(
            cursor.read_u64(65).unwrap_err(),
            ReadError::SizeOverflow { capacity: 64, .. }
        ));
        assert_eq!(cursor.get_ref().reads, 0);
        assert!(!cursor.is_started());
    }

    #[test]
    fn test_zero_size_reads_nothing() {
        let mut cursor = counting(&[0xff]);
        let read = cursor.read_u32(0).unwrap();

        assert_eq!(read.value, 0);
        assert_eq!(read.bits, 0);
        assert_eq!(cursor.get_ref().reads, 0);
    }

    #[test]
    fn test_exhausted_returns_leftover() {
        let mut cursor = BitCursor::new(&[0b1110_0101][..]);
        cursor.read_u8(3).unwrap();

        let read = cursor.read_u8(8).unwrap();
        assert_eq!(read.status, Status::Exhausted);
        assert_eq!(read.value, 0b00101);
        assert_eq!(read.bits, 5);
        assert_eq!(cursor.leftover_bits(), 0);

        let again = cursor.read_u8(1).unwrap();
        assert!(again.is_exhausted());
        assert_eq!(again.bits, 0);
        assert_eq!(again.value, 0);
    }

    #[test]
    fn test_exhausted_one_read_after_draining() {
        let mut cursor = counting(&[0xa5]);

        let head = cursor.read_u8(4).unwrap();
        let tail = cursor.read_u8(4).unwrap();
        assert_eq!((head.value, tail.value), (0xa, 0x5));
        assert_eq!(tail.status, Status::Complete);
        assert_eq!(cursor.get_ref().reads, 1);

        let end = cursor.read_u8(1).unwrap();
        assert!(end.is_exhausted());
        assert_eq!(end.bits, 0);
        assert_eq!(end.value, 0);
    }

    #[test]
    fn test_exhausted_on_empty_source() {
        let mut cursor = BitCursor::new(&[0u8; 0][..]);
        let read = cursor.read_u64(40).unwrap();

        assert!(read.is_exhausted());
        assert_eq!(read.bits, 0);
        assert!(!cursor.is_started());
    }

    #[test]
    fn test_exhausted_inside_wide_read() {
        let data = [0xab, 0xcd, 0xef];
        let mut cursor = BitCursor::new(&data[..]);

        let read = cursor.read_u32(32).unwrap();
        assert!(read.is_exhausted());
        assert_eq!(read.bits, 24);
        assert_eq!(read.value, 0xab_cdef);
    }

    #[test]
    fn test_exhausted_bit_accounting() {
        let data = [0x5a, 0xc3, 0x7e];
        let mut cursor = BitCursor::new(&data[..]);
        let mut total = 0;

        loop {
            let read = cursor.read_u16(7).unwrap();
            total += read.bits;
            if read.is_exhausted() {
                break;
            }
        }

        assert_eq!(total, data.len() * 8);
    }

    #[test]
    fn test_read_bytes() {
        let data = [0b0001_0010, 0b0011_0100, 0b0101_0110];
        let mut cursor = BitCursor::new(&data[..]);
        cursor.read_u8(4).unwrap();

        let read = cursor.read_bytes(2).unwrap();
        assert_eq!(read.value, vec![0x23, 0x45]);
        assert_eq!(read.bits, 16);
        assert_eq!(read.status, Status::Complete);
    }

    #[test]
    fn test_read_bytes_partial() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = BitCursor::new(&data[..]);

        let read = cursor.read_bytes(5).unwrap();
        assert_eq!(read.value, vec![0x01, 0x02, 0x03]);
        assert_eq!(read.bits, 24);
        assert!(read.is_exhausted());
    }

    #[test]
    fn test_read_bytes_partial_trailing_bits() {
        let data = [0xff, 0b1010_1111];
        let mut cursor = BitCursor::new(&data[..]);
        cursor.read_u8(4).unwrap();

        let read = cursor.read_bytes(2).unwrap();
        assert_eq!(read.value, vec![0xfa, 0x0f]);
        assert_eq!(read.bits, 12);
        assert!(read.is_exhausted());
    }

    #[test]
    fn test_source_error_propagates() {
        let mut cursor = BitCursor::new(Broken);
        let err = cursor.read_u8(1).unwrap_err();

        match err {
            ReadError::Source(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
