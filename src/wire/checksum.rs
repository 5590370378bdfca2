//! The internet checksum (RFC 1071).
//!
//! Summation is done on 32 bit words and folded to 16 bits at the end. Buffers may start at any
//! alignment: an odd start flips the parity of every octet position, which the final byte swap
//! undoes again, so the result depends only on the octets themselves.

use byteorder::{ByteOrder, NetworkEndian};

/// Compute the internet checksum of a buffer.
///
/// Returns the complemented sum, ready for insertion into a checksum field. A header whose
/// checksum field already holds the correct value sums to zero, so validation reads
/// `data(header) == 0`.
pub fn data(mut data: &[u8]) -> u16 {
    let offset = data.as_ptr() as usize & 3;
    let mut accum: u64 = 0xffff;

    // A lead-in up to the next word boundary, summed as if the word began at the boundary
    // before the buffer with the missing octets taken as zero.
    if offset > 0 && !data.is_empty() {
        let count = (4 - offset).min(data.len());
        let mut word = [0u8; 4];
        word[offset..offset + count].copy_from_slice(&data[..count]);
        accum += u64::from(NetworkEndian::read_u32(&word));
        data = &data[count..];
    }

    while data.len() >= 4 {
        accum += u64::from(NetworkEndian::read_u32(data));
        data = &data[4..];
    }

    // Trailing octets pad with zeroes to a full word.
    if !data.is_empty() {
        let mut word = [0u8; 4];
        word[..data.len()].copy_from_slice(data);
        accum += u64::from(NetworkEndian::read_u32(&word));
    }

    let mut sum = (accum & 0xffff_ffff) + (accum >> 32);
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }

    let mut sum = sum as u16;
    if offset & 1 != 0 {
        sum = sum.swap_bytes();
    }

    !sum
}

#[cfg(test)]
mod tests {
    use super::*;

    // An IPv4 header with the checksum field (octets 10 and 11) zeroed.
    static HEADER_UNSUMMED: [u8; 20] = [
        0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11,
        0x00, 0x00, 0xc0, 0xa8, 0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7];

    // The same header with the checksum filled in.
    static HEADER_SUMMED: [u8; 20] = [
        0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11,
        0xb8, 0x61, 0xc0, 0xa8, 0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7];

    #[test]
    fn known_header() {
        assert_eq!(data(&HEADER_UNSUMMED[..]), 0xb861);
    }

    #[test]
    fn summed_header_is_zero() {
        assert_eq!(data(&HEADER_SUMMED[..]), 0);
    }

    #[test]
    fn trailing_octets() {
        assert_eq!(data(&[0x12, 0x34]), !0x1234);
        assert_eq!(data(&[0xff]), !0xff00);
        assert_eq!(data(&[]), 0);
    }

    #[test]
    fn any_alignment() {
        #[repr(align(4))]
        struct Aligned([u8; 24]);

        let mut buffer = Aligned([0; 24]);
        for shift in 0..4 {
            buffer.0[shift..shift + 20].copy_from_slice(&HEADER_UNSUMMED[..]);
            assert_eq!(data(&buffer.0[shift..shift + 20]), 0xb861);
            buffer.0[shift..shift + 20].copy_from_slice(&HEADER_SUMMED[..]);
            assert_eq!(data(&buffer.0[shift..shift + 20]), 0);
        }
    }
}
