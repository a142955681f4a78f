//! Little-endian bit field extraction
//!
//! CAN signals are described by a start bit and a length. With Intel
//! (little-endian) packing, bit 0 of the signal is bit `start % 8` of byte
//! `start / 8`, and higher signal bits continue upward through the byte and
//! into the following bytes.

/// Widest field that can be extracted, in bits
pub const MAX_FIELD_BITS: usize = 32;

/// Highest bit (exclusive) a field may reach: one classic 8-byte CAN payload
pub const MAX_SPAN_BITS: usize = 64;

/// Extract an unsigned little-endian bit field.
///
/// Returns 0 when the request is out of bounds: an empty or wider than
/// [`MAX_FIELD_BITS`] field, a field ending past [`MAX_SPAN_BITS`], or a
/// field that does not fit in `buf`. The decode schema is fixed, so such a
/// request is a programming error that tests catch.
pub fn extract_le(buf: &[u8], bit_offset: usize, bit_length: usize) -> u32 {
    if bit_length == 0 || bit_length > MAX_FIELD_BITS {
        return 0;
    }
    let end = match bit_offset.checked_add(bit_length) {
        Some(end) if end <= MAX_SPAN_BITS => end,
        _ => return 0,
    };
    if (end + 7) / 8 > buf.len() {
        return 0;
    }

    let mut index = bit_offset / 8;
    let shift = bit_offset % 8;

    // First, possibly partial, byte
    let take = (8 - shift).min(bit_length);
    let mut value = u64::from(buf[index] >> shift) & low_mask(take);
    let mut filled = take;

    // Interior and last bytes
    while filled < bit_length {
        index += 1;
        let take = (bit_length - filled).min(8);
        value |= (u64::from(buf[index]) & low_mask(take)) << filled;
        filled += take;
    }

    value as u32
}

#[inline]
fn low_mask(bits: usize) -> u64 {
    (1u64 << bits) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Bit-at-a-time model of the packing rules
    fn reference(buf: &[u8], bit_offset: usize, bit_length: usize) -> u32 {
        let mut value = 0u32;
        for i in 0..bit_length {
            let bit = bit_offset + i;
            if (buf[bit / 8] >> (bit % 8)) & 1 == 1 {
                value |= 1 << i;
            }
        }
        value
    }

    fn field() -> impl Strategy<Value = (usize, usize)> {
        (1usize..=MAX_FIELD_BITS)
            .prop_flat_map(|len| (0usize..=MAX_SPAN_BITS - len, Just(len)))
    }

    #[test]
    fn test_byte_aligned_u16() {
        let buf = [0xF4, 0x01, 0x5E, 0x01, 0, 0, 0, 0];
        assert_eq!(extract_le(&buf, 0, 16), 500);
        assert_eq!(extract_le(&buf, 16, 16), 350);
    }

    #[test]
    fn test_unaligned_field_spanning_bytes() {
        // 14-bit rpm at bit 16: 0x2AF8 = 11000, top two bits of byte 3 ignored
        let buf = [0, 0, 0xF8, 0xEA, 0, 0, 0, 0];
        assert_eq!(extract_le(&buf, 16, 14), 0x2AF8);
    }

    #[test]
    fn test_field_inside_one_byte() {
        let buf = [0b0110_1100];
        assert_eq!(extract_le(&buf, 2, 3), 0b011);
        assert_eq!(extract_le(&buf, 5, 3), 0b011);
    }

    #[test]
    fn test_full_width_field() {
        let buf = [0x78, 0x56, 0x34, 0x12, 0xFF];
        assert_eq!(extract_le(&buf, 0, 32), 0x1234_5678);
        assert_eq!(extract_le(&buf, 4, 32), 0xF123_4567);
    }

    #[test]
    fn test_out_of_bounds_yields_zero() {
        let buf = [0xFF; 9];
        assert_eq!(extract_le(&buf, 0, 0), 0);
        assert_eq!(extract_le(&buf, 0, 33), 0);
        assert_eq!(extract_le(&buf, 40, 25), 0);
        assert_eq!(extract_le(&buf, usize::MAX, 8), 0);
        // Field fits the span limit but not the buffer
        assert_eq!(extract_le(&buf[..2], 8, 16), 0);
    }

    proptest! {
        #[test]
        fn prop_matches_bitwise_model(
            buf in proptest::array::uniform8(any::<u8>()),
            (offset, len) in field(),
        ) {
            prop_assert_eq!(extract_le(&buf, offset, len), reference(&buf, offset, len));
        }

        #[test]
        fn prop_all_ones_buffer((offset, len) in field()) {
            let buf = [0xFF; 8];
            let expected = ((1u64 << len) - 1) as u32;
            prop_assert_eq!(extract_le(&buf, offset, len), expected);
        }

        #[test]
        fn prop_low_word_is_first_two_bytes(buf in proptest::array::uniform8(any::<u8>())) {
            let expected = u32::from(buf[0]) | (u32::from(buf[1]) << 8);
            prop_assert_eq!(extract_le(&buf, 0, 16), expected);
        }

        #[test]
        fn prop_result_fits_length(
            buf in proptest::array::uniform8(any::<u8>()),
            (offset, len) in field(),
        ) {
            let value = u64::from(extract_le(&buf, offset, len));
            prop_assert!(value < (1u64 << len));
        }
    }
}
