//! UTF-8 encoding and decoding without allocation.
//!
//! Both directions validate strictly: surrogates (`U+D800..=U+DFFF`), values
//! above `U+10FFFF` and overlong forms are rejected. A rejected value never
//! aborts the caller; it produces the replacement character `U+FFFD` with
//! `valid == false`, and a failed decode always consumes exactly one byte so
//! scanning can resynchronise.
//!
//! # Byte shapes
//!
//! ```text
//! 0xxx_xxxx                                 U+0000   ..= U+007F
//! 110x_xxxx 10xx_xxxx                       U+0080   ..= U+07FF
//! 1110_xxxx 10xx_xxxx 10xx_xxxx             U+0800   ..= U+FFFF
//! 1111_0xxx 10xx_xxxx 10xx_xxxx 10xx_xxxx   U+10000  ..= U+10FFFF
//! ```

/// `U+FFFD REPLACEMENT CHARACTER`, reported for every rejected value.
pub const REPLACEMENT: u32 = 0xFFFD;

/// Largest Unicode scalar value.
pub const MAX_SCALAR: u32 = 0x10_FFFF;

const RANGE1: u32 = 0x7F;
const RANGE2: u32 = 0x7FF;
const RANGE3: u32 = 0xFFFF;

const SURROGATE_FIRST: u32 = 0xD800;
const SURROGATE_LAST: u32 = 0xDFFF;

const MASK2: u8 = 0b0001_1111;
const MASK3: u8 = 0b0000_1111;
const MASK4: u8 = 0b0000_0111;
const MASKX: u8 = 0b0011_1111;

const SIZE2: u8 = 0b1100_0000;
const SIZE3: u8 = 0b1110_0000;
const SIZE4: u8 = 0b1111_0000;
const CONT: u8 = 0b1000_0000;

/// Result of [`encode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf8Encoded {
    /// Encoded bytes; only the first `len` are meaningful.
    pub bytes: [u8; 4],
    /// Number of bytes used (1..=4).
    pub len: usize,
    /// `false` when the input was rejected and `bytes` hold `U+FFFD`.
    pub valid: bool,
}

impl Utf8Encoded {
    /// The encoded sequence.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Result of [`decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf8Decoded {
    /// Decoded scalar value, or [`REPLACEMENT`] on failure.
    pub codepoint: u32,
    /// Bytes consumed; always 1 on failure.
    pub len: usize,
    pub valid: bool,
}

impl Utf8Decoded {
    /// The decoded value as a `char`.
    #[inline]
    pub fn as_char(&self) -> char {
        char::from_u32(self.codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

const ENCODE_ERROR: Utf8Encoded = Utf8Encoded {
    bytes: [0xEF, 0xBF, 0xBD, 0x00],
    len: 3,
    valid: false,
};

const DECODE_ERROR: Utf8Decoded = Utf8Decoded {
    codepoint: REPLACEMENT,
    len: 1,
    valid: false,
};

/// Whether `byte` has the continuation shape `10xx_xxxx`.
#[inline]
pub const fn is_continuation_byte(byte: u8) -> bool {
    byte & 0b1100_0000 == CONT
}

#[inline]
const fn is_surrogate(codepoint: u32) -> bool {
    codepoint >= SURROGATE_FIRST && codepoint <= SURROGATE_LAST
}

/// Encode a scalar value.
///
/// Surrogates and values above [`MAX_SCALAR`] encode as `U+FFFD` with
/// `valid == false`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "every shifted value is masked to at most 7 bits first"
)]
pub const fn encode(codepoint: u32) -> Utf8Encoded {
    if is_surrogate(codepoint) || codepoint > MAX_SCALAR {
        return ENCODE_ERROR;
    }

    let c = codepoint;
    let x = MASKX as u32;
    if c <= RANGE1 {
        Utf8Encoded {
            bytes: [c as u8, 0, 0, 0],
            len: 1,
            valid: true,
        }
    } else if c <= RANGE2 {
        Utf8Encoded {
            bytes: [
                SIZE2 | ((c >> 6) & MASK2 as u32) as u8,
                CONT | (c & x) as u8,
                0,
                0,
            ],
            len: 2,
            valid: true,
        }
    } else if c <= RANGE3 {
        Utf8Encoded {
            bytes: [
                SIZE3 | ((c >> 12) & MASK3 as u32) as u8,
                CONT | ((c >> 6) & x) as u8,
                CONT | (c & x) as u8,
                0,
            ],
            len: 3,
            valid: true,
        }
    } else {
        Utf8Encoded {
            bytes: [
                SIZE4 | ((c >> 18) & MASK4 as u32) as u8,
                CONT | ((c >> 12) & x) as u8,
                CONT | ((c >> 6) & x) as u8,
                CONT | (c & x) as u8,
            ],
            len: 4,
            valid: true,
        }
    }
}

/// Decode the sequence at the start of `buf`.
///
/// Fails (codepoint `U+FFFD`, `len == 1`) when `buf` is empty, the lead byte
/// has none of the four shapes, the sequence is truncated, a continuation
/// byte is malformed, or the value is a surrogate, above [`MAX_SCALAR`], or
/// overlong.
pub fn decode(buf: &[u8]) -> Utf8Decoded {
    let Some(&first) = buf.first() else {
        return DECODE_ERROR;
    };

    let (len, lead_bits, min) = match first {
        0x00..=0x7F => {
            return Utf8Decoded {
                codepoint: u32::from(first),
                len: 1,
                valid: true,
            }
        }
        0xC0..=0xDF => (2, first & MASK2, RANGE1 + 1),
        0xE0..=0xEF => (3, first & MASK3, RANGE2 + 1),
        0xF0..=0xF7 => (4, first & MASK4, RANGE3 + 1),
        _ => return DECODE_ERROR,
    };

    let Some(tail) = buf.get(1..len) else {
        return DECODE_ERROR;
    };

    let mut codepoint = u32::from(lead_bits);
    for &byte in tail {
        if !is_continuation_byte(byte) {
            return DECODE_ERROR;
        }
        codepoint = (codepoint << 6) | u32::from(byte & MASKX);
    }

    if codepoint < min || is_surrogate(codepoint) || codepoint > MAX_SCALAR {
        return DECODE_ERROR;
    }

    Utf8Decoded {
        codepoint,
        len,
        valid: true,
    }
}

/// Bidirectional cursor over a UTF-8 byte buffer.
///
/// Forward iteration decodes at the cursor and advances by the consumed
/// length. [`prev`](Self::prev) undoes exactly one step of forward iteration,
/// including steps over invalid bytes, back to the offset the iterator
/// started at.
#[derive(Clone, Debug)]
pub struct Utf8Iterator<'a> {
    data: &'a [u8],
    current: usize,
    /// Offset given to [`at`](Self::at); `0` for [`new`](Self::new).
    origin: usize,
}

impl<'a> Utf8Iterator<'a> {
    /// Start at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            current: 0,
            origin: 0,
        }
    }

    /// Start at byte `offset` of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `offset > data.len()`.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        assert!(
            offset <= data.len(),
            "offset {offset} is past the end of a {}-byte buffer",
            data.len()
        );
        Self {
            data,
            current: offset,
            origin: offset,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.current..]
    }

    /// Step back one codepoint and decode it.
    ///
    /// Walks back over at most three continuation bytes looking for a lead
    /// byte whose valid sequence ends exactly at the cursor. If there is
    /// none, the single preceding byte is stepped over as an invalid unit.
    /// While the cursor is past the starting offset, the walk never crosses
    /// it, so a sequence straddling the start is not decoded as a whole.
    /// Returns `None` at the start of the buffer.
    pub fn prev(&mut self) -> Option<Utf8Decoded> {
        if self.current == 0 {
            return None;
        }

        let end = self.current;
        let origin = if end > self.origin { self.origin } else { 0 };
        let floor = end.saturating_sub(4).max(origin);
        let mut start = end - 1;
        while start > floor && is_continuation_byte(self.data[start]) {
            start -= 1;
        }

        let decoded = decode(&self.data[start..end]);
        if decoded.valid && start + decoded.len == end {
            self.current = start;
            return Some(decoded);
        }

        self.current = end - 1;
        Some(DECODE_ERROR)
    }
}

impl Iterator for Utf8Iterator<'_> {
    type Item = Utf8Decoded;

    fn next(&mut self) -> Option<Utf8Decoded> {
        if self.current >= self.data.len() {
            return None;
        }
        let decoded = decode(&self.data[self.current..]);
        self.current += decoded.len;
        Some(decoded)
    }
}
