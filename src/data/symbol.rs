// symbol.rs - IUPAC nucleotide symbol table

/// Canonical codes for the four unambiguous bases.
pub const A: u8 = 0;
pub const C: u8 = 1;
pub const G: u8 = 2;
pub const T: u8 = 3;

/// Full-ambiguity code; also the target for any unrecognized input byte.
pub const N: u8 = 15;

/// Alignment gap code. Mask 0, resolution weight 0.
pub const GAP: u8 = 16;

/// Number of distinct symbol codes (15 IUPAC letters + N + gap).
pub const CODE_COUNT: usize = 17;

/// 4-bit possible-nucleotide bitmask per code (bit 0 = A, 1 = C, 2 = G, 3 = T).
const MASKS: [u8; CODE_COUNT] = [
    0b0001, // A
    0b0010, // C
    0b0100, // G
    0b1000, // T
    0b1000, // U -> T
    0b0101, // R = A|G (purine)
    0b1010, // Y = C|T (pyrimidine)
    0b0110, // S = C|G
    0b1001, // W = A|T
    0b1100, // K = G|T
    0b0011, // M = A|C
    0b1110, // B = C|G|T
    0b1101, // D = A|G|T
    0b1011, // H = A|C|T
    0b0111, // V = A|C|G
    0b1111, // N = A|C|G|T
    0b0000, // - (gap)
];

/// Encode one raw byte to its canonical symbol code (case-folded).
/// Any byte outside the known alphabet, including '?', maps to N.
pub fn encode(byte: u8) -> u8 {
    match byte.to_ascii_uppercase() {
        b'A' => 0,
        b'C' => 1,
        b'G' => 2,
        b'T' => 3,
        b'U' => 4,
        b'R' => 5,
        b'Y' => 6,
        b'S' => 7,
        b'W' => 8,
        b'K' => 9,
        b'M' => 10,
        b'B' => 11,
        b'D' => 12,
        b'H' => 13,
        b'V' => 14,
        b'N' => 15,
        b'-' => GAP,
        _ => N,
    }
}

/// Possible-nucleotide bitmask for a code.
#[inline]
pub fn mask(code: u8) -> u8 {
    MASKS[code as usize]
}

/// Resolution weight: 1/popcount(mask), 0.0 for the gap code.
#[inline]
pub fn weight(code: u8) -> f64 {
    let bits = MASKS[code as usize].count_ones();
    if bits == 0 {
        0.0
    } else {
        1.0 / bits as f64
    }
}

/// True for the four unambiguous base codes A, C, G, T.
#[inline]
pub fn is_unambiguous(code: u8) -> bool {
    code < 4
}

/// True when a code admits more than one base (mask popcount > 1).
/// Gaps and the singleton codes (A, C, G, T, U) are not ambiguous.
#[inline]
pub fn is_ambiguous(code: u8) -> bool {
    MASKS[code as usize].count_ones() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_canonical_bases() {
        assert_eq!(encode(b'A'), A);
        assert_eq!(encode(b'C'), C);
        assert_eq!(encode(b'G'), G);
        assert_eq!(encode(b'T'), T);
        for code in [A, C, G, T] {
            assert_eq!(mask(code).count_ones(), 1);
            assert_eq!(weight(code), 1.0);
            assert!(is_unambiguous(code));
        }
    }

    #[test]
    fn test_encode_case_folding() {
        assert_eq!(encode(b'a'), encode(b'A'));
        assert_eq!(encode(b'r'), encode(b'R'));
        assert_eq!(encode(b'n'), encode(b'N'));
    }

    #[test]
    fn test_unknown_bytes_map_to_full_ambiguity() {
        for byte in [b'?', b'X', b'*', b'.', b'1', b' '] {
            let code = encode(byte);
            assert_eq!(mask(code), 0b1111);
            assert_eq!(weight(code), 0.25);
        }
    }

    #[test]
    fn test_gap_has_empty_mask_and_zero_weight() {
        assert_eq!(encode(b'-'), GAP);
        assert_eq!(mask(GAP), 0);
        assert_eq!(weight(GAP), 0.0);
        assert!(!is_ambiguous(GAP));
    }

    #[test]
    fn test_degenerate_masks() {
        // R = A|G
        assert_eq!(mask(encode(b'R')), 0b0101);
        assert_eq!(weight(encode(b'R')), 0.5);
        // B = C|G|T
        assert_eq!(mask(encode(b'B')), 0b1110);
        assert!((weight(encode(b'B')) - 1.0 / 3.0).abs() < 1e-12);
        // U resolves to T only
        assert_eq!(mask(encode(b'U')), mask(T));
        assert!(!is_ambiguous(encode(b'U')));
    }
}
