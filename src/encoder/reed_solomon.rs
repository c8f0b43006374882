//! Reed-Solomon error correction encoding for QR codes
//! Generator polynomial of degree n has roots alpha^0 .. alpha^(n-1) over GF(256)

use super::gf256::Gf256;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Degrees whose generator polynomials are memoized. QR blocks use at most 30.
const CACHED_DEGREES: usize = 256;

static GENERATORS: [OnceLock<Box<[u8]>>; CACHED_DEGREES] =
    [const { OnceLock::new() }; CACHED_DEGREES];

/// Generator polynomial coefficients in descending order, leading 1 omitted.
pub fn generator_polynomial(degree: usize) -> Cow<'static, [u8]> {
    match GENERATORS.get(degree) {
        Some(slot) => {
            Cow::Borrowed(&slot.get_or_init(|| build_generator(degree).into_boxed_slice())[..])
        }
        None => Cow::Owned(build_generator(degree)),
    }
}

fn build_generator(degree: usize) -> Vec<u8> {
    if degree == 0 {
        return Vec::new();
    }
    // Multiply (x - alpha^i) together, starting from the monomial 1
    let mut poly = vec![0u8; degree];
    poly[degree - 1] = 1;
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            poly[j] = Gf256::mul(poly[j], root);
            if j + 1 < degree {
                poly[j] ^= poly[j + 1];
            }
        }
        root = Gf256::mul(root, 0x02);
    }
    poly
}

/// Reed-Solomon encoder for one error correction block size
pub struct ReedSolomonEncoder {
    generator: Cow<'static, [u8]>,
}

impl ReedSolomonEncoder {
    /// Encoder producing `ec_count` EC codewords per block
    pub fn new(ec_count: usize) -> Self {
        Self {
            generator: generator_polynomial(ec_count),
        }
    }

    /// Number of error correction codewords produced per block
    pub fn ec_count(&self) -> usize {
        self.generator.len()
    }

    /// Generator coefficients, leading 1 omitted
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// Remainder of data(x) * x^n divided by the generator, n = `ec_count`
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let degree = self.generator.len();
        let mut remainder = vec![0u8; degree];
        if degree == 0 {
            return remainder;
        }
        for &byte in data {
            let factor = byte ^ remainder[0];
            remainder.rotate_left(1);
            remainder[degree - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(self.generator.iter()) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        remainder
    }
}

/// Error correction codewords for one block
pub fn ec_codewords(data: &[u8], ec_count: usize) -> Vec<u8> {
    ReedSolomonEncoder::new(ec_count).encode(data)
}
