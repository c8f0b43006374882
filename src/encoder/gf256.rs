/// GF(256) arithmetic for QR Reed-Solomon coding
/// Primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D), generator alpha = 2
pub struct Gf256;

const PRIMITIVE: u16 = 0x11D;

/// (EXP, LOG) tables. EXP is doubled so log sums never need a modulo.
const TABLES: ([u8; 512], [u8; 256]) = build_tables();

static EXP_TABLE: [u8; 512] = TABLES.0;
static LOG_TABLE: [u8; 256] = TABLES.1;

const fn build_tables() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    (exp, log)
}

impl Gf256 {
    /// Product of two field elements; zero operands give zero
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
    }

    /// Quotient a / b; division by zero is defined as zero
    pub fn div(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + 255 - LOG_TABLE[b as usize] as usize]
    }

    /// a^n for any exponent
    pub fn pow(a: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }

    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    /// Discrete log base alpha; `None` for zero
    pub fn log(a: u8) -> Option<u8> {
        (a != 0).then(|| LOG_TABLE[a as usize])
    }
}
