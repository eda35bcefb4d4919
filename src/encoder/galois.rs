/// GF(256) arithmetic for QR codes
/// QR codes use the field generated by x^8 + x^4 + x^3 + x^2 + 1 (0x11D)
use std::sync::OnceLock;

const PRIMITIVE: u16 = 0x11D;

struct Tables {
    // Doubled so that exp[log a + log b] never needs a modulo
    exp: [u8; 512],
    log: [u8; 256],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE;
            }
        }
        for i in 255..512 {
            exp[i] = exp[i - 255];
        }
        Tables { exp, log }
    })
}

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        t.exp[t.log[a as usize] as usize + t.log[b as usize] as usize]
    }

    /// Returns `None` when dividing by zero
    pub fn div(a: u8, b: u8) -> Option<u8> {
        if b == 0 {
            return None;
        }
        if a == 0 {
            return Some(0);
        }
        let t = tables();
        Some(t.exp[t.log[a as usize] as usize + 255 - t.log[b as usize] as usize])
    }

    /// alpha^n where alpha = 2
    pub fn exp(n: usize) -> u8 {
        tables().exp[n % 255]
    }

    /// Multiply two polynomials with coefficients in descending degree order
    pub fn poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
        if p.is_empty() || q.is_empty() {
            return Vec::new();
        }
        let mut out = vec![0u8; p.len() + q.len() - 1];
        for (i, &a) in p.iter().enumerate() {
            for (j, &b) in q.iter().enumerate() {
                out[i + j] ^= Self::mul(a, b);
            }
        }
        out
    }

    /// Remainder of `data * x^(divisor.len() - 1)` divided by a monic `divisor`.
    ///
    /// Coefficients are in descending degree order; the remainder has exactly
    /// `divisor.len() - 1` coefficients.
    pub fn poly_rem(data: &[u8], divisor: &[u8]) -> Vec<u8> {
        let degree = divisor.len().saturating_sub(1);
        let mut remainder = vec![0u8; degree];
        if degree == 0 {
            return remainder;
        }
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[degree - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(&divisor[1..]) {
                *r ^= Self::mul(g, factor);
            }
        }
        remainder
    }

    /// Evaluate a descending-order polynomial at `x` (Horner)
    pub fn poly_eval(p: &[u8], x: u8) -> u8 {
        p.iter().fold(0u8, |acc, &c| Self::mul(acc, x) ^ c)
    }
}
