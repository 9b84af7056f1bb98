//! Arithmetic over GF(256) with the QR reducing polynomial 0x11D.

use std::sync::LazyLock;

struct Tables {
    exp: [u8; 512],
    log: [u8; 256],
}

static TABLES: LazyLock<Tables> = LazyLock::new(|| {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];

    let mut value = 1u16;
    for power in 0..255 {
        exp[power] = value as u8;
        log[value as usize] = power as u8;

        value <<= 1;
        if value >= 0x100 {
            value ^= 0x11D;
        }
    }

    // Doubled so products of two logs never need a modulo.
    for power in 255..512 {
        exp[power] = exp[power - 255];
    }

    Tables { exp, log }
});

/// α^power.
pub fn exp(power: usize) -> u8 {
    TABLES.exp[power % 255]
}

pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }

    let tables = &*TABLES;
    tables.exp[tables.log[a as usize] as usize + tables.log[b as usize] as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_annihilates() {
        for value in 0..=255u8 {
            assert_eq!(mul(0, value), 0);
            assert_eq!(mul(value, 0), 0);
        }
    }

    #[test]
    fn one_is_the_identity() {
        for value in 0..=255u8 {
            assert_eq!(mul(1, value), value);
        }
    }

    #[test]
    fn generator_powers_cycle_through_the_field() {
        let mut seen = [false; 256];
        for power in 0..255 {
            let value = exp(power);
            assert!(!seen[value as usize], "α^{power} repeated early");
            seen[value as usize] = true;
        }
        assert!(!seen[0], "zero is not a power of α");
    }

    #[test]
    fn multiplication_is_commutative_and_associative() {
        let samples = [1u8, 2, 3, 29, 76, 140, 201, 255];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(mul(a, b), mul(b, a));
                for &c in &samples {
                    assert_eq!(mul(mul(a, b), c), mul(a, mul(b, c)));
                }
            }
        }
    }

    #[test]
    fn known_products() {
        // α^1 * α^1 = α^2 and the wraparound case x^8 = x^4+x^3+x^2+1.
        assert_eq!(mul(2, 2), 4);
        assert_eq!(mul(exp(7), 2), 0x1D);
    }
}
