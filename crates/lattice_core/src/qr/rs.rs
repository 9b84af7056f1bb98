//! Reed–Solomon error-correction codeword generation.

use super::gf;

/// Builds the generator polynomial of the given degree: the product of
/// (x - α^i) for i in 0..degree. Coefficients are returned highest
/// degree first, with the (implicit 1) leading coefficient included.
fn generator(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];

    for i in 0..degree {
        let root = gf::exp(i);
        let mut next = vec![0u8; poly.len() + 1];

        for (j, &coeff) in poly.iter().enumerate() {
            next[j] ^= coeff;
            next[j + 1] ^= gf::mul(coeff, root);
        }

        poly = next;
    }

    poly
}

/// Computes `degree` error-correction codewords for a data block.
///
/// This is the remainder of data(x)·x^degree divided by the generator
/// polynomial, which makes the concatenated block a valid RS codeword.
pub fn ec_codewords(data: &[u8], degree: usize) -> Vec<u8> {
    let generator = generator(degree);
    let mut remainder = vec![0u8; degree];

    for &byte in data {
        let factor = byte ^ remainder[0];
        remainder.rotate_left(1);
        remainder[degree - 1] = 0;

        // generator[0] is always 1; skip it.
        for (rem, &coeff) in remainder.iter_mut().zip(&generator[1..]) {
            *rem ^= gf::mul(coeff, factor);
        }
    }

    remainder
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluates a polynomial (highest degree first) at α^power.
    fn eval_at(poly: &[u8], power: usize) -> u8 {
        let x = gf::exp(power);
        poly.iter().fold(0u8, |acc, &coeff| gf::mul(acc, x) ^ coeff)
    }

    #[test]
    fn generator_has_unit_leading_coefficient() {
        for degree in [7usize, 10, 13, 17, 30] {
            let poly = generator(degree);
            assert_eq!(poly.len(), degree + 1);
            assert_eq!(poly[0], 1);
        }
    }

    #[test]
    fn generator_vanishes_at_its_roots() {
        let poly = generator(10);
        for power in 0..10 {
            assert_eq!(eval_at(&poly, power), 0, "α^{power} should be a root");
        }
        assert_ne!(eval_at(&poly, 10), 0);
    }

    #[test]
    fn codeword_syndromes_are_zero() {
        let data = [0x40u8, 0xD2, 0x75, 0x47, 0x76, 0x17, 0x32, 0x06, 0x27];
        let degree = 17;

        let ec = ec_codewords(&data, degree);
        assert_eq!(ec.len(), degree);

        let mut codeword = data.to_vec();
        codeword.extend_from_slice(&ec);

        for power in 0..degree {
            assert_eq!(
                eval_at(&codeword, power),
                0,
                "syndrome at α^{power} should vanish"
            );
        }
    }

    #[test]
    fn random_blocks_form_valid_codewords() {
        use rand::{Rng, SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let len = rng.random_range(1..=64);
            let degree = rng.random_range(7..=30);
            let data: Vec<u8> = (0..len).map(|_| rng.random()).collect();

            let ec = ec_codewords(&data, degree);
            let mut codeword = data;
            codeword.extend_from_slice(&ec);

            for power in 0..degree {
                assert_eq!(eval_at(&codeword, power), 0);
            }
        }
    }

    #[test]
    fn all_zero_data_produces_all_zero_parity() {
        assert!(ec_codewords(&[0; 19], 7).iter().all(|&b| b == 0));
    }
}
