use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::errors::ErrorCode;

/// floor(a * b / c) with a 128-bit intermediate.
pub fn mul_div(a: u64, b: u64, c: u64) -> Result<u64> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    let quotient = product
        .checked_div(c as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(u64::try_from(quotient).map_err(|_| ErrorCode::MathOverflow)?)
}

/// floor(a * b / c) with a 256-bit intermediate, for the fixed-point accumulator.
pub fn mul_div_u256(a: U256, b: U256, c: U256) -> Result<U256> {
    let product = a.checked_mul(b).ok_or(ErrorCode::MathOverflow)?;
    let quotient = product.checked_div(c).ok_or(ErrorCode::MathOverflow)?;
    Ok(quotient)
}

pub fn u256_to_u64(value: U256) -> Result<u64> {
    Ok(u64::try_from(value).map_err(|_| ErrorCode::MathOverflow)?)
}

pub fn integer_sqrt(value: u128) -> u128 {
    if value <= 1 {
        return value;
    }
    let mut left: u128 = 1;
    let mut right: u128 = value;
    while left <= right {
        let mid = left + ((right - left) >> 1);
        match mid.checked_mul(mid) {
            Some(sq) if sq == value => return mid,
            Some(sq) if sq < value => left = mid + 1,
            _ => right = mid - 1,
        }
    }
    right
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div(100, 500, 10_000).unwrap(), 5);
        assert_eq!(mul_div(99, 500, 10_000).unwrap(), 4);
        assert_eq!(mul_div(u64::MAX, u64::MAX, u64::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn mul_div_rejects_zero_divisor_and_overflow() {
        assert!(mul_div(1, 1, 0).is_err());
        assert!(mul_div(u64::MAX, 2, 1).is_err());
    }

    #[test]
    fn integer_sqrt_matches_floor() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(15), 3);
        assert_eq!(integer_sqrt(16), 4);
        assert_eq!(integer_sqrt(5_000_000_000_000_000), 70_710_678);
        assert_eq!(integer_sqrt(u128::MAX), u64::MAX as u128);
    }
}
