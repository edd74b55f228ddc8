//! Integer helpers for reserve and share arithmetic.
//!
//! Amounts cross contract boundaries as `i128`, but the product of two
//! reserves does not fit in one. Every product here is formed in `U256`
//! and narrowed back only after the division, so the result is exact
//! floor arithmetic for every non-negative `i128` operand.

use soroban_sdk::{Env, U256};

/// Minimum liquidity locked on first mint to prevent division by zero.
pub const MINIMUM_LIQUIDITY: i128 = 1_000;

fn widen(env: &Env, value: i128) -> Option<U256> {
    u128::try_from(value).ok().map(|v| U256::from_u128(env, v))
}

fn narrow(value: &U256) -> Option<i128> {
    value.to_u128().and_then(|v| i128::try_from(v).ok())
}

/// `floor(a * b / denominator)`.
///
/// Returns `None` for negative operands, a non-positive denominator, or a
/// quotient that does not fit back into `i128`.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator <= 0 {
        return None;
    }
    let product = widen(env, a)?.mul(&widen(env, b)?);
    narrow(&product.div(&widen(env, denominator)?))
}

/// `floor(sqrt(a * b))` using Newton's method on the widened product.
pub fn sqrt_product(env: &Env, a: i128, b: i128) -> Option<i128> {
    let n = widen(env, a)?.mul(&widen(env, b)?);
    if n == U256::from_u32(env, 0) {
        return Some(0);
    }
    let two = U256::from_u32(env, 2);
    let mut x = n.clone();
    let mut y = x.add(&U256::from_u32(env, 1)).div(&two);
    while y < x {
        x = y;
        y = x.add(&n.div(&x)).div(&two);
    }
    narrow(&x)
}

/// Constant-product output for an input that has already had its fee
/// removed: `reserve_out * amount_in / (reserve_in + amount_in)`.
pub fn get_amount_out(
    env: &Env,
    amount_in_after_fee: i128,
    reserve_in: i128,
    reserve_out: i128,
) -> Option<i128> {
    if amount_in_after_fee < 0 || reserve_in < 0 || reserve_out < 0 {
        return None;
    }
    let denominator = reserve_in.checked_add(amount_in_after_fee)?;
    mul_div(env, reserve_out, amount_in_after_fee, denominator)
}

/// Whether `new_a * new_b >= old_a * old_b`.
pub fn product_not_decreased(
    env: &Env,
    new_a: i128,
    new_b: i128,
    old_a: i128,
    old_b: i128,
) -> Option<bool> {
    let new_k = widen(env, new_a)?.mul(&widen(env, new_b)?);
    let old_k = widen(env, old_a)?.mul(&widen(env, old_b)?);
    Some(new_k >= old_k)
}
