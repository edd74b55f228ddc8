use soroban_sdk::{contracttype, Env};

use crate::math;

/// Basis point denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;
/// Swap fee charged on the input side: 1%.
pub const DEFAULT_FEE_BPS: u32 = 100;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeState {
    pub fee_bps: u32,
}

impl Default for FeeState {
    fn default() -> Self {
        FeeState {
            fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

impl FeeState {
    /// The part of `amount_in` that counts toward the product invariant.
    pub fn amount_after_fee(&self, env: &Env, amount_in: i128) -> Option<i128> {
        let kept = BPS_DENOMINATOR.checked_sub(i128::from(self.fee_bps))?;
        math::mul_div(env, amount_in, kept, BPS_DENOMINATOR)
    }
}
