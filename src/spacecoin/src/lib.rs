#![no_std]

mod errors;
mod storage;

#[cfg(test)]
mod test;

use soroban_common::{fee::BPS_DENOMINATOR, math, Ownable, UNIT};
use soroban_common::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use soroban_sdk::{
    contract, contractevent, contractimpl, panic_with_error, token, Address, Env, MuxedAddress,
    String,
};
use soroban_sdk::token::TokenInterface;

pub use crate::errors::TokenError;
use crate::storage::{
    is_initialized, read_allowance, read_balance, read_collect_taxes, read_total_supply,
    read_treasury, receive_balance, spend_allowance, spend_balance, write_allowance,
    write_collect_taxes, write_total_supply, write_treasury,
};

pub const DECIMALS: u32 = 18;
pub const TOTAL_SUPPLY: i128 = 500_000 * UNIT;
/// 30,000 base units raised at 5 SPC each.
pub const ICO_ALLOCATION: i128 = 150_000 * UNIT;
/// 2% of every transfer while taxes are on.
pub const TAX_BPS: i128 = 200;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Approve {
    pub from: Address,
    pub spender: Address,
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Burn {
    pub from: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaxToggled {
    pub enabled: bool,
}

fn check_nonnegative_amount(env: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, TokenError::NegativeAmount);
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Debits `from` the full amount and credits `to`, diverting the tax
/// share to the treasury when taxes are on.
fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) {
    spend_balance(env, from, amount);

    let tax = if read_collect_taxes(env) {
        match math::mul_div(env, amount, TAX_BPS, BPS_DENOMINATOR) {
            Some(tax) => tax,
            None => panic_with_error!(env, TokenError::Overflow),
        }
    } else {
        0
    };

    if tax > 0 {
        let treasury = read_treasury(env);
        receive_balance(env, &treasury, tax);
        Transfer {
            from: from.clone(),
            to: treasury,
            amount: tax,
        }
        .publish(env);
    }

    receive_balance(env, to, amount - tax);
    Transfer {
        from: from.clone(),
        to: to.clone(),
        amount: amount - tax,
    }
    .publish(env);
}

/// SPC: fixed-supply fungible token with an optional transfer tax.
#[contract]
pub struct SpaceCoin;

impl Ownable for SpaceCoin {
    type Error = TokenError;
    const NOT_OWNER: TokenError = TokenError::OnlyOwner;
    const NOT_INITIALIZED: TokenError = TokenError::NotInitialized;
}

#[contractimpl]
impl SpaceCoin {
    /// Mints the whole supply: the ICO allocation to `ico`, the rest to
    /// `treasury`, which also receives every transfer tax.
    pub fn initialize(
        env: Env,
        owner: Address,
        treasury: Address,
        ico: Address,
    ) -> Result<(), TokenError> {
        if is_initialized(&env) {
            return Err(TokenError::AlreadyInitialized);
        }

        Self::write_owner(&env, &owner);
        write_treasury(&env, &treasury);
        write_collect_taxes(&env, false);
        write_total_supply(&env, TOTAL_SUPPLY);

        receive_balance(&env, &ico, ICO_ALLOCATION);
        receive_balance(&env, &treasury, TOTAL_SUPPLY - ICO_ALLOCATION);

        bump_instance(&env);
        Ok(())
    }

    pub fn toggle_tax(env: Env, caller: Address, enabled: bool) -> Result<(), TokenError> {
        Self::require_owner(&env, &caller)?;
        bump_instance(&env);

        write_collect_taxes(&env, enabled);
        TaxToggled { enabled }.publish(&env);
        Ok(())
    }

    pub fn collect_taxes(env: Env) -> bool {
        read_collect_taxes(&env)
    }

    pub fn treasury(env: Env) -> Address {
        read_treasury(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn owner(env: Env) -> Result<Address, TokenError> {
        Self::read_owner(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        bump_instance(&env);
        Self::transfer_owner(&env, &caller, &new_owner)
    }
}

#[contractimpl]
impl token::TokenInterface for SpaceCoin {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        bump_instance(&env);
        read_allowance(&env, &from, &spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        write_allowance(&env, &from, &spender, amount, expiration_ledger);
        Approve {
            from,
            spender,
            amount,
            expiration_ledger,
        }
        .publish(&env);
    }

    fn balance(env: Env, id: Address) -> i128 {
        bump_instance(&env);
        read_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        move_balance(&env, &from, &to.address(), amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        spend_allowance(&env, &from, &spender, amount);
        move_balance(&env, &from, &to, amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        spend_balance(&env, &from, amount);
        write_total_supply(&env, read_total_supply(&env) - amount);
        Burn { from, amount }.publish(&env);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        spend_allowance(&env, &from, &spender, amount);
        spend_balance(&env, &from, amount);
        write_total_supply(&env, read_total_supply(&env) - amount);
        Burn { from, amount }.publish(&env);
    }

    fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    fn name(env: Env) -> String {
        String::from_str(&env, "SpaceCoin")
    }

    fn symbol(env: Env) -> String {
        String::from_str(&env, "SPC")
    }
}
