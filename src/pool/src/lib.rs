#![no_std]

mod errors;
mod events;
mod storage;


use soroban_common::math::{self, MINIMUM_LIQUIDITY};
use soroban_common::{FeeState, Ownable, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String};

pub use crate::errors::PoolError;
use crate::events::{Burn, CreditApproval, CreditTransfer, Mint, ReservesSynced, Swap};
use crate::storage::PoolStorage;

/// The all-zero account. Holds the permanently locked `MINIMUM_LIQUIDITY`.
pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(
        env,
        "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
    ))
}

fn is_zero_address(env: &Env, address: &Address) -> bool {
    address == &zero_address(env)
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Runs `f` holding the reentrancy lock.
fn with_lock<T>(env: &Env, f: impl FnOnce() -> Result<T, PoolError>) -> Result<T, PoolError> {
    storage::enter(env)?;
    let result = f();
    storage::exit(env);
    result
}

/// Actual (base, token) balances held by this contract.
fn current_balances(env: &Env, pool: &PoolStorage) -> (i128, i128) {
    let this = env.current_contract_address();
    let base = token::Client::new(env, &pool.base_asset).balance(&this);
    let token = token::Client::new(env, &pool.token).balance(&this);
    (base, token)
}

fn mint_credits(env: &Env, to: &Address) -> Result<i128, PoolError> {
    let mut pool = storage::read_pool(env)?;
    let (balance_base, balance_token) = current_balances(env, &pool);
    let delta_base = (balance_base - pool.reserve_base).max(0);
    let delta_token = (balance_token - pool.reserve_token).max(0);
    if delta_base == 0 && delta_token == 0 {
        return Err(PoolError::Unmintable);
    }

    let total_supply = storage::read_total_supply(env);
    let (credits, locked) = if total_supply == 0 {
        let root = math::sqrt_product(env, delta_base, delta_token).ok_or(PoolError::Overflow)?;
        (root - MINIMUM_LIQUIDITY, MINIMUM_LIQUIDITY)
    } else {
        let from_base = math::mul_div(env, delta_base, total_supply, pool.reserve_base)
            .ok_or(PoolError::Overflow)?;
        let from_token = math::mul_div(env, delta_token, total_supply, pool.reserve_token)
            .ok_or(PoolError::Overflow)?;
        (from_base.min(from_token), 0)
    };
    if credits <= 0 {
        log!(env, "deposit too small to mint", delta_base, delta_token);
        return Err(PoolError::Unmintable);
    }

    if locked > 0 {
        let sink = zero_address(env);
        storage::write_balance(env, &sink, locked);
    }
    let balance = storage::read_balance(env, to);
    storage::write_balance(env, to, balance + credits);
    let new_supply = total_supply
        .checked_add(credits + locked)
        .ok_or(PoolError::Overflow)?;
    storage::write_total_supply(env, new_supply);

    pool.reserve_base = balance_base;
    pool.reserve_token = balance_token;
    storage::write_pool(env, &pool);

    Mint {
        to: to.clone(),
        base_amount: delta_base,
        token_amount: delta_token,
        credits,
    }
    .publish(env);
    ReservesSynced {
        reserve_base: pool.reserve_base,
        reserve_token: pool.reserve_token,
    }
    .publish(env);

    Ok(credits)
}

fn burn_credits(env: &Env, to: &Address) -> Result<(i128, i128), PoolError> {
    let mut pool = storage::read_pool(env)?;
    let this = env.current_contract_address();
    let liquidity = storage::read_balance(env, &this);
    if liquidity <= 0 {
        return Err(PoolError::InsufficientLiquidity);
    }

    let total_supply = storage::read_total_supply(env);
    let base_out =
        math::mul_div(env, liquidity, pool.reserve_base, total_supply).ok_or(PoolError::Overflow)?;
    let token_out = math::mul_div(env, liquidity, pool.reserve_token, total_supply)
        .ok_or(PoolError::Overflow)?;

    let (balance_base, balance_token) = current_balances(env, &pool);
    storage::write_balance(env, &this, 0);
    storage::write_total_supply(env, total_supply - liquidity);
    pool.reserve_base = balance_base
        .checked_sub(base_out)
        .ok_or(PoolError::Overflow)?;
    pool.reserve_token = balance_token
        .checked_sub(token_out)
        .ok_or(PoolError::Overflow)?;
    storage::write_pool(env, &pool);

    if base_out > 0 {
        token::Client::new(env, &pool.base_asset).transfer(&this, to, &base_out);
    }
    if token_out > 0 {
        token::Client::new(env, &pool.token).transfer(&this, to, &token_out);
    }

    Burn {
        to: to.clone(),
        credits: liquidity,
        base_out,
        token_out,
    }
    .publish(env);
    ReservesSynced {
        reserve_base: pool.reserve_base,
        reserve_token: pool.reserve_token,
    }
    .publish(env);

    Ok((base_out, token_out))
}

/// Pays exactly `amount_out` of the opposite asset for whatever was
/// deposited on the input side since the last sync. The amount is taken
/// as given and only accepted if the fee-adjusted product does not drop.
fn swap_exact_out(
    env: &Env,
    to: &Address,
    amount_out: i128,
    base_in: bool,
) -> Result<(), PoolError> {
    let mut pool = storage::read_pool(env)?;
    let fee_state = storage::read_fee_state(env)?;
    let (balance_base, balance_token) = current_balances(env, &pool);

    let (balance_in, reserve_in, reserve_out) = if base_in {
        (balance_base, pool.reserve_base, pool.reserve_token)
    } else {
        (balance_token, pool.reserve_token, pool.reserve_base)
    };

    let deposit = balance_in - reserve_in;
    if deposit <= 0 {
        return Err(PoolError::InsufficientDeposit);
    }
    if amount_out <= 0 {
        return Err(PoolError::InsufficientOutputAmount);
    }
    if amount_out >= reserve_out {
        return Err(PoolError::InsufficientLiquidity);
    }

    let net_in = fee_state
        .amount_after_fee(env, deposit)
        .ok_or(PoolError::Overflow)?;
    let new_in = reserve_in.checked_add(net_in).ok_or(PoolError::Overflow)?;
    let kept = math::product_not_decreased(env, new_in, reserve_out - amount_out, reserve_in, reserve_out)
        .ok_or(PoolError::Overflow)?;
    if !kept {
        log!(env, "swap rejected: product decreased", deposit, amount_out);
        return Err(PoolError::InvalidK);
    }

    let this = env.current_contract_address();
    let (asset_out, event) = if base_in {
        pool.reserve_base = balance_base;
        pool.reserve_token = balance_token - amount_out;
        (
            pool.token.clone(),
            Swap {
                to: to.clone(),
                base_in: deposit,
                token_in: 0,
                base_out: 0,
                token_out: amount_out,
            },
        )
    } else {
        pool.reserve_base = balance_base - amount_out;
        pool.reserve_token = balance_token;
        (
            pool.base_asset.clone(),
            Swap {
                to: to.clone(),
                base_in: 0,
                token_in: deposit,
                base_out: amount_out,
                token_out: 0,
            },
        )
    };
    storage::write_pool(env, &pool);

    token::Client::new(env, &asset_out).transfer(&this, to, &amount_out);

    event.publish(env);
    ReservesSynced {
        reserve_base: pool.reserve_base,
        reserve_token: pool.reserve_token,
    }
    .publish(env);

    Ok(())
}

fn move_credits(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), PoolError> {
    if amount < 0 {
        return Err(PoolError::InvalidAmount);
    }
    let from_balance = storage::read_balance(env, from);
    if from_balance < amount {
        return Err(PoolError::InsufficientBalance);
    }
    storage::write_balance(env, from, from_balance - amount);
    let to_balance = storage::read_balance(env, to);
    let updated = to_balance.checked_add(amount).ok_or(PoolError::Overflow)?;
    storage::write_balance(env, to, updated);

    CreditTransfer {
        from: from.clone(),
        to: to.clone(),
        amount,
    }
    .publish(env);
    Ok(())
}

/// Constant-product pool between a base asset and one token. Issues LP
/// credits against deposits and reconciles its reserves against actual
/// balances on every mutating call.
#[contract]
pub struct LiquidityPool;

impl Ownable for LiquidityPool {
    type Error = PoolError;
    const NOT_OWNER: PoolError = PoolError::OnlyOwner;
    const NOT_INITIALIZED: PoolError = PoolError::NotInitialized;
}

#[contractimpl]
impl LiquidityPool {
    pub fn initialize(
        env: Env,
        owner: Address,
        base_asset: Address,
        token: Address,
    ) -> Result<(), PoolError> {
        // Double-init guard
        if storage::has_pool(&env) {
            return Err(PoolError::AlreadyInitialized);
        }

        if is_zero_address(&env, &owner)
            || is_zero_address(&env, &base_asset)
            || is_zero_address(&env, &token)
        {
            return Err(PoolError::ZeroAddress);
        }

        if base_asset == token {
            return Err(PoolError::IdenticalTokens);
        }

        Self::write_owner(&env, &owner);
        storage::write_pool(
            &env,
            &PoolStorage {
                base_asset,
                token,
                reserve_base: 0,
                reserve_token: 0,
            },
        );
        storage::write_fee_state(&env, &FeeState::default());
        storage::write_guard(&env, false);
        storage::write_total_supply(&env, 0);

        bump_instance(&env);
        Ok(())
    }

    /// Issues LP credits to `to` for the assets deposited since the last
    /// reserve update.
    pub fn mint(env: Env, to: Address) -> Result<i128, PoolError> {
        bump_instance(&env);
        with_lock(&env, || mint_credits(&env, &to))
    }

    /// Redeems the credits held by the pool itself, paying `to`.
    pub fn burn(env: Env, to: Address) -> Result<(i128, i128), PoolError> {
        bump_instance(&env);
        with_lock(&env, || burn_credits(&env, &to))
    }

    pub fn swap_base_for_token(env: Env, to: Address, token_out: i128) -> Result<(), PoolError> {
        bump_instance(&env);
        with_lock(&env, || swap_exact_out(&env, &to, token_out, true))
    }

    pub fn swap_token_for_base(env: Env, to: Address, base_out: i128) -> Result<(), PoolError> {
        bump_instance(&env);
        with_lock(&env, || swap_exact_out(&env, &to, base_out, false))
    }

    /// Adopts the actual balances as reserves without minting.
    pub fn sync(env: Env) -> Result<(), PoolError> {
        bump_instance(&env);
        with_lock(&env, || {
            let mut pool = storage::read_pool(&env)?;
            let (balance_base, balance_token) = current_balances(&env, &pool);
            pool.reserve_base = balance_base;
            pool.reserve_token = balance_token;
            storage::write_pool(&env, &pool);
            ReservesSynced {
                reserve_base: balance_base,
                reserve_token: balance_token,
            }
            .publish(&env);
            Ok(())
        })
    }

    pub fn get_reserves(env: Env) -> Result<(i128, i128), PoolError> {
        let pool = storage::read_pool(&env)?;
        Ok((pool.reserve_base, pool.reserve_token))
    }

    pub fn get_fee_state(env: Env) -> Result<FeeState, PoolError> {
        storage::read_fee_state(&env)
    }

    pub fn base_asset(env: Env) -> Result<Address, PoolError> {
        Ok(storage::read_pool(&env)?.base_asset)
    }

    pub fn token(env: Env) -> Result<Address, PoolError> {
        Ok(storage::read_pool(&env)?.token)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::read_total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::read_balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::read_allowance(&env, &from, &spender)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), PoolError> {
        from.require_auth();
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }
        bump_instance(&env);

        storage::write_allowance(&env, &from, &spender, amount);
        CreditApproval {
            from,
            spender,
            amount,
        }
        .publish(&env);
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), PoolError> {
        from.require_auth();
        bump_instance(&env);
        move_credits(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PoolError> {
        spender.require_auth();
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }
        bump_instance(&env);

        let allowance = storage::read_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(PoolError::InsufficientAllowance);
        }
        storage::write_allowance(&env, &from, &spender, allowance - amount);
        move_credits(&env, &from, &to, amount)
    }

    pub fn owner(env: Env) -> Result<Address, PoolError> {
        Self::read_owner(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), PoolError> {
        bump_instance(&env);
        Self::transfer_owner(&env, &caller, &new_owner)
    }
}
