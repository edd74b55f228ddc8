#![no_std]

mod errors;
mod pool_interface;
mod storage;

#[cfg(test)]
mod test;

use soroban_common::{math, Ownable, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use soroban_sdk::{contract, contractevent, contractimpl, log, token, Address, Env};

pub use crate::errors::RouterError;
use crate::pool_interface::PoolClient;
use crate::storage::Route;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityAdded {
    pub provider: Address,
    pub base_amount: i128,
    pub token_amount: i128,
    pub credits: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityRemoved {
    pub provider: Address,
    pub credits: i128,
    pub base_out: i128,
    pub token_out: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Swapped {
    pub trader: Address,
    pub input_is_base: bool,
    pub amount_in: i128,
    pub amount_out: i128,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Splits an offered deposit into the amounts the pool will actually take
/// at its current ratio, as `(base, token)`.
fn optimal_amounts(
    env: &Env,
    base_amount: i128,
    token_amount: i128,
    reserve_base: i128,
    reserve_token: i128,
) -> Result<(i128, i128), RouterError> {
    if reserve_base == 0 && reserve_token == 0 {
        return Ok((base_amount, token_amount));
    }
    if reserve_base == 0 || reserve_token == 0 {
        return Err(RouterError::InsufficientLiquidity);
    }

    let token_optimal =
        math::mul_div(env, base_amount, reserve_token, reserve_base).ok_or(RouterError::Overflow)?;
    let (base_used, token_used) = if token_optimal <= token_amount {
        (base_amount, token_optimal)
    } else {
        let base_optimal = math::mul_div(env, token_amount, reserve_base, reserve_token)
            .ok_or(RouterError::Overflow)?;
        (base_optimal, token_amount)
    };

    if base_used <= 0 || token_used <= 0 {
        return Err(RouterError::InsufficientAmount);
    }
    Ok((base_used, token_used))
}

/// Output the pool will accept for `amount_in`, after the pool's fee.
fn estimate(
    env: &Env,
    pool: &PoolClient,
    amount_in: i128,
    input_is_base: bool,
) -> Result<i128, RouterError> {
    if amount_in <= 0 {
        return Err(RouterError::InsufficientInputAmount);
    }
    let (reserve_base, reserve_token) = pool.get_reserves();
    if reserve_base == 0 || reserve_token == 0 {
        return Err(RouterError::InsufficientLiquidity);
    }
    let (reserve_in, reserve_out) = if input_is_base {
        (reserve_base, reserve_token)
    } else {
        (reserve_token, reserve_base)
    };

    let after_fee = pool
        .get_fee_state()
        .amount_after_fee(env, amount_in)
        .ok_or(RouterError::Overflow)?;
    math::get_amount_out(env, after_fee, reserve_in, reserve_out).ok_or(RouterError::Overflow)
}

fn swap(
    env: &Env,
    caller: &Address,
    amount_in: i128,
    min_out: i128,
    input_is_base: bool,
) -> Result<i128, RouterError> {
    caller.require_auth();
    let route = storage::read_route(env)?;
    let pool = PoolClient::new(env, &route.pool);

    let amount_out = estimate(env, &pool, amount_in, input_is_base)?;
    if amount_out < min_out {
        log!(env, "slippage floor not met", amount_out, min_out);
        return Err(RouterError::Slippage);
    }

    if input_is_base {
        token::Client::new(env, &route.base_asset).transfer(caller, &route.pool, &amount_in);
        pool.swap_base_for_token(caller, &amount_out);
    } else {
        let this = env.current_contract_address();
        token::Client::new(env, &route.token).transfer_from(&this, caller, &route.pool, &amount_in);
        pool.swap_token_for_base(caller, &amount_out);
    }

    Swapped {
        trader: caller.clone(),
        input_is_base,
        amount_in,
        amount_out,
    }
    .publish(env);
    Ok(amount_out)
}

/// Front door to a single liquidity pool: prices swaps, enforces
/// slippage floors and deposits liquidity at the pool's ratio.
#[contract]
pub struct Router;

impl Ownable for Router {
    type Error = RouterError;
    const NOT_OWNER: RouterError = RouterError::OnlyOwner;
    const NOT_INITIALIZED: RouterError = RouterError::NotInitialized;
}

#[contractimpl]
impl Router {
    pub fn initialize(env: Env, owner: Address, pool: Address) -> Result<(), RouterError> {
        if storage::has_route(&env) {
            return Err(RouterError::AlreadyInitialized);
        }

        let client = PoolClient::new(&env, &pool);
        let route = Route {
            base_asset: client.base_asset(),
            token: client.token(),
            pool,
        };
        Self::write_owner(&env, &owner);
        storage::write_route(&env, &route);

        bump_instance(&env);
        Ok(())
    }

    /// Deposits liquidity for `caller` at the pool's current ratio.
    ///
    /// The whole `base_amount` is pulled up front; any part the ratio does
    /// not use is sent back. Only the needed share of `token_amount` is
    /// taken, through the allowance `caller` granted this router.
    pub fn add_liquidity(
        env: Env,
        caller: Address,
        token_amount: i128,
        base_amount: i128,
    ) -> Result<i128, RouterError> {
        caller.require_auth();
        if token_amount <= 0 || base_amount <= 0 {
            return Err(RouterError::InsufficientAmount);
        }
        bump_instance(&env);

        let route = storage::read_route(&env)?;
        let pool = PoolClient::new(&env, &route.pool);
        let (reserve_base, reserve_token) = pool.get_reserves();
        let (base_used, token_used) =
            optimal_amounts(&env, base_amount, token_amount, reserve_base, reserve_token)?;

        let this = env.current_contract_address();
        let base = token::Client::new(&env, &route.base_asset);
        base.transfer(&caller, &this, &base_amount);
        base.transfer(&this, &route.pool, &base_used);
        if base_amount > base_used {
            base.transfer(&this, &caller, &(base_amount - base_used));
        }
        token::Client::new(&env, &route.token).transfer_from(&this, &caller, &route.pool, &token_used);

        let credits = pool.mint(&caller);
        LiquidityAdded {
            provider: caller,
            base_amount: base_used,
            token_amount: token_used,
            credits,
        }
        .publish(&env);
        Ok(credits)
    }

    /// Redeems `credits` for both assets. `caller` must have approved this
    /// router for at least `credits` on the pool.
    pub fn remove_liquidity(
        env: Env,
        caller: Address,
        credits: i128,
    ) -> Result<(i128, i128), RouterError> {
        caller.require_auth();
        if credits <= 0 {
            return Err(RouterError::InsufficientLiquidity);
        }
        bump_instance(&env);

        let route = storage::read_route(&env)?;
        let pool = PoolClient::new(&env, &route.pool);
        let this = env.current_contract_address();
        if pool.balance(&caller) < credits || pool.allowance(&caller, &this) < credits {
            return Err(RouterError::InsufficientLiquidity);
        }

        pool.transfer_from(&this, &caller, &route.pool, &credits);
        let (base_out, token_out) = pool.burn(&caller);

        LiquidityRemoved {
            provider: caller,
            credits,
            base_out,
            token_out,
        }
        .publish(&env);
        Ok((base_out, token_out))
    }

    pub fn get_swap_estimate(
        env: Env,
        amount_in: i128,
        input_is_base: bool,
    ) -> Result<i128, RouterError> {
        let route = storage::read_route(&env)?;
        let pool = PoolClient::new(&env, &route.pool);
        estimate(&env, &pool, amount_in, input_is_base)
    }

    /// Swaps exactly `base_in` for the estimated token output.
    ///
    /// `min_token_out` bounds what the pool pays out. A token transfer tax
    /// is taken after that, so with taxes on `caller` receives less than
    /// the floor.
    pub fn swap_base_for_token(
        env: Env,
        caller: Address,
        base_in: i128,
        min_token_out: i128,
    ) -> Result<i128, RouterError> {
        bump_instance(&env);
        swap(&env, &caller, base_in, min_token_out, true)
    }

    /// Swaps `token_in` for the estimated base output. The estimate
    /// assumes the pool receives all of `token_in`, so a taxed transfer
    /// makes the pool reject the trade.
    pub fn swap_token_for_base(
        env: Env,
        caller: Address,
        token_in: i128,
        min_base_out: i128,
    ) -> Result<i128, RouterError> {
        bump_instance(&env);
        swap(&env, &caller, token_in, min_base_out, false)
    }

    pub fn get_reserves(env: Env) -> Result<(i128, i128), RouterError> {
        let route = storage::read_route(&env)?;
        Ok(PoolClient::new(&env, &route.pool).get_reserves())
    }

    pub fn pool(env: Env) -> Result<Address, RouterError> {
        Ok(storage::read_route(&env)?.pool)
    }

    pub fn owner(env: Env) -> Result<Address, RouterError> {
        Self::read_owner(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), RouterError> {
        bump_instance(&env);
        Self::transfer_owner(&env, &caller, &new_owner)
    }
}
