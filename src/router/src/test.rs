#![cfg(test)]

use super::*;
use soroban_common::UNIT;
use soroban_pool_contract::{LiquidityPool, LiquidityPoolClient, PoolError};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, InvokeError};
use soroban_spacecoin_contract::{SpaceCoin, SpaceCoinClient};

struct Setup<'a> {
    env: Env,
    router: RouterClient<'a>,
    pool: LiquidityPoolClient<'a>,
    base: TokenClient<'a>,
    spc: SpaceCoinClient<'a>,
    owner: Address,
    lp: Address,
    trader: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let treasury = Address::generate(&env);
    let lp = Address::generate(&env);
    let trader = Address::generate(&env);

    let base_id = env.register_stellar_asset_contract_v2(owner.clone()).address();
    let base_admin = StellarAssetClient::new(&env, &base_id);
    base_admin.mint(&lp, &(1_000 * UNIT));
    base_admin.mint(&trader, &(1_000 * UNIT));

    let spc_id = env.register(SpaceCoin, ());
    let spc = SpaceCoinClient::new(&env, &spc_id);
    spc.initialize(&owner, &treasury, &Address::generate(&env));
    spc.transfer(&treasury, &lp, &(5_000 * UNIT));
    spc.transfer(&treasury, &trader, &(5_000 * UNIT));

    let pool_id = env.register(LiquidityPool, ());
    let pool = LiquidityPoolClient::new(&env, &pool_id);
    pool.initialize(&owner, &base_id, &spc_id);

    let router_id = env.register(Router, ());
    let router = RouterClient::new(&env, &router_id);
    router.initialize(&owner, &pool_id);

    let expiration = env.ledger().sequence() + 10_000;
    spc.approve(&lp, &router_id, &(5_000 * UNIT), &expiration);
    spc.approve(&trader, &router_id, &(5_000 * UNIT), &expiration);

    Setup {
        base: TokenClient::new(&env, &base_id),
        env,
        router,
        pool,
        spc,
        owner,
        lp,
        trader,
    }
}

impl Setup<'_> {
    /// Seeds the pool with `base` and `token` from the LP.
    fn seed(&self, base: i128, token: i128) -> i128 {
        self.router.add_liquidity(&self.lp, &token, &base)
    }
}

#[test]
fn test_initialize_reads_pool_assets() {
    let s = setup();
    assert_eq!(s.router.pool(), s.pool.address);
    assert_eq!(s.router.owner(), s.owner);
    assert_eq!(
        s.router.try_initialize(&s.owner, &s.pool.address),
        Err(Ok(RouterError::AlreadyInitialized))
    );
}

#[test]
fn test_adds_initial_liquidity() {
    let s = setup();
    let credits = s.seed(10 * UNIT, 40 * UNIT);

    assert_eq!(credits, 20 * UNIT - 1_000);
    assert_eq!(s.pool.balance(&s.lp), credits);
    assert_eq!(s.router.get_reserves(), (10 * UNIT, 40 * UNIT));
    assert_eq!(s.base.balance(&s.lp), 990 * UNIT);
    assert_eq!(s.spc.balance(&s.lp), 4_960 * UNIT);
}

#[test]
fn test_adds_to_an_existing_pool() {
    let s = setup();
    s.seed(10 * UNIT, 40 * UNIT);

    let credits = s.router.add_liquidity(&s.trader, &(20 * UNIT), &(5 * UNIT));
    assert_eq!(credits, 10 * UNIT);
    assert_eq!(s.router.get_reserves(), (15 * UNIT, 60 * UNIT));
}

#[test]
fn test_refunds_unused_base() {
    let s = setup();
    s.seed(10 * UNIT, 50 * UNIT);
    let before = s.base.balance(&s.trader);

    s.router.add_liquidity(&s.trader, &(10 * UNIT), &(10 * UNIT));

    assert_eq!(before - s.base.balance(&s.trader), 2 * UNIT);
    assert_eq!(s.base.balance(&s.router.address), 0);
    assert_eq!(s.router.get_reserves(), (12 * UNIT, 60 * UNIT));
}

#[test]
fn test_pulls_only_the_token_share_needed() {
    let s = setup();
    s.seed(10 * UNIT, 50 * UNIT);
    let before = s.spc.balance(&s.trader);

    s.router.add_liquidity(&s.trader, &(100 * UNIT), &UNIT);

    assert_eq!(before - s.spc.balance(&s.trader), 5 * UNIT);
    assert_eq!(s.router.get_reserves(), (11 * UNIT, 55 * UNIT));
}

#[test]
fn test_rejects_zero_amounts() {
    let s = setup();
    assert_eq!(
        s.router.try_add_liquidity(&s.lp, &0, &UNIT),
        Err(Ok(RouterError::InsufficientAmount))
    );
    assert_eq!(
        s.router.try_add_liquidity(&s.lp, &UNIT, &0),
        Err(Ok(RouterError::InsufficientAmount))
    );
}

#[test]
fn test_rejects_deposit_too_small_for_ratio() {
    let s = setup();
    s.seed(10 * UNIT, 50 * UNIT);
    assert_eq!(
        s.router.try_add_liquidity(&s.trader, &1, &UNIT),
        Err(Ok(RouterError::InsufficientAmount))
    );
}

#[test]
fn test_removes_liquidity() {
    let s = setup();
    let credits = s.seed(10 * UNIT, 40 * UNIT);
    let base_before = s.base.balance(&s.lp);
    let spc_before = s.spc.balance(&s.lp);

    s.pool.approve(&s.lp, &s.router.address, &credits);
    let (base_out, token_out) = s.router.remove_liquidity(&s.lp, &credits);

    assert_eq!(s.pool.balance(&s.lp), 0);
    assert_eq!(s.base.balance(&s.lp) - base_before, base_out);
    assert_eq!(s.spc.balance(&s.lp) - spc_before, token_out);
    assert_eq!(base_out, 10 * UNIT - 500);
    assert_eq!(token_out, 40 * UNIT - 2_000);
}

#[test]
fn test_remove_without_credits_fails() {
    let s = setup();
    let credits = s.seed(10 * UNIT, 40 * UNIT);

    assert_eq!(
        s.router.try_remove_liquidity(&s.trader, &UNIT),
        Err(Ok(RouterError::InsufficientLiquidity))
    );
    assert_eq!(
        s.router.try_remove_liquidity(&s.lp, &0),
        Err(Ok(RouterError::InsufficientLiquidity))
    );
    // Held but not approved.
    assert_eq!(
        s.router.try_remove_liquidity(&s.lp, &credits),
        Err(Ok(RouterError::InsufficientLiquidity))
    );
}

#[test]
fn test_estimate_is_below_fee_free_price() {
    let s = setup();
    s.seed(100 * UNIT, 500 * UNIT);

    let out = s.router.get_swap_estimate(&UNIT, &true);
    assert!(out < 5 * UNIT);
    assert!(out > 4 * UNIT);
}

#[test]
fn test_swaps_base_for_token_at_estimate() {
    let s = setup();
    s.seed(100 * UNIT, 500 * UNIT);
    let before = s.spc.balance(&s.trader);

    let estimate = s.router.get_swap_estimate(&UNIT, &true);
    let out = s.router.swap_base_for_token(&s.trader, &UNIT, &estimate);

    assert_eq!(out, estimate);
    assert_eq!(s.spc.balance(&s.trader) - before, estimate);
    assert_eq!(s.router.get_reserves(), (101 * UNIT, 500 * UNIT - estimate));
    assert!(s.router.get_swap_estimate(&UNIT, &true) < estimate);
}

#[test]
fn test_swaps_token_for_base_at_estimate() {
    let s = setup();
    s.seed(100 * UNIT, 500 * UNIT);
    let before = s.base.balance(&s.trader);

    let estimate = s.router.get_swap_estimate(&(5 * UNIT), &false);
    let out = s.router.swap_token_for_base(&s.trader, &(5 * UNIT), &0);

    assert_eq!(out, estimate);
    assert_eq!(s.base.balance(&s.trader) - before, estimate);
    assert!(s.router.get_swap_estimate(&(5 * UNIT), &false) < estimate);
}

#[test]
fn test_slippage_floor() {
    let s = setup();
    s.seed(100 * UNIT, 500 * UNIT);

    assert_eq!(
        s.router
            .try_swap_base_for_token(&s.trader, &(3 * UNIT), &(147 * UNIT / 10)),
        Err(Ok(RouterError::Slippage))
    );
    assert_eq!(
        s.router
            .try_swap_token_for_base(&s.trader, &(15 * UNIT), &(29 * UNIT / 10)),
        Err(Ok(RouterError::Slippage))
    );
    assert_eq!(s.router.get_reserves(), (100 * UNIT, 500 * UNIT));
}

#[test]
fn test_swaps_need_reserves_and_input() {
    let s = setup();
    assert_eq!(
        s.router.try_swap_base_for_token(&s.trader, &UNIT, &0),
        Err(Ok(RouterError::InsufficientLiquidity))
    );
    assert_eq!(
        s.router.try_get_swap_estimate(&UNIT, &false),
        Err(Ok(RouterError::InsufficientLiquidity))
    );

    s.seed(100 * UNIT, 500 * UNIT);
    assert_eq!(
        s.router.try_swap_base_for_token(&s.trader, &0, &0),
        Err(Ok(RouterError::InsufficientInputAmount))
    );
    assert_eq!(
        s.router.try_swap_token_for_base(&s.trader, &-1, &0),
        Err(Ok(RouterError::InsufficientInputAmount))
    );
}

#[test]
fn test_liquidity_providers_earn_fees() {
    let s = setup();
    let credits = s.seed(100 * UNIT, 500 * UNIT);

    let token_out = s.router.swap_base_for_token(&s.trader, &(10 * UNIT), &0);
    s.router.swap_token_for_base(&s.trader, &token_out, &0);

    let (reserve_base, reserve_token) = s.router.get_reserves();
    assert!(reserve_base > 100 * UNIT);
    assert_eq!(reserve_token, 500 * UNIT);

    s.pool.approve(&s.lp, &s.router.address, &credits);
    let (base_out, _) = s.router.remove_liquidity(&s.lp, &credits);
    assert!(base_out > 100 * UNIT);
}

#[test]
fn test_taxed_token_swap_is_rejected() {
    let s = setup();
    s.seed(100 * UNIT, 500 * UNIT);
    s.spc.toggle_tax(&s.owner, &true);

    let result = s.router.try_swap_token_for_base(&s.trader, &(5 * UNIT), &0);
    assert_eq!(
        result,
        Err(Err(InvokeError::Contract(PoolError::InvalidK as u32)))
    );
    assert_eq!(s.router.get_reserves(), (100 * UNIT, 500 * UNIT));
}

#[test]
fn test_token_tax_applies_after_slippage_floor() {
    let s = setup();
    s.seed(100 * UNIT, 500 * UNIT);
    s.spc.toggle_tax(&s.owner, &true);
    let before = s.spc.balance(&s.trader);

    let estimate = s.router.get_swap_estimate(&UNIT, &true);
    let out = s.router.swap_base_for_token(&s.trader, &UNIT, &estimate);

    let tax = estimate * 200 / 10_000;
    assert_eq!(out, estimate);
    assert_eq!(s.spc.balance(&s.trader) - before, estimate - tax);
    assert_eq!(s.router.get_reserves(), (101 * UNIT, 500 * UNIT - estimate));
}

#[test]
fn test_taxed_liquidity_deposit_mints_on_received_amount() {
    let s = setup();
    s.seed(10 * UNIT, 50 * UNIT);
    s.spc.toggle_tax(&s.owner, &true);

    s.router.add_liquidity(&s.trader, &(50 * UNIT), &(10 * UNIT));
    assert_eq!(s.router.get_reserves(), (20 * UNIT, 99 * UNIT));
}

#[test]
fn test_ownership_is_transferable() {
    let s = setup();
    let larry = Address::generate(&s.env);
    s.router.transfer_ownership(&s.owner, &larry);
    assert_eq!(s.router.owner(), larry);
    assert_eq!(
        s.router.try_transfer_ownership(&s.owner, &s.owner),
        Err(Ok(RouterError::OnlyOwner))
    );
}
