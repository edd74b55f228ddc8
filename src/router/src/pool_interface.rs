use soroban_common::FeeState;
use soroban_sdk::{contractclient, Address, Env};

/// Entry points of the liquidity pool the router drives. Pool errors abort
/// the router invocation as well.
#[allow(dead_code)]
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    fn get_reserves(env: Env) -> (i128, i128);
    fn get_fee_state(env: Env) -> FeeState;
    fn base_asset(env: Env) -> Address;
    fn token(env: Env) -> Address;
    fn mint(env: Env, to: Address) -> i128;
    fn burn(env: Env, to: Address) -> (i128, i128);
    fn swap_base_for_token(env: Env, to: Address, token_out: i128);
    fn swap_token_for_base(env: Env, to: Address, base_out: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn allowance(env: Env, from: Address, spender: Address) -> i128;
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
}
