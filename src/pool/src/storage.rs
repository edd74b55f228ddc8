use soroban_common::FeeState;
use soroban_sdk::{contracttype, Address, Env};

use crate::errors::PoolError;

const CREDIT_BUMP_AMOUNT: u32 = 518_400;
const CREDIT_LIFETIME_THRESHOLD: u32 = CREDIT_BUMP_AMOUNT - 17_280;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    PoolStorage,
    FeeState,
    ReentrancyGuard,
    TotalSupply,
    Balance(Address),
    Allowance(AllowanceKey),
}

#[contracttype]
#[derive(Clone)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolStorage {
    pub base_asset: Address,
    pub token: Address,
    pub reserve_base: i128,
    pub reserve_token: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReentrancyGuard {
    pub locked: bool,
}

pub fn has_pool(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::PoolStorage)
}

pub fn read_pool(env: &Env) -> Result<PoolStorage, PoolError> {
    env.storage()
        .instance()
        .get(&DataKey::PoolStorage)
        .ok_or(PoolError::NotInitialized)
}

pub fn write_pool(env: &Env, pool: &PoolStorage) {
    env.storage().instance().set(&DataKey::PoolStorage, pool);
}

pub fn read_fee_state(env: &Env) -> Result<FeeState, PoolError> {
    env.storage()
        .instance()
        .get(&DataKey::FeeState)
        .ok_or(PoolError::NotInitialized)
}

pub fn write_fee_state(env: &Env, fee_state: &FeeState) {
    env.storage().instance().set(&DataKey::FeeState, fee_state);
}

pub fn write_guard(env: &Env, locked: bool) {
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &ReentrancyGuard { locked });
}

/// Takes the reentrancy lock, failing if it is already held.
pub fn enter(env: &Env) -> Result<(), PoolError> {
    let guard: ReentrancyGuard = env
        .storage()
        .instance()
        .get(&DataKey::ReentrancyGuard)
        .ok_or(PoolError::NotInitialized)?;
    if guard.locked {
        return Err(PoolError::Locked);
    }
    write_guard(env, true);
    Ok(())
}

pub fn exit(env: &Env) {
    write_guard(env, false);
}

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn write_total_supply(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &amount);
}

pub fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match env.storage().persistent().get::<DataKey, i128>(&key) {
        Some(balance) => {
            env.storage().persistent().extend_ttl(
                &key,
                CREDIT_LIFETIME_THRESHOLD,
                CREDIT_BUMP_AMOUNT,
            );
            balance
        }
        None => 0,
    }
}

pub fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, CREDIT_LIFETIME_THRESHOLD, CREDIT_BUMP_AMOUNT);
}

pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, CREDIT_LIFETIME_THRESHOLD, CREDIT_BUMP_AMOUNT);
}
