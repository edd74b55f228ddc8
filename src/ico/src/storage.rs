use soroban_common::UNIT;
use soroban_sdk::{contracttype, Address, Env};

use crate::errors::IcoError;

const ACCOUNT_BUMP_AMOUNT: u32 = 518_400;
const ACCOUNT_LIFETIME_THRESHOLD: u32 = ACCOUNT_BUMP_AMOUNT - 17_280;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    BaseAsset,
    Token,
    TotalRaised,
    Phase,
    Contribution(Address),
    Whitelisted(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Phase {
    Seed = 0,
    General = 1,
    Open = 2,
}

impl Phase {
    /// Cumulative contribution allowed per account, if capped.
    pub fn individual_cap(self) -> Option<i128> {
        match self {
            Phase::Seed => Some(1_500 * UNIT),
            Phase::General => Some(1_000 * UNIT),
            Phase::Open => None,
        }
    }

    /// Total that may have been raised by the end of this phase.
    pub fn aggregate_cap(self) -> i128 {
        match self {
            Phase::Seed => 15_000 * UNIT,
            Phase::General | Phase::Open => 30_000 * UNIT,
        }
    }

    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Seed => Some(Phase::General),
            Phase::General => Some(Phase::Open),
            Phase::Open => None,
        }
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Token)
}

pub fn read_base_asset(env: &Env) -> Result<Address, IcoError> {
    env.storage()
        .instance()
        .get(&DataKey::BaseAsset)
        .ok_or(IcoError::NotInitialized)
}

pub fn write_base_asset(env: &Env, base_asset: &Address) {
    env.storage().instance().set(&DataKey::BaseAsset, base_asset);
}

pub fn read_token(env: &Env) -> Result<Address, IcoError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(IcoError::NotInitialized)
}

pub fn write_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn read_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn write_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn read_phase(env: &Env) -> Phase {
    env.storage()
        .instance()
        .get(&DataKey::Phase)
        .unwrap_or(Phase::Seed)
}

pub fn write_phase(env: &Env, phase: Phase) {
    env.storage().instance().set(&DataKey::Phase, &phase);
}

pub fn read_contribution(env: &Env, account: &Address) -> i128 {
    let key = DataKey::Contribution(account.clone());
    match env.storage().persistent().get::<DataKey, i128>(&key) {
        Some(amount) => {
            env.storage().persistent().extend_ttl(
                &key,
                ACCOUNT_LIFETIME_THRESHOLD,
                ACCOUNT_BUMP_AMOUNT,
            );
            amount
        }
        None => 0,
    }
}

pub fn write_contribution(env: &Env, account: &Address, amount: i128) {
    let key = DataKey::Contribution(account.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, ACCOUNT_LIFETIME_THRESHOLD, ACCOUNT_BUMP_AMOUNT);
}

pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(account.clone()))
        .unwrap_or(false)
}

pub fn write_whitelisted(env: &Env, account: &Address, allowed: bool) {
    let key = DataKey::Whitelisted(account.clone());
    if !allowed {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, ACCOUNT_LIFETIME_THRESHOLD, ACCOUNT_BUMP_AMOUNT);
}
