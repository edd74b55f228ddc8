#![no_std]

mod errors;
mod storage;


use soroban_common::{Ownable, Pausable, UNIT};
use soroban_common::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use soroban_sdk::{contract, contractevent, contractimpl, log, token, Address, Env};

pub use crate::errors::IcoError;
pub use crate::storage::Phase;

/// Fundraising goal, in base-asset units.
pub const GOAL: i128 = 30_000 * UNIT;
pub const TOKENS_PER_BASE: i128 = 5;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub contributor: Address,
    pub amount: i128,
    pub phase: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseAdvanced {
    pub phase: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistUpdated {
    pub account: Address,
    pub allowed: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensCollected {
    pub contributor: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionsWithdrawn {
    pub to: Address,
    pub amount: i128,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn enter_phase(env: &Env, phase: Phase) {
    storage::write_phase(env, phase);
    PhaseAdvanced {
        phase: phase as u32,
    }
    .publish(env);
}

/// Phased token sale. Contributions are taken in the base asset and
/// settled in SPC once the sale is open.
#[contract]
pub struct Ico;

impl Ownable for Ico {
    type Error = IcoError;
    const NOT_OWNER: IcoError = IcoError::OnlyTreasury;
    const NOT_INITIALIZED: IcoError = IcoError::NotInitialized;
}

impl Pausable for Ico {
    type Error = IcoError;
    const PAUSED: IcoError = IcoError::PausedCampaign;
}

#[contractimpl]
impl Ico {
    /// `token` must already credit this contract with the sale allocation.
    pub fn initialize(
        env: Env,
        owner: Address,
        base_asset: Address,
        token: Address,
    ) -> Result<(), IcoError> {
        if storage::is_initialized(&env) {
            return Err(IcoError::AlreadyInitialized);
        }

        Self::write_owner(&env, &owner);
        storage::write_base_asset(&env, &base_asset);
        storage::write_token(&env, &token);
        storage::write_total_raised(&env, 0);
        storage::write_phase(&env, Phase::Seed);

        bump_instance(&env);
        Ok(())
    }

    pub fn buy(env: Env, caller: Address, amount: i128) -> Result<(), IcoError> {
        caller.require_auth();
        if amount <= 0 {
            return Err(IcoError::InvalidAmount);
        }
        Self::require_not_paused(&env)?;
        bump_instance(&env);

        let phase = storage::read_phase(&env);
        if phase == Phase::Seed && !storage::is_whitelisted(&env, &caller) {
            return Err(IcoError::Whitelist);
        }

        let contributed = storage::read_contribution(&env, &caller)
            .checked_add(amount)
            .ok_or(IcoError::Overflow)?;
        if let Some(cap) = phase.individual_cap() {
            if contributed > cap {
                return Err(IcoError::ExceedsMaxContribution);
            }
        }

        let total_raised = storage::read_total_raised(&env)
            .checked_add(amount)
            .ok_or(IcoError::Overflow)?;
        if total_raised > phase.aggregate_cap() {
            log!(&env, "phase cap reached", total_raised, phase.aggregate_cap());
            return Err(IcoError::InsufficientAvailability);
        }

        storage::write_contribution(&env, &caller, contributed);
        storage::write_total_raised(&env, total_raised);
        if total_raised == phase.aggregate_cap() {
            if let Some(next) = phase.next() {
                enter_phase(&env, next);
            }
        }

        let base_asset = storage::read_base_asset(&env)?;
        token::Client::new(&env, &base_asset).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        Contribution {
            contributor: caller,
            amount,
            phase: phase as u32,
        }
        .publish(&env);
        Ok(())
    }

    /// Moves one phase forward. `expected` must name the current phase.
    pub fn advance_phase(env: Env, caller: Address, expected: Phase) -> Result<(), IcoError> {
        Self::require_owner(&env, &caller)?;
        bump_instance(&env);

        let current = storage::read_phase(&env);
        if current != expected {
            return Err(IcoError::IncorrectPhase);
        }
        let next = current.next().ok_or(IcoError::IncorrectPhase)?;
        enter_phase(&env, next);
        Ok(())
    }

    pub fn whitelist_address(
        env: Env,
        caller: Address,
        account: Address,
        allowed: bool,
    ) -> Result<(), IcoError> {
        Self::require_owner(&env, &caller)?;
        bump_instance(&env);

        storage::write_whitelisted(&env, &account, allowed);
        WhitelistUpdated { account, allowed }.publish(&env);
        Ok(())
    }

    pub fn toggle_is_paused(env: Env, caller: Address, paused: bool) -> Result<(), IcoError> {
        Self::require_owner(&env, &caller)?;
        bump_instance(&env);

        Self::write_paused(&env, paused);
        Ok(())
    }

    /// Pays out `TOKENS_PER_BASE` SPC per unit contributed. Open phase only.
    pub fn collect_tokens(env: Env, caller: Address) -> Result<i128, IcoError> {
        caller.require_auth();
        bump_instance(&env);

        if storage::read_phase(&env) != Phase::Open {
            return Err(IcoError::IncorrectPhase);
        }
        let contributed = storage::read_contribution(&env, &caller);
        if contributed == 0 {
            return Err(IcoError::NoTokens);
        }
        let amount = contributed
            .checked_mul(TOKENS_PER_BASE)
            .ok_or(IcoError::Overflow)?;

        storage::write_contribution(&env, &caller, 0);
        let token = storage::read_token(&env)?;
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        TokensCollected {
            contributor: caller,
            amount,
        }
        .publish(&env);
        Ok(amount)
    }

    /// Sends every raised base unit to the owner once the goal is met.
    pub fn withdraw_contributions(env: Env, caller: Address) -> Result<i128, IcoError> {
        Self::require_owner(&env, &caller)?;
        bump_instance(&env);

        if storage::read_total_raised(&env) != GOAL {
            return Err(IcoError::IcoActive);
        }

        let base = token::Client::new(&env, &storage::read_base_asset(&env)?);
        let this = env.current_contract_address();
        let amount = base.balance(&this);
        if amount > 0 {
            base.transfer(&this, &caller, &amount);
        }

        ContributionsWithdrawn { to: caller, amount }.publish(&env);
        Ok(amount)
    }

    pub fn current_phase(env: Env) -> Phase {
        storage::read_phase(&env)
    }

    pub fn total_amount_raised(env: Env) -> i128 {
        storage::read_total_raised(&env)
    }

    pub fn user_contributions(env: Env, account: Address) -> i128 {
        storage::read_contribution(&env, &account)
    }

    pub fn is_paused(env: Env) -> bool {
        Self::paused(&env)
    }

    pub fn whitelist(env: Env, account: Address) -> bool {
        storage::is_whitelisted(&env, &account)
    }

    pub fn token(env: Env) -> Result<Address, IcoError> {
        storage::read_token(&env)
    }

    pub fn owner(env: Env) -> Result<Address, IcoError> {
        Self::read_owner(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), IcoError> {
        bump_instance(&env);
        Self::transfer_owner(&env, &caller, &new_owner)
    }
}
