#![cfg(test)]

use super::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use crate::errors::TokenError;

struct Setup<'a> {
    env: Env,
    client: SpaceCoinClient<'a>,
    owner: Address,
    treasury: Address,
    ico: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SpaceCoin, ());
    let client = SpaceCoinClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let treasury = Address::generate(&env);
    let ico = Address::generate(&env);
    client.initialize(&owner, &treasury, &ico);

    Setup {
        env,
        client,
        owner,
        treasury,
        ico,
    }
}

#[test]
fn test_initialize_splits_supply() {
    let s = setup();
    assert_eq!(s.client.total_supply(), TOTAL_SUPPLY);
    assert_eq!(s.client.balance(&s.ico), ICO_ALLOCATION);
    assert_eq!(s.client.balance(&s.treasury), TOTAL_SUPPLY - ICO_ALLOCATION);
    assert_eq!(s.client.treasury(), s.treasury);
    assert_eq!(s.client.decimals(), 18);
    assert_eq!(s.client.symbol(), String::from_str(&s.env, "SPC"));
    assert!(!s.client.collect_taxes());
}

#[test]
fn test_already_initialized() {
    let s = setup();
    let result = s.client.try_initialize(&s.owner, &s.treasury, &s.ico);
    assert_eq!(result, Err(Ok(TokenError::AlreadyInitialized)));
}

#[test]
fn test_sets_a_transferable_owner() {
    let s = setup();
    let larry = Address::generate(&s.env);
    assert_eq!(s.client.owner(), s.owner);

    s.client.transfer_ownership(&s.owner, &larry);
    assert_eq!(s.client.owner(), larry);

    let result = s.client.try_transfer_ownership(&s.owner, &s.owner);
    assert_eq!(result, Err(Ok(TokenError::OnlyOwner)));
}

#[test]
fn test_owner_toggles_tax() {
    let s = setup();
    s.client.toggle_tax(&s.owner, &true);
    assert!(s.client.collect_taxes());
    s.client.toggle_tax(&s.owner, &false);
    assert!(!s.client.collect_taxes());
}

#[test]
fn test_only_owner_toggles_tax() {
    let s = setup();
    let larry = Address::generate(&s.env);
    let result = s.client.try_toggle_tax(&larry, &true);
    assert_eq!(result, Err(Ok(TokenError::OnlyOwner)));
    assert!(!s.client.collect_taxes());
}

#[test]
fn test_transfer_sets_aside_two_percent_when_taxed() {
    let s = setup();
    let larry = Address::generate(&s.env);
    let jenny = Address::generate(&s.env);

    s.client.transfer(&s.treasury, &larry, &(100 * UNIT));
    let treasury_before = s.client.balance(&s.treasury);

    s.client.toggle_tax(&s.owner, &true);
    s.client.transfer(&larry, &jenny, &(50 * UNIT));

    assert_eq!(s.client.balance(&jenny), 49 * UNIT);
    assert_eq!(s.client.balance(&larry), 50 * UNIT);
    assert_eq!(s.client.balance(&s.treasury) - treasury_before, UNIT);
    assert_eq!(s.client.total_supply(), TOTAL_SUPPLY);
}

#[test]
fn test_transfer_is_full_value_when_untaxed() {
    let s = setup();
    let larry = Address::generate(&s.env);
    let jenny = Address::generate(&s.env);

    s.client.transfer(&s.treasury, &larry, &(100 * UNIT));
    let treasury_before = s.client.balance(&s.treasury);
    s.client.transfer(&larry, &jenny, &(50 * UNIT));

    assert_eq!(s.client.balance(&jenny), 50 * UNIT);
    assert_eq!(s.client.balance(&s.treasury), treasury_before);
}

#[test]
fn test_transfer_from_spends_allowance() {
    let s = setup();
    let spender = Address::generate(&s.env);
    let jenny = Address::generate(&s.env);
    let expiration = s.env.ledger().sequence() + 1_000;

    s.client.approve(&s.treasury, &spender, &(10 * UNIT), &expiration);
    assert_eq!(s.client.allowance(&s.treasury, &spender), 10 * UNIT);

    s.client.transfer_from(&spender, &s.treasury, &jenny, &(4 * UNIT));
    assert_eq!(s.client.balance(&jenny), 4 * UNIT);
    assert_eq!(s.client.allowance(&s.treasury, &spender), 6 * UNIT);

    let result = s.client.try_transfer_from(&spender, &s.treasury, &jenny, &(7 * UNIT));
    assert!(result.is_err());
    assert_eq!(s.client.balance(&jenny), 4 * UNIT);
}

#[test]
fn test_transfer_from_taxed_still_debits_full_amount() {
    let s = setup();
    let spender = Address::generate(&s.env);
    let jenny = Address::generate(&s.env);
    let larry = Address::generate(&s.env);
    let expiration = s.env.ledger().sequence() + 1_000;

    s.client.transfer(&s.treasury, &larry, &(100 * UNIT));
    s.client.approve(&larry, &spender, &(100 * UNIT), &expiration);
    s.client.toggle_tax(&s.owner, &true);
    s.client.transfer_from(&spender, &larry, &jenny, &(100 * UNIT));

    assert_eq!(s.client.balance(&larry), 0);
    assert_eq!(s.client.balance(&jenny), 98 * UNIT);
}

#[test]
fn test_transfer_rejects_overdraft_and_negative() {
    let s = setup();
    let larry = Address::generate(&s.env);
    let jenny = Address::generate(&s.env);

    assert!(s.client.try_transfer(&larry, &jenny, &1).is_err());
    assert!(s.client.try_transfer(&s.treasury, &jenny, &-1).is_err());
    assert_eq!(s.client.balance(&jenny), 0);
}

#[test]
fn test_burn_shrinks_supply() {
    let s = setup();
    s.client.burn(&s.treasury, &(1_000 * UNIT));
    assert_eq!(s.client.total_supply(), TOTAL_SUPPLY - 1_000 * UNIT);
    assert_eq!(
        s.client.balance(&s.treasury),
        TOTAL_SUPPLY - ICO_ALLOCATION - 1_000 * UNIT
    );
}
