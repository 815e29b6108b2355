//! Tests for opening positions: validation, genesis window, custody, pass blocking.

#![cfg(test)]

use crate::test_helpers::{self, advance_time, scaled, DAY, START};
use crate::StakingError;
use soroban_sdk::Env;

#[test]
fn test_open_transfers_tokens_into_custody() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 5_000);

    s.client.open_position(&user, &2_000, &0);

    assert_eq!(s.token.balance(&user), 3_000);
    assert_eq!(s.token.balance(&s.contract_id), 2_000);
    let ledger = s.client.get_ledger();
    assert_eq!(ledger.total_principal, scaled(2_000));
    assert_eq!(ledger.total_weighted_principal, scaled(2_000));
}

#[test]
fn test_open_sets_program_fields() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 10_000);

    s.client.open_position(&user, &1_000, &0);
    s.client.open_position(&user, &1_000, &2);

    let unlocked = s.client.get_position(&user, &0);
    assert_eq!(unlocked.program_index, 0);
    assert_eq!(unlocked.multiplier, 10_000);
    assert!(!unlocked.compounding);
    assert_eq!(unlocked.matures_at, START);

    let locked = s.client.get_position(&user, &1);
    assert_eq!(locked.program_index, 2);
    assert_eq!(locked.multiplier, 16_000);
    assert_eq!(locked.weighted_principal, scaled(1_600));
    assert!(locked.compounding);
    assert_eq!(locked.created_at, START);
    assert_eq!(locked.matures_at, START + 180 * DAY);
    assert_eq!(locked.accumulated_unclaimed_reward, 0);
}

#[test]
fn test_multiple_positions_register_owner_once() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let alice = test_helpers::staker(&e, &s, 10_000);
    let bob = test_helpers::staker(&e, &s, 10_000);

    assert_eq!(s.client.open_position(&alice, &500, &0), 0);
    assert_eq!(s.client.open_position(&alice, &500, &1), 1);
    assert_eq!(s.client.open_position(&bob, &500, &3), 0);

    assert_eq!(s.client.staker_count(), 2);
    assert_eq!(s.client.position_count(&alice), 2);
    test_helpers::assert_totals_match(&s, &[alice, bob]);
}

#[test]
fn test_open_rejects_bad_amounts() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 5_000);

    assert_eq!(
        s.client.try_open_position(&user, &0, &0),
        Err(Ok(StakingError::InvalidAmount))
    );
    assert_eq!(
        s.client.try_open_position(&user, &-5, &0),
        Err(Ok(StakingError::InvalidAmount))
    );
    assert_eq!(
        s.client.try_open_position(&user, &99, &0),
        Err(Ok(StakingError::BelowMinimumStake))
    );
    // Exactly the minimum is fine.
    s.client.open_position(&user, &100, &0);
}

#[test]
fn test_open_rejects_unknown_program() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 5_000);
    assert_eq!(
        s.client.try_open_position(&user, &1_000, &5),
        Err(Ok(StakingError::InvalidProgram))
    );
    assert_eq!(s.client.staker_count(), 0);
}

#[test]
fn test_genesis_requires_epoch() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 5_000);
    assert_eq!(
        s.client.try_open_position(&user, &1_000, &4),
        Err(Ok(StakingError::GenesisEpochNotSet))
    );
}

#[test]
fn test_genesis_window_bounds() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 10_000);
    let epoch = START + DAY;
    s.client.set_genesis_epoch(&s.admin, &epoch);

    // Before the epoch.
    assert_eq!(
        s.client.try_open_position(&user, &1_000, &4),
        Err(Ok(StakingError::GenesisWindowClosed))
    );

    advance_time(&e, DAY);
    s.client.open_position(&user, &1_000, &4);
    assert_eq!(s.client.get_position(&user, &0).multiplier, 30_000);

    // Last second of the window.
    advance_time(&e, 90 * DAY - 1);
    s.client.open_position(&user, &1_000, &4);

    advance_time(&e, 1);
    assert_eq!(
        s.client.try_open_position(&user, &1_000, &4),
        Err(Ok(StakingError::GenesisWindowClosed))
    );
    // Other programs stay open.
    s.client.open_position(&user, &1_000, &3);
}

#[test]
fn test_open_blocked_while_paused() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 5_000);
    s.client.pause(&s.admin);
    assert_eq!(
        s.client.try_open_position(&user, &1_000, &0),
        Err(Ok(StakingError::Paused))
    );
    s.client.unpause(&s.admin);
    s.client.open_position(&user, &1_000, &0);
}

#[test]
fn test_open_blocked_mid_pass() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let alice = test_helpers::staker(&e, &s, 5_000);
    let bob = test_helpers::staker(&e, &s, 5_000);
    s.client.open_position(&alice, &1_000, &0);
    s.client.open_position(&bob, &1_000, &0);
    test_helpers::fund(&s, 10_000);

    advance_time(&e, DAY);
    let progress = s.client.distribute(&1);
    assert!(!progress.completed);

    assert_eq!(
        s.client.try_open_position(&alice, &1_000, &0),
        Err(Ok(StakingError::DistributionInProgress))
    );

    test_helpers::run_pass(&s, 10);
    s.client.open_position(&alice, &1_000, &0);
    assert_eq!(s.client.position_count(&alice), 2);
}
