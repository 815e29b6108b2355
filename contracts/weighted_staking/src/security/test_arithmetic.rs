//! Arithmetic Security Tests
//!
//! Boundary values around the fixed-point scale: stake amounts that overflow once
//! scaled or weighted, totals that would overflow `i128`, wide pro-rata products that
//! need the 256-bit fallback, and lock maturities past `u64::MAX`.

#![cfg(test)]

use crate::constants::PRECISION;
use crate::test_helpers::{self, advance_time, scaled, DAY};
use crate::StakingError;
use soroban_sdk::testutils::Ledger;
use soroban_sdk::Env;

/// Largest token amount whose scaled value fits in `i128`.
const MAX_SCALABLE: i128 = i128::MAX / PRECISION;

// ============================================================================
// OPEN POSITION OVERFLOW
// ============================================================================

#[test]
fn test_amount_too_large_to_scale() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let amount = MAX_SCALABLE + 1;
    let whale = test_helpers::staker(&e, &s, amount);

    assert_eq!(
        s.client.try_open_position(&whale, &amount, &0),
        Err(Ok(StakingError::ArithmeticOverflow))
    );
    assert_eq!(s.token.balance(&whale), amount);
}

#[test]
fn test_weighted_principal_overflow() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let amount = MAX_SCALABLE / 2;
    let whale = test_helpers::staker(&e, &s, amount);

    // Fits once scaled, but not once multiplied by 2.2x.
    assert_eq!(
        s.client.try_open_position(&whale, &amount, &3),
        Err(Ok(StakingError::ArithmeticOverflow))
    );
    // The same amount unlocked is fine.
    s.client.open_position(&whale, &amount, &0);
}

#[test]
fn test_total_principal_overflow() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let amount = MAX_SCALABLE / 2 + 1;
    let first = test_helpers::staker(&e, &s, amount);
    let second = test_helpers::staker(&e, &s, amount);

    s.client.open_position(&first, &amount, &0);
    assert_eq!(
        s.client.try_open_position(&second, &amount, &0),
        Err(Ok(StakingError::ArithmeticOverflow))
    );
    assert_eq!(s.client.staker_count(), 1);
}

#[test]
fn test_maturity_past_u64_max() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let user = test_helpers::staker(&e, &s, 1_000);
    e.ledger().with_mut(|li| li.timestamp = u64::MAX - DAY);

    assert_eq!(
        s.client.try_open_position(&user, &1_000, &1),
        Err(Ok(StakingError::ArithmeticOverflow))
    );
    s.client.open_position(&user, &1_000, &0);
}

// ============================================================================
// DISTRIBUTION WITH WIDE PRODUCTS
// ============================================================================

#[test]
fn test_distribution_with_whale_uses_wide_math() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    // 1e20 tokens: weighted * budget is ~1.3e47, far past i128.
    let whale_amount = 100_000_000_000_000_000_000_i128;
    let whale = test_helpers::staker(&e, &s, whale_amount);
    let minnow = test_helpers::staker(&e, &s, 1_000);
    s.client.open_position(&whale, &whale_amount, &1);
    s.client.open_position(&minnow, &1_000, &0);
    test_helpers::fund(&s, 10_000);

    advance_time(&e, DAY);
    test_helpers::run_pass(&s, 10);

    let total = scaled(whale_amount) * 13 / 10 + scaled(1_000);
    let expected = (scaled(whale_amount) * 13 / 10) / (total / scaled(1_000));
    let whale_position = s.client.get_position(&whale, &0);
    let whale_share = whale_position.principal - scaled(whale_amount);
    assert!(whale_share <= scaled(1_000));
    assert!(whale_share >= expected - 1);

    let ledger = s.client.get_ledger();
    assert!(ledger.total_rewards_distributed <= scaled(1_000));
    test_helpers::assert_totals_match(&s, &[whale, minnow]);
}

#[test]
fn test_single_whale_receives_exact_budget() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let amount = MAX_SCALABLE / 4;
    let whale = test_helpers::staker(&e, &s, amount);
    s.client.open_position(&whale, &amount, &0);
    test_helpers::fund(&s, 10_000);

    advance_time(&e, DAY);
    test_helpers::run_pass(&s, 10);
    assert_eq!(
        s.client.get_position(&whale, &0).accumulated_unclaimed_reward,
        scaled(1_000)
    );
}

#[test]
fn test_early_unstake_burn_on_large_principal() {
    let e = Env::default();
    let s = test_helpers::setup(&e);
    let amount = MAX_SCALABLE / 4;
    let whale = test_helpers::staker(&e, &s, amount);
    s.client.open_position(&whale, &amount, &1);

    let weighted = s.client.get_position(&whale, &0).weighted_principal;
    let quote = s.client.early_unstake(&whale, &0, &weighted);
    assert_eq!(quote.burn_bps, 9_000);
    assert_eq!(quote.payout + quote.burned, amount);
    assert_eq!(quote.payout, amount / 10);
    assert_eq!(s.token.balance(&whale), quote.payout);
}
