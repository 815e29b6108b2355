//! Position lifecycle: open, unstake at maturity, early unstake, claim, compounding.
//!
//! Exit amounts are given in weighted units and converted back to principal through the
//! position's own ratio, so a partial exit shrinks principal and weight by the same
//! fraction. Positions are removed by swap-remove: when a position closes, the owner's
//! last position takes its index.
//!
//! Payouts are whole token units. The scaled remainder of an exit goes back to the reward
//! reserve; the remainder of a claim stays on the position.

use soroban_sdk::{Address, Env, Vec};

use crate::custody;
use crate::errors::StakingError;
use crate::events::{
    CompoundingToggled, PositionEarlyUnstaked, PositionOpened, PositionUnstaked, RewardClaimed,
};
use crate::ledger;
use crate::math;
use crate::programs;
use crate::storage;
use crate::types::{DurationProgram, EarlyUnstakeQuote, GlobalLedger, StakePosition, StakingConfig};

pub fn open_position(
    e: &Env,
    ledger: &mut GlobalLedger,
    config: &StakingConfig,
    programs: &Vec<DurationProgram>,
    owner: &Address,
    amount: i128,
    program_index: u32,
) -> Result<u32, StakingError> {
    ledger::require_idle(ledger)?;
    if amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    if amount < config.min_stake_amount {
        return Err(StakingError::BelowMinimumStake);
    }
    let program = programs::get_program(programs, program_index)?;
    let now = e.ledger().timestamp();
    if programs::is_genesis(programs, program_index) {
        check_genesis_window(config, now)?;
    }

    let principal = math::to_scaled(amount)?;
    let weighted_principal = math::weight(e, principal, program.multiplier)?;
    let matures_at = now
        .checked_add(program.lock_duration)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let position = StakePosition {
        principal,
        weighted_principal,
        program_index,
        multiplier: program.multiplier,
        compounding: program_index != 0,
        accumulated_unclaimed_reward: 0,
        created_at: now,
        matures_at,
    };

    ledger::record_open(ledger, &position)?;
    let mut positions = storage::get_positions(e, owner);
    let position_index = positions.len();
    positions.push_back(position);
    storage::set_positions(e, owner, &positions);
    storage::register_staker(e, owner)?;
    custody::debit(e, &config.stake_token, owner, amount);

    PositionOpened {
        owner: owner.clone(),
        position_index,
        program_index,
        amount,
        weighted_principal,
        matures_at,
    }
    .publish(e);
    Ok(position_index)
}

fn check_genesis_window(config: &StakingConfig, now: u64) -> Result<(), StakingError> {
    let epoch = config.genesis_epoch.ok_or(StakingError::GenesisEpochNotSet)?;
    let closes_at = epoch.saturating_add(config.genesis_window);
    if now < epoch || now >= closes_at {
        return Err(StakingError::GenesisWindowClosed);
    }
    Ok(())
}

/// Exits `weighted_amount` of a matured (or unlocked) position. Returns the token payout.
pub fn unstake(
    e: &Env,
    ledger: &mut GlobalLedger,
    config: &StakingConfig,
    owner: &Address,
    position_index: u32,
    weighted_amount: i128,
) -> Result<i128, StakingError> {
    ledger::require_idle(ledger)?;
    let mut positions = storage::get_positions(e, owner);
    let mut position = load(&positions, position_index)?;
    if position.is_locked() && e.ledger().timestamp() < position.matures_at {
        return Err(StakingError::LockNotMatured);
    }
    let principal_removed = principal_for(e, &position, weighted_amount)?;

    ledger::record_removal(ledger, &mut position, principal_removed, weighted_amount)?;
    let closed = position.weighted_principal == 0;
    let leaving = if closed {
        math::add(principal_removed, position.accumulated_unclaimed_reward)?
    } else {
        principal_removed
    };
    let (payout, dust) = math::split_token_units(leaving);
    ledger.reward_reserve = math::add(ledger.reward_reserve, dust)?;
    store(e, owner, &mut positions, position_index, position, closed)?;
    custody::credit(e, &config.stake_token, owner, payout);

    PositionUnstaked {
        owner: owner.clone(),
        position_index,
        weighted_amount,
        principal_removed,
        payout,
        closed,
    }
    .publish(e);
    Ok(payout)
}

/// Computes the early exit split without touching state.
pub fn quote_early_unstake(
    e: &Env,
    config: &StakingConfig,
    programs: &Vec<DurationProgram>,
    position: &StakePosition,
    weighted_amount: i128,
) -> Result<EarlyUnstakeQuote, StakingError> {
    if !position.is_locked() {
        return Err(StakingError::NotLocked);
    }
    let now = e.ledger().timestamp();
    if now >= position.matures_at {
        return Err(StakingError::LockMatured);
    }
    let principal_removed = principal_for(e, position, weighted_amount)?;
    let program = programs::get_program(programs, position.program_index)?;
    let months_elapsed = now.saturating_sub(position.created_at) / config.month_length;
    let burn_bps = programs::burn_percentage(&program, months_elapsed);
    let burn_amount = math::apply_bps(e, principal_removed, burn_bps)?;
    let net_amount = math::sub(principal_removed, burn_amount)?;

    // A full exit also releases the unclaimed reward, which is never burned.
    let released = if weighted_amount == position.weighted_principal {
        position.accumulated_unclaimed_reward
    } else {
        0
    };
    let payout = math::to_token_units(math::add(net_amount, released)?);
    let (leaving, dust) = math::split_token_units(math::add(principal_removed, released)?);
    let burned = math::sub(leaving, payout)?;

    Ok(EarlyUnstakeQuote {
        months_elapsed,
        burn_bps,
        principal_removed,
        burn_amount,
        net_amount,
        payout,
        burned,
        dust,
    })
}

/// Exits `weighted_amount` of a locked position before maturity, burning the scheduled
/// share of the principal removed.
pub fn early_unstake(
    e: &Env,
    ledger: &mut GlobalLedger,
    config: &StakingConfig,
    programs: &Vec<DurationProgram>,
    owner: &Address,
    position_index: u32,
    weighted_amount: i128,
) -> Result<EarlyUnstakeQuote, StakingError> {
    ledger::require_idle(ledger)?;
    let mut positions = storage::get_positions(e, owner);
    let mut position = load(&positions, position_index)?;
    let quote = quote_early_unstake(e, config, programs, &position, weighted_amount)?;

    ledger::record_removal(ledger, &mut position, quote.principal_removed, weighted_amount)?;
    ledger.reward_reserve = math::add(ledger.reward_reserve, quote.dust)?;
    let closed = position.weighted_principal == 0;
    store(e, owner, &mut positions, position_index, position, closed)?;
    custody::credit(e, &config.stake_token, owner, quote.payout);
    custody::burn(e, &config.stake_token, quote.burned);

    PositionEarlyUnstaked {
        owner: owner.clone(),
        position_index,
        weighted_amount,
        burn_bps: quote.burn_bps,
        payout: quote.payout,
        burned: quote.burned,
        closed,
    }
    .publish(e);
    Ok(quote)
}

pub fn preview_early_unstake(
    e: &Env,
    config: &StakingConfig,
    programs: &Vec<DurationProgram>,
    owner: &Address,
    position_index: u32,
    weighted_amount: i128,
) -> Result<EarlyUnstakeQuote, StakingError> {
    let positions = storage::get_positions(e, owner);
    let position = load(&positions, position_index)?;
    quote_early_unstake(e, config, programs, &position, weighted_amount)
}

/// Pays out the whole-unit part of the position's accumulated reward; the sub-unit
/// remainder stays on the position. Returns the token amount transferred.
pub fn claim_reward(
    e: &Env,
    config: &StakingConfig,
    owner: &Address,
    position_index: u32,
) -> Result<i128, StakingError> {
    let mut positions = storage::get_positions(e, owner);
    let mut position = load(&positions, position_index)?;
    let (amount, dust) = math::split_token_units(position.accumulated_unclaimed_reward);
    if amount == 0 {
        return Err(StakingError::NothingToClaim);
    }
    position.accumulated_unclaimed_reward = dust;
    positions.set(position_index, position);
    storage::set_positions(e, owner, &positions);
    custody::credit(e, &config.stake_token, owner, amount);

    RewardClaimed {
        owner: owner.clone(),
        position_index,
        amount,
    }
    .publish(e);
    Ok(amount)
}

/// Flips compounding on an unlocked position. Returns the new setting.
pub fn toggle_compounding(e: &Env, owner: &Address, position_index: u32) -> Result<bool, StakingError> {
    let mut positions = storage::get_positions(e, owner);
    let mut position = load(&positions, position_index)?;
    if position.is_locked() {
        return Err(StakingError::CompoundingLocked);
    }
    position.compounding = !position.compounding;
    let compounding = position.compounding;
    positions.set(position_index, position);
    storage::set_positions(e, owner, &positions);

    CompoundingToggled {
        owner: owner.clone(),
        position_index,
        compounding,
    }
    .publish(e);
    Ok(compounding)
}

/// Sum of principal over the owner's live positions, scaled.
pub fn total_position_principal(e: &Env, owner: &Address) -> Result<i128, StakingError> {
    let mut total: i128 = 0;
    for position in storage::get_positions(e, owner).iter() {
        total = math::add(total, position.principal)?;
    }
    Ok(total)
}

/// Governance readout in token units: staked principal, unclaimed reward and the
/// owner's external stake-token balance.
pub fn voting_power(e: &Env, config: &StakingConfig, owner: &Address) -> Result<i128, StakingError> {
    let mut locked: i128 = 0;
    for position in storage::get_positions(e, owner).iter() {
        locked = math::add(locked, position.principal)?;
        locked = math::add(locked, position.accumulated_unclaimed_reward)?;
    }
    let external = custody::balance_of(e, &config.stake_token, owner);
    math::add(math::to_token_units(locked), external)
}

fn load(positions: &Vec<StakePosition>, position_index: u32) -> Result<StakePosition, StakingError> {
    positions
        .get(position_index)
        .ok_or(StakingError::InvalidPositionIndex)
}

/// Principal backing `weighted_amount` of `position`.
fn principal_for(e: &Env, position: &StakePosition, weighted_amount: i128) -> Result<i128, StakingError> {
    if weighted_amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    if weighted_amount > position.weighted_principal {
        return Err(StakingError::InsufficientWeightedBalance);
    }
    if weighted_amount == position.weighted_principal {
        return Ok(position.principal);
    }
    math::mul_div_floor(
        e,
        position.principal,
        weighted_amount,
        position.weighted_principal,
    )
}

/// Writes back `position`, or swap-removes it when `closed`.
fn store(
    e: &Env,
    owner: &Address,
    positions: &mut Vec<StakePosition>,
    position_index: u32,
    position: StakePosition,
    closed: bool,
) -> Result<(), StakingError> {
    if closed {
        let last = positions
            .pop_back()
            .ok_or(StakingError::InvalidPositionIndex)?;
        if position_index < positions.len() {
            positions.set(position_index, last);
        }
    } else {
        positions.set(position_index, position);
    }
    storage::set_positions(e, owner, positions);
    if positions.is_empty() {
        storage::unregister_staker(e, owner)?;
    }
    Ok(())
}
