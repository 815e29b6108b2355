//! Distribution engine
//!
//! Hands out one period's reward budget across every live position. A pass may span many
//! `distribute` calls: each call visits at most `min(max_positions, max_batch_size)`
//! positions, starting at the persisted cursor, and fully updates a position before the
//! cursor moves past it. The denominator and budget are frozen when the pass starts, so
//! compounding growth realized mid-pass only shows up in the next pass.
//!
//! State machine: `Idle` -> `InProgress(cursor)` -> `Idle`. A new pass can start
//! once `distribution_period` has elapsed since `last_distribution_at`; completing a pass
//! sets `last_distribution_at` to the completion time.
//!
//! Shares are floored. The residue between the budget and the sum of shares is left in
//! the reserve and never attributed to any pass.

use soroban_sdk::{Address, Env};

use crate::custody;
use crate::errors::StakingError;
use crate::events::{
    DistributionAdvanced, DistributionCompleted, DistributionStarted, RewardsFunded,
};
use crate::ledger;
use crate::math;
use crate::storage;
use crate::types::{
    DistributionCursor, DistributionProgress, DistributionState, DistributionStatus, GlobalLedger,
    StakePosition, StakingConfig,
};

/// Runs one bounded step of the current pass, starting a new pass when idle.
pub fn advance(
    e: &Env,
    ledger: &mut GlobalLedger,
    config: &StakingConfig,
    max_positions: u32,
) -> Result<DistributionProgress, StakingError> {
    if max_positions == 0 {
        return Err(StakingError::InvalidBatchSize);
    }
    let batch = max_positions.min(config.max_batch_size);
    let now = e.ledger().timestamp();

    let mut cursor = match ledger.state.cursor() {
        Some(cursor) => cursor,
        None => match start_pass(e, ledger, config, now)? {
            Some(cursor) => cursor,
            None => {
                // Nothing staked: the pass is over before it began.
                finish_pass(e, ledger, 0, now);
                return Ok(DistributionProgress {
                    processed: 0,
                    completed: true,
                    remaining_stakers: 0,
                    distributed: 0,
                });
            }
        },
    };

    let staker_count = storage::staker_count(e);
    let mut processed: u32 = 0;
    while processed < batch && cursor.staker_index < staker_count {
        let owner = storage::staker_at(e, cursor.staker_index)?;
        let mut positions = storage::get_positions(e, &owner);
        let len = positions.len();
        let mut touched = false;
        while processed < batch && cursor.position_index < len {
            let mut position = positions
                .get(cursor.position_index)
                .ok_or(StakingError::InvalidPositionIndex)?;
            apply_share(e, ledger, &mut cursor, &mut position)?;
            positions.set(cursor.position_index, position);
            touched = true;
            cursor.position_index += 1;
            processed += 1;
        }
        if touched {
            storage::set_positions(e, &owner, &positions);
        }
        if cursor.position_index >= len {
            cursor.staker_index += 1;
            cursor.position_index = 0;
        }
    }

    let completed = cursor.staker_index >= staker_count;
    let distributed = cursor.distributed;
    let remaining_stakers = staker_count.saturating_sub(cursor.staker_index);
    if completed {
        finish_pass(e, ledger, distributed, now);
    } else {
        DistributionAdvanced {
            processed,
            staker_index: cursor.staker_index,
            position_index: cursor.position_index,
        }
        .publish(e);
        ledger.state = DistributionState::InProgress(cursor);
    }

    Ok(DistributionProgress {
        processed,
        completed,
        remaining_stakers,
        distributed,
    })
}

/// Opens a pass, or returns `None` when there is no weight to distribute against.
fn start_pass(
    e: &Env,
    ledger: &GlobalLedger,
    config: &StakingConfig,
    now: u64,
) -> Result<Option<DistributionCursor>, StakingError> {
    let ready_at = next_distribution_at(ledger, config);
    if now < ready_at {
        return Err(StakingError::DistributionCooldown);
    }
    if ledger.total_weighted_principal == 0 {
        return Ok(None);
    }
    if ledger.reward_reserve < config.daily_budget {
        return Err(StakingError::InsufficientRewardReserve);
    }

    let cursor = DistributionCursor {
        staker_index: 0,
        position_index: 0,
        pass_total_weight: ledger.total_weighted_principal,
        pass_budget: config.daily_budget,
        started_at: now,
        distributed: 0,
    };
    DistributionStarted {
        started_at: now,
        pass_total_weight: cursor.pass_total_weight,
        pass_budget: cursor.pass_budget,
        stakers: storage::staker_count(e),
    }
    .publish(e);
    Ok(Some(cursor))
}

/// Credits one position's share against the frozen pass denominator.
pub fn apply_share(
    e: &Env,
    ledger: &mut GlobalLedger,
    cursor: &mut DistributionCursor,
    position: &mut StakePosition,
) -> Result<i128, StakingError> {
    let share = math::pro_rata_share(
        e,
        position.weighted_principal,
        cursor.pass_budget,
        cursor.pass_total_weight,
    )?;
    if share == 0 {
        return Ok(0);
    }

    if position.compounding {
        let weighted = math::weight(e, share, position.multiplier)?;
        ledger::record_compound(ledger, position, share, weighted)?;
    } else {
        position.accumulated_unclaimed_reward =
            math::add(position.accumulated_unclaimed_reward, share)?;
    }

    ledger.reward_reserve = math::sub(ledger.reward_reserve, share)?;
    ledger.total_rewards_distributed = math::add(ledger.total_rewards_distributed, share)?;
    cursor.distributed = math::add(cursor.distributed, share)?;
    Ok(share)
}

fn finish_pass(e: &Env, ledger: &mut GlobalLedger, distributed: i128, now: u64) {
    ledger.state = DistributionState::Idle;
    ledger.last_distribution_at = now;
    DistributionCompleted {
        completed_at: now,
        distributed,
        total_principal: ledger.total_principal,
        total_weighted_principal: ledger.total_weighted_principal,
    }
    .publish(e);
}

pub fn next_distribution_at(ledger: &GlobalLedger, config: &StakingConfig) -> u64 {
    ledger
        .last_distribution_at
        .saturating_add(config.distribution_period)
}

pub fn status(ledger: &GlobalLedger, config: &StakingConfig) -> DistributionStatus {
    DistributionStatus {
        state: ledger.state.clone(),
        last_distribution_at: ledger.last_distribution_at,
        next_distribution_at: next_distribution_at(ledger, config),
    }
}

/// Tops up the reward reserve with `amount` token base units from `from`.
pub fn fund_rewards(
    e: &Env,
    ledger: &mut GlobalLedger,
    config: &StakingConfig,
    from: &Address,
    amount: i128,
) -> Result<(), StakingError> {
    if amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    ledger.reward_reserve = math::add(ledger.reward_reserve, math::to_scaled(amount)?)?;
    custody::debit(e, &config.stake_token, from, amount);
    RewardsFunded {
        from: from.clone(),
        amount,
        reward_reserve: ledger.reward_reserve,
    }
    .publish(e);
    Ok(())
}
