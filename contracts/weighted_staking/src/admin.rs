//! Admin surface: configuration setters, pause switch, genesis epoch, emergency withdrawal.
//!
//! Setters validate their input so the engine invariants hold no matter what the admin
//! submits. None of them touch live positions.

use soroban_sdk::{Address, Env, Vec};

use crate::custody;
use crate::errors::StakingError;
use crate::events::{
    DailyBudgetUpdated, DistributionParamsUpdated, EmergencyWithdrawal, GenesisEpochSet,
    MinStakeUpdated, PauseChanged, ProgramsUpdated,
};
use crate::math;
use crate::programs;
use crate::storage;
use crate::types::{DurationProgram, StakingConfig};

/// Authenticates `admin` and checks it is the configured admin.
pub fn require_admin(config: &StakingConfig, admin: &Address) -> Result<(), StakingError> {
    admin.require_auth();
    if *admin != config.admin {
        return Err(StakingError::Unauthorized);
    }
    Ok(())
}

pub fn require_not_paused(config: &StakingConfig) -> Result<(), StakingError> {
    if config.paused {
        return Err(StakingError::Paused);
    }
    Ok(())
}

pub fn set_duration_programs(
    e: &Env,
    config: &StakingConfig,
    new_programs: Vec<DurationProgram>,
) -> Result<(), StakingError> {
    programs::validate_programs(&new_programs, config.month_length)?;
    storage::set_programs(e, &new_programs);
    ProgramsUpdated {
        programs: new_programs,
    }
    .publish(e);
    Ok(())
}

/// `daily_budget` is in token base units.
pub fn set_daily_budget_target(
    e: &Env,
    config: &mut StakingConfig,
    daily_budget: i128,
) -> Result<(), StakingError> {
    if daily_budget <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    config.daily_budget = math::to_scaled(daily_budget)?;
    storage::set_config(e, config);
    DailyBudgetUpdated {
        daily_budget: config.daily_budget,
    }
    .publish(e);
    Ok(())
}

pub fn set_min_stake_amount(
    e: &Env,
    config: &mut StakingConfig,
    min_stake_amount: i128,
) -> Result<(), StakingError> {
    if min_stake_amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    config.min_stake_amount = min_stake_amount;
    storage::set_config(e, config);
    MinStakeUpdated { min_stake_amount }.publish(e);
    Ok(())
}

pub fn set_distribution_params(
    e: &Env,
    config: &mut StakingConfig,
    distribution_period: u64,
    max_batch_size: u32,
) -> Result<(), StakingError> {
    if distribution_period == 0 || max_batch_size == 0 {
        return Err(StakingError::InvalidParameter);
    }
    config.distribution_period = distribution_period;
    config.max_batch_size = max_batch_size;
    storage::set_config(e, config);
    DistributionParamsUpdated {
        distribution_period,
        max_batch_size,
    }
    .publish(e);
    Ok(())
}

/// One-time anchor for the genesis program window.
pub fn set_genesis_epoch(e: &Env, config: &mut StakingConfig, epoch: u64) -> Result<(), StakingError> {
    if epoch == 0 {
        return Err(StakingError::InvalidEpoch);
    }
    if config.genesis_epoch.is_some() {
        return Err(StakingError::GenesisEpochAlreadySet);
    }
    config.genesis_epoch = Some(epoch);
    storage::set_config(e, config);
    GenesisEpochSet {
        genesis_epoch: epoch,
    }
    .publish(e);
    Ok(())
}

pub fn set_paused(e: &Env, config: &mut StakingConfig, paused: bool) {
    config.paused = paused;
    storage::set_config(e, config);
    PauseChanged { paused }.publish(e);
}

/// Sends `amount` of a foreign asset held by the contract to the admin. The stake token
/// backs principal and the reward reserve and cannot be withdrawn this way.
pub fn emergency_withdraw(
    e: &Env,
    config: &StakingConfig,
    asset: &Address,
    amount: i128,
) -> Result<(), StakingError> {
    if *asset == config.stake_token {
        return Err(StakingError::ProtectedAsset);
    }
    if amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    custody::credit(e, asset, &config.admin, amount);
    EmergencyWithdrawal {
        asset: asset.clone(),
        recipient: config.admin.clone(),
        amount,
    }
    .publish(e);
    Ok(())
}
