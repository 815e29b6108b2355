#![no_std]

//! # Weighted Staking Contract
//!
//! Users lock the stake token under a duration program and share a fixed daily reward
//! budget pro rata to their weighted principal (principal x program multiplier).
//! Locked programs compound automatically and can be exited before maturity at a
//! month-indexed burn penalty; the unlocked program accrues claimable rewards unless
//! compounding is switched on.
//!
//! The daily distribution is a resumable batch job: anyone may call `distribute`, each
//! call visits a bounded number of positions, and staking/unstaking is blocked until the
//! pass reaches the end.

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub mod admin;
pub mod constants;
pub mod custody;
pub mod distribution;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod lifecycle;
pub mod math;
pub mod programs;
pub mod storage;
pub mod types;

pub use errors::{ErrorKind, StakingError};
pub use types::{
    DistributionCursor, DistributionProgress, DistributionState, DistributionStatus, DurationProgram,
    EarlyUnstakeQuote, GlobalLedger, StakePosition, StakingConfig,
};

use constants::{
    DEFAULT_DISTRIBUTION_PERIOD, DEFAULT_GENESIS_WINDOW, DEFAULT_MAX_BATCH_SIZE,
    DEFAULT_MONTH_LENGTH,
};
use events::Initialized;

#[contract]
pub struct WeightedStaking;

#[contractimpl]
impl WeightedStaking {
    /// Initialize the contract.
    /// @param admin Address allowed to configure, pause and run emergency withdrawals
    /// @param stake_token SEP-41 token users stake and are rewarded in
    /// @param daily_budget Reward released per distribution pass, in token base units
    /// @param min_stake_amount Smallest new position, in token base units
    pub fn initialize(
        e: Env,
        admin: Address,
        stake_token: Address,
        daily_budget: i128,
        min_stake_amount: i128,
    ) -> Result<(), StakingError> {
        if storage::is_initialized(&e) {
            return Err(StakingError::AlreadyInitialized);
        }
        admin.require_auth();
        if daily_budget <= 0 || min_stake_amount <= 0 {
            return Err(StakingError::InvalidAmount);
        }

        let config = StakingConfig {
            admin: admin.clone(),
            stake_token: stake_token.clone(),
            daily_budget: math::to_scaled(daily_budget)?,
            min_stake_amount,
            distribution_period: DEFAULT_DISTRIBUTION_PERIOD,
            month_length: DEFAULT_MONTH_LENGTH,
            genesis_window: DEFAULT_GENESIS_WINDOW,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            genesis_epoch: None,
            paused: false,
        };
        storage::set_config(&e, &config);
        storage::set_programs(&e, &programs::default_programs(&e));
        storage::set_ledger(&e, &GlobalLedger::new(e.ledger().timestamp()));
        storage::bump_instance(&e);

        Initialized {
            admin,
            stake_token,
            daily_budget: config.daily_budget,
            min_stake_amount,
        }
        .publish(&e);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    /// Lock `amount` base units under `program_index`. Returns the new position index.
    pub fn open_position(
        e: Env,
        owner: Address,
        amount: i128,
        program_index: u32,
    ) -> Result<u32, StakingError> {
        owner.require_auth();
        let config = Self::active_config(&e)?;
        let programs = storage::get_programs(&e)?;
        let mut ledger = storage::get_ledger(&e)?;
        let index = lifecycle::open_position(
            &e,
            &mut ledger,
            &config,
            &programs,
            &owner,
            amount,
            program_index,
        )?;
        storage::set_ledger(&e, &ledger);
        Ok(index)
    }

    /// Exit `weighted_amount` (scaled weighted units) of a matured or unlocked position.
    /// Returns the payout in base units.
    pub fn unstake(
        e: Env,
        owner: Address,
        position_index: u32,
        weighted_amount: i128,
    ) -> Result<i128, StakingError> {
        owner.require_auth();
        let config = Self::active_config(&e)?;
        let mut ledger = storage::get_ledger(&e)?;
        let payout = lifecycle::unstake(
            &e,
            &mut ledger,
            &config,
            &owner,
            position_index,
            weighted_amount,
        )?;
        storage::set_ledger(&e, &ledger);
        Ok(payout)
    }

    /// Exit `weighted_amount` of a locked position before maturity, burning the
    /// scheduled share of the principal removed.
    pub fn early_unstake(
        e: Env,
        owner: Address,
        position_index: u32,
        weighted_amount: i128,
    ) -> Result<EarlyUnstakeQuote, StakingError> {
        owner.require_auth();
        let config = Self::active_config(&e)?;
        let programs = storage::get_programs(&e)?;
        let mut ledger = storage::get_ledger(&e)?;
        let quote = lifecycle::early_unstake(
            &e,
            &mut ledger,
            &config,
            &programs,
            &owner,
            position_index,
            weighted_amount,
        )?;
        storage::set_ledger(&e, &ledger);
        Ok(quote)
    }

    /// Read-only counterpart of `early_unstake`.
    pub fn preview_early_unstake(
        e: Env,
        owner: Address,
        position_index: u32,
        weighted_amount: i128,
    ) -> Result<EarlyUnstakeQuote, StakingError> {
        let config = storage::get_config(&e)?;
        let programs = storage::get_programs(&e)?;
        lifecycle::preview_early_unstake(
            &e,
            &config,
            &programs,
            &owner,
            position_index,
            weighted_amount,
        )
    }

    /// Transfer the position's accumulated reward to its owner. Allowed mid-pass.
    pub fn claim_reward(e: Env, owner: Address, position_index: u32) -> Result<i128, StakingError> {
        owner.require_auth();
        let config = Self::active_config(&e)?;
        lifecycle::claim_reward(&e, &config, &owner, position_index)
    }

    /// Flip compounding on an unlocked position. Allowed mid-pass.
    pub fn toggle_compounding(
        e: Env,
        owner: Address,
        position_index: u32,
    ) -> Result<bool, StakingError> {
        owner.require_auth();
        Self::active_config(&e)?;
        lifecycle::toggle_compounding(&e, &owner, position_index)
    }

    // ------------------------------------------------------------------
    // Distribution
    // ------------------------------------------------------------------

    /// Advance the distribution pass by up to `max_positions` positions, starting a new
    /// pass if idle and the cooldown has elapsed. Callable by anyone.
    pub fn distribute(e: Env, max_positions: u32) -> Result<DistributionProgress, StakingError> {
        let config = Self::active_config(&e)?;
        let mut ledger = storage::get_ledger(&e)?;
        let progress = distribution::advance(&e, &mut ledger, &config, max_positions)?;
        storage::set_ledger(&e, &ledger);
        Ok(progress)
    }

    pub fn distribution_status(e: Env) -> Result<DistributionStatus, StakingError> {
        let config = storage::get_config(&e)?;
        let ledger = storage::get_ledger(&e)?;
        Ok(distribution::status(&ledger, &config))
    }

    /// Add `amount` base units to the reward reserve.
    pub fn fund_rewards(e: Env, from: Address, amount: i128) -> Result<(), StakingError> {
        from.require_auth();
        let config = storage::get_config(&e)?;
        let mut ledger = storage::get_ledger(&e)?;
        distribution::fund_rewards(&e, &mut ledger, &config, &from, amount)?;
        storage::set_ledger(&e, &ledger);
        storage::bump_instance(&e);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    pub fn set_duration_programs(
        e: Env,
        admin: Address,
        programs: Vec<DurationProgram>,
    ) -> Result<(), StakingError> {
        let config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_duration_programs(&e, &config, programs)
    }

    /// @param daily_budget Reward per pass in base units, > 0. Takes effect on the next pass.
    pub fn set_daily_budget_target(
        e: Env,
        admin: Address,
        daily_budget: i128,
    ) -> Result<(), StakingError> {
        let mut config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_daily_budget_target(&e, &mut config, daily_budget)
    }

    pub fn set_min_stake_amount(
        e: Env,
        admin: Address,
        min_stake_amount: i128,
    ) -> Result<(), StakingError> {
        let mut config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_min_stake_amount(&e, &mut config, min_stake_amount)
    }

    pub fn set_distribution_params(
        e: Env,
        admin: Address,
        distribution_period: u64,
        max_batch_size: u32,
    ) -> Result<(), StakingError> {
        let mut config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_distribution_params(&e, &mut config, distribution_period, max_batch_size)
    }

    pub fn set_genesis_epoch(e: Env, admin: Address, epoch: u64) -> Result<(), StakingError> {
        let mut config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_genesis_epoch(&e, &mut config, epoch)
    }

    pub fn pause(e: Env, admin: Address) -> Result<(), StakingError> {
        let mut config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_paused(&e, &mut config, true);
        Ok(())
    }

    pub fn unpause(e: Env, admin: Address) -> Result<(), StakingError> {
        let mut config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::set_paused(&e, &mut config, false);
        Ok(())
    }

    pub fn emergency_withdraw(
        e: Env,
        admin: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), StakingError> {
        let config = storage::get_config(&e)?;
        admin::require_admin(&config, &admin)?;
        admin::emergency_withdraw(&e, &config, &asset, amount)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn get_config(e: Env) -> Result<StakingConfig, StakingError> {
        storage::get_config(&e)
    }

    pub fn get_ledger(e: Env) -> Result<GlobalLedger, StakingError> {
        storage::get_ledger(&e)
    }

    pub fn get_programs(e: Env) -> Result<Vec<DurationProgram>, StakingError> {
        storage::get_programs(&e)
    }

    pub fn get_position(
        e: Env,
        owner: Address,
        position_index: u32,
    ) -> Result<StakePosition, StakingError> {
        storage::get_positions(&e, &owner)
            .get(position_index)
            .ok_or(StakingError::InvalidPositionIndex)
    }

    pub fn get_positions(e: Env, owner: Address) -> Vec<StakePosition> {
        storage::get_positions(&e, &owner)
    }

    pub fn position_count(e: Env, owner: Address) -> u32 {
        storage::get_positions(&e, &owner).len()
    }

    pub fn staker_count(e: Env) -> u32 {
        storage::staker_count(&e)
    }

    /// Sum of principal over the owner's positions, scaled by `PRECISION`.
    pub fn total_position_principal(e: Env, owner: Address) -> Result<i128, StakingError> {
        lifecycle::total_position_principal(&e, &owner)
    }

    /// Governance weight in base units: staked principal, unclaimed reward and wallet balance.
    /// Counts more than `total_position_principal`, which excludes unclaimed reward and the
    /// wallet balance and is scaled.
    pub fn voting_power(e: Env, owner: Address) -> Result<i128, StakingError> {
        let config = storage::get_config(&e)?;
        lifecycle::voting_power(&e, &config, &owner)
    }
}

impl WeightedStaking {
    /// Loads the config for a user-facing mutation, rejecting while paused.
    fn active_config(e: &Env) -> Result<StakingConfig, StakingError> {
        let config = storage::get_config(e)?;
        admin::require_not_paused(&config)?;
        storage::bump_instance(e);
        Ok(config)
    }
}





#[cfg(test)]
mod test_open_position;







#[cfg(test)]
mod security;
