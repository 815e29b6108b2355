//! Contract data types: program catalogue, positions, global aggregates.

use soroban_sdk::{contracttype, Address, Vec};

/// One entry of the duration program table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationProgram {
    /// Position of the entry in the table.
    pub index: u32,
    /// Lock length in seconds. Zero only for program 0.
    pub lock_duration: u64,
    /// Weight multiplier, 10_000 = 1.00x.
    pub multiplier: u32,
    /// Early exit burn in bps, indexed by whole months elapsed. Empty for program 0.
    pub burn_schedule: Vec<u32>,
}

/// A single stake position. All amounts are scaled by `PRECISION`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub principal: i128,
    /// Cached `principal * multiplier`; grows with compounding, shrinks with exits.
    pub weighted_principal: i128,
    pub program_index: u32,
    /// Multiplier in force when the position opened.
    pub multiplier: u32,
    pub compounding: bool,
    pub accumulated_unclaimed_reward: i128,
    pub created_at: u64,
    pub matures_at: u64,
}

impl StakePosition {
    pub fn is_locked(&self) -> bool {
        self.program_index != 0
    }
}

/// Resumption point of an in-flight distribution pass.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionCursor {
    /// Slot in the staker registry currently being visited.
    pub staker_index: u32,
    /// Next position of that staker to visit.
    pub position_index: u32,
    /// Total weighted principal frozen at pass start.
    pub pass_total_weight: i128,
    /// Daily budget frozen at pass start.
    pub pass_budget: i128,
    pub started_at: u64,
    /// Sum of shares applied so far in this pass.
    pub distributed: i128,
}

/// Distribution state machine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DistributionState {
    Idle,
    InProgress(DistributionCursor),
}

impl DistributionState {
    pub fn cursor(&self) -> Option<DistributionCursor> {
        match self {
            DistributionState::Idle => None,
            DistributionState::InProgress(cursor) => Some(cursor.clone()),
        }
    }
}

/// Process-wide aggregate state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalLedger {
    pub total_principal: i128,
    pub total_weighted_principal: i128,
    /// Timestamp of the last completed pass.
    pub last_distribution_at: u64,
    pub state: DistributionState,
    /// Funded rewards not yet handed out, plus the sub-unit remainders left by exits.
    pub reward_reserve: i128,
    pub total_rewards_distributed: i128,
}

impl GlobalLedger {
    pub fn new(now: u64) -> Self {
        Self {
            total_principal: 0,
            total_weighted_principal: 0,
            last_distribution_at: now,
            state: DistributionState::Idle,
            reward_reserve: 0,
            total_rewards_distributed: 0,
        }
    }

    pub fn is_distributing(&self) -> bool {
        matches!(self.state, DistributionState::InProgress(_))
    }
}

/// Runtime configuration, admin-mutable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    pub admin: Address,
    pub stake_token: Address,
    /// Reward released per pass, scaled.
    pub daily_budget: i128,
    /// Floor on new positions, in token base units.
    pub min_stake_amount: i128,
    pub distribution_period: u64,
    pub month_length: u64,
    pub genesis_window: u64,
    pub max_batch_size: u32,
    pub genesis_epoch: Option<u64>,
    pub paused: bool,
}

/// Result of one `distribute` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionProgress {
    /// Positions visited by this call.
    pub processed: u32,
    /// True once the pass reached the end of the enumeration.
    pub completed: bool,
    /// Stakers not yet fully visited (0 when completed).
    pub remaining_stakers: u32,
    /// Shares applied in this pass so far, scaled.
    pub distributed: i128,
}

/// Read-only view of the distribution state machine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionStatus {
    pub state: DistributionState,
    pub last_distribution_at: u64,
    pub next_distribution_at: u64,
}

/// Outcome of an early exit, as previewed or executed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyUnstakeQuote {
    pub months_elapsed: u64,
    pub burn_bps: u32,
    /// Principal removed from the position, scaled.
    pub principal_removed: i128,
    /// Scaled principal destroyed.
    pub burn_amount: i128,
    /// Scaled principal returned to the owner.
    pub net_amount: i128,
    /// Token base units paid out.
    pub payout: i128,
    /// Token base units burned.
    pub burned: i128,
    /// Scaled remainder below one token, returned to the reward reserve.
    pub dust: i128,
}
