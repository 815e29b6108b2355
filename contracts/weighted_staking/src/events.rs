//! Contract events. Scaled amounts carry `PRECISION`; token amounts are base units.

use soroban_sdk::{contractevent, Address, Vec};

use crate::types::DurationProgram;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    #[topic]
    pub admin: Address,
    pub stake_token: Address,
    pub daily_budget: i128,
    pub min_stake_amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionOpened {
    #[topic]
    pub owner: Address,
    pub position_index: u32,
    pub program_index: u32,
    pub amount: i128,
    pub weighted_principal: i128,
    pub matures_at: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionUnstaked {
    #[topic]
    pub owner: Address,
    pub position_index: u32,
    pub weighted_amount: i128,
    pub principal_removed: i128,
    pub payout: i128,
    pub closed: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionEarlyUnstaked {
    #[topic]
    pub owner: Address,
    pub position_index: u32,
    pub weighted_amount: i128,
    pub burn_bps: u32,
    pub payout: i128,
    pub burned: i128,
    pub closed: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimed {
    #[topic]
    pub owner: Address,
    pub position_index: u32,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundingToggled {
    #[topic]
    pub owner: Address,
    pub position_index: u32,
    pub compounding: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionStarted {
    pub started_at: u64,
    pub pass_total_weight: i128,
    pub pass_budget: i128,
    pub stakers: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionAdvanced {
    pub processed: u32,
    pub staker_index: u32,
    pub position_index: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionCompleted {
    pub completed_at: u64,
    pub distributed: i128,
    pub total_principal: i128,
    pub total_weighted_principal: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgramsUpdated {
    pub programs: Vec<DurationProgram>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DailyBudgetUpdated {
    pub daily_budget: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinStakeUpdated {
    pub min_stake_amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionParamsUpdated {
    pub distribution_period: u64,
    pub max_batch_size: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisEpochSet {
    pub genesis_epoch: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFunded {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub reward_reserve: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChanged {
    pub paused: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawal {
    #[topic]
    pub asset: Address,
    pub recipient: Address,
    pub amount: i128,
}
