//! Contract error codes.
//!
//! Codes are grouped by decade so off-chain callers can tell at a glance whether a
//! rejected call is worth retrying later (temporal) or will never succeed as issued.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StakingError {
    // Lifecycle / authorization
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    Paused = 4,

    // Validation
    InvalidProgram = 10,
    InvalidAmount = 11,
    BelowMinimumStake = 12,
    InvalidProgramTable = 13,
    InvalidBatchSize = 14,
    InvalidEpoch = 15,
    InvalidParameter = 16,
    ProtectedAsset = 17,
    GenesisEpochAlreadySet = 18,

    // Temporal
    LockNotMatured = 20,
    LockMatured = 21,
    GenesisWindowClosed = 22,
    GenesisEpochNotSet = 23,
    DistributionCooldown = 24,
    DistributionInProgress = 25,

    // Insufficient state
    NothingToClaim = 30,
    InsufficientWeightedBalance = 31,
    InvalidPositionIndex = 32,
    NotLocked = 33,
    CompoundingLocked = 34,
    InsufficientRewardReserve = 35,

    // Arithmetic
    ArithmeticOverflow = 40,
}

/// Coarse classification of [`StakingError`] codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Lifecycle,
    Authorization,
    Paused,
    Validation,
    Temporal,
    InsufficientState,
    Arithmetic,
}

impl StakingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StakingError::NotInitialized | StakingError::AlreadyInitialized => {
                ErrorKind::Lifecycle
            }
            StakingError::Unauthorized => ErrorKind::Authorization,
            StakingError::Paused => ErrorKind::Paused,
            StakingError::InvalidProgram
            | StakingError::InvalidAmount
            | StakingError::BelowMinimumStake
            | StakingError::InvalidProgramTable
            | StakingError::InvalidBatchSize
            | StakingError::InvalidEpoch
            | StakingError::InvalidParameter
            | StakingError::ProtectedAsset
            | StakingError::GenesisEpochAlreadySet => ErrorKind::Validation,
            StakingError::LockNotMatured
            | StakingError::LockMatured
            | StakingError::GenesisWindowClosed
            | StakingError::GenesisEpochNotSet
            | StakingError::DistributionCooldown
            | StakingError::DistributionInProgress => ErrorKind::Temporal,
            StakingError::NothingToClaim
            | StakingError::InsufficientWeightedBalance
            | StakingError::InvalidPositionIndex
            | StakingError::NotLocked
            | StakingError::CompoundingLocked
            | StakingError::InsufficientRewardReserve => ErrorKind::InsufficientState,
            StakingError::ArithmeticOverflow => ErrorKind::Arithmetic,
        }
    }

    /// True when the same call may succeed later without any change by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Temporal)
    }
}
