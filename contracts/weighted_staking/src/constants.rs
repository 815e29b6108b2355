//! Fixed-point scales and default configuration.

/// Seconds per day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Internal amounts are token base units scaled by this factor (12 decimal digits) so
/// repeated pro-rata divisions don't starve small positions.
pub const PRECISION: i128 = 1_000_000_000_000;

/// Multiplier scale: 10_000 = 1.00x.
pub const MULTIPLIER_SCALE: u32 = 10_000;

/// Burn percentages are basis points of this denominator (9_000 = 90.00%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Burn percentage applied in the first month of every locked program.
pub const INITIAL_BURN_BPS: u32 = 9_000;

/// Cooldown between distribution passes.
pub const DEFAULT_DISTRIBUTION_PERIOD: u64 = SECONDS_PER_DAY;

/// Month length used to index burn schedules.
pub const DEFAULT_MONTH_LENGTH: u64 = 30 * SECONDS_PER_DAY;

/// How long after the genesis epoch the genesis program accepts new positions.
pub const DEFAULT_GENESIS_WINDOW: u64 = 90 * SECONDS_PER_DAY;

/// Upper bound on positions visited by a single `distribute` call.
pub const DEFAULT_MAX_BATCH_SIZE: u32 = 50;

// Default program table: multipliers (x10_000) and lock lengths (days).
pub const DEFAULT_MULTIPLIERS: [u32; 5] = [10_000, 13_000, 16_000, 22_000, 30_000];
pub const DEFAULT_LOCK_DAYS: [u64; 5] = [0, 90, 180, 365, 365];

// Early exit burn schedules (bps, indexed by months elapsed). Month 0 is always 90%;
// the last entry is 0 and is reached no later than lock maturity.
pub const BURN_SCHEDULE_90_DAYS: [u32; 4] = [9_000, 9_000, 4_500, 0];
pub const BURN_SCHEDULE_180_DAYS: [u32; 7] = [9_000, 9_000, 7_200, 5_400, 3_600, 1_800, 0];
pub const BURN_SCHEDULE_365_DAYS: [u32; 13] = [
    9_000, 9_000, 8_181, 7_363, 6_545, 5_727, 4_909, 4_090, 3_272, 2_454, 1_636, 818, 0,
];

// Storage TTL management (ledgers, ~5s each).
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;
