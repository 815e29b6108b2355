//! Duration program table
//!
//! Catalogue of lock programs. Program 0 is the unlocked 1.00x baseline; multipliers never
//! decrease with the index, and the last entry of a table with two or more programs is the
//! genesis program, only open for a fixed window after the genesis epoch.
//! Replacing the table never touches existing positions: each position keeps the
//! multiplier it opened with.

use soroban_sdk::{Env, Vec};

use crate::constants::{
    BURN_SCHEDULE_180_DAYS, BURN_SCHEDULE_365_DAYS, BURN_SCHEDULE_90_DAYS, DEFAULT_LOCK_DAYS,
    DEFAULT_MULTIPLIERS, INITIAL_BURN_BPS, MULTIPLIER_SCALE, SECONDS_PER_DAY,
};
use crate::errors::StakingError;
use crate::types::DurationProgram;

/// The table installed at initialization.
pub fn default_programs(e: &Env) -> Vec<DurationProgram> {
    let mut programs = Vec::new(e);
    for (i, (multiplier, lock_days)) in DEFAULT_MULTIPLIERS
        .iter()
        .zip(DEFAULT_LOCK_DAYS.iter())
        .enumerate()
    {
        let burn_schedule = match *lock_days {
            0 => Vec::new(e),
            90 => Vec::from_slice(e, &BURN_SCHEDULE_90_DAYS),
            180 => Vec::from_slice(e, &BURN_SCHEDULE_180_DAYS),
            _ => Vec::from_slice(e, &BURN_SCHEDULE_365_DAYS),
        };
        programs.push_back(DurationProgram {
            index: i as u32,
            lock_duration: lock_days * SECONDS_PER_DAY,
            multiplier: *multiplier,
            burn_schedule,
        });
    }
    programs
}

/// Checks a candidate table before it replaces the current one.
///
/// Rejects with `InvalidProgramTable` unless:
/// - the table is non-empty and each `index` equals its position,
/// - program 0 is unlocked, exactly 1.00x, with no burn schedule,
/// - multipliers are non-decreasing,
/// - every locked program has a schedule starting at 90%, non-increasing, ending at 0,
///   with the 0 reached no later than the month in which the lock matures.
pub fn validate_programs(programs: &Vec<DurationProgram>, month_length: u64) -> Result<(), StakingError> {
    if programs.is_empty() || month_length == 0 {
        return Err(StakingError::InvalidProgramTable);
    }
    let mut previous: Option<u32> = None;
    for (i, program) in programs.iter().enumerate() {
        if program.index != i as u32 {
            return Err(StakingError::InvalidProgramTable);
        }
        if i == 0 {
            if program.multiplier != MULTIPLIER_SCALE
                || program.lock_duration != 0
                || !program.burn_schedule.is_empty()
            {
                return Err(StakingError::InvalidProgramTable);
            }
        } else {
            if program.lock_duration == 0 {
                return Err(StakingError::InvalidProgramTable);
            }
            validate_burn_schedule(&program.burn_schedule, program.lock_duration / month_length)?;
        }
        if let Some(prev) = previous {
            if program.multiplier < prev {
                return Err(StakingError::InvalidProgramTable);
            }
        }
        previous = Some(program.multiplier);
    }
    Ok(())
}

fn validate_burn_schedule(schedule: &Vec<u32>, lock_months: u64) -> Result<(), StakingError> {
    let len = schedule.len();
    if len == 0 || u64::from(len - 1) > lock_months {
        return Err(StakingError::InvalidProgramTable);
    }
    if schedule.first() != Some(INITIAL_BURN_BPS) || schedule.last() != Some(0) {
        return Err(StakingError::InvalidProgramTable);
    }
    let mut prev = INITIAL_BURN_BPS;
    for bps in schedule.iter() {
        if bps > prev {
            return Err(StakingError::InvalidProgramTable);
        }
        prev = bps;
    }
    Ok(())
}

pub fn get_program(programs: &Vec<DurationProgram>, index: u32) -> Result<DurationProgram, StakingError> {
    programs.get(index).ok_or(StakingError::InvalidProgram)
}

pub fn is_genesis(programs: &Vec<DurationProgram>, index: u32) -> bool {
    programs.len() > 1 && index == programs.len() - 1
}

/// Burn percentage for `months_elapsed`, clamped to the schedule's last (zero) entry.
pub fn burn_percentage(program: &DurationProgram, months_elapsed: u64) -> u32 {
    let schedule = &program.burn_schedule;
    if schedule.is_empty() {
        return 0;
    }
    let last = schedule.len() - 1;
    let idx = u32::try_from(months_elapsed).unwrap_or(u32::MAX).min(last);
    schedule.get(idx).unwrap_or(0)
}
