//! Storage layout.
//!
//! Config, program table and the global ledger live in instance storage. Positions live
//! in persistent storage, one vector per owner, and owners are enumerated through a
//! dense staker registry (slot -> owner, owner -> slot) so a distribution pass can walk
//! every position with a two-part cursor.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use crate::errors::StakingError;
use crate::types::{DurationProgram, GlobalLedger, StakePosition, StakingConfig};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Ledger,
    Programs,
    StakerCount,
    /// Registry slot -> owner.
    Staker(u32),
    /// Owner -> registry slot.
    StakerSlot(Address),
    /// Owner -> position vector.
    Positions(Address),
}

pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Config)
}

pub fn get_config(e: &Env) -> Result<StakingConfig, StakingError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(StakingError::NotInitialized)
}

pub fn set_config(e: &Env, config: &StakingConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

pub fn get_ledger(e: &Env) -> Result<GlobalLedger, StakingError> {
    e.storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(StakingError::NotInitialized)
}

pub fn set_ledger(e: &Env, ledger: &GlobalLedger) {
    e.storage().instance().set(&DataKey::Ledger, ledger);
}

pub fn get_programs(e: &Env) -> Result<Vec<DurationProgram>, StakingError> {
    e.storage()
        .instance()
        .get(&DataKey::Programs)
        .ok_or(StakingError::NotInitialized)
}

pub fn set_programs(e: &Env, programs: &Vec<DurationProgram>) {
    e.storage().instance().set(&DataKey::Programs, programs);
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

pub fn get_positions(e: &Env, owner: &Address) -> Vec<StakePosition> {
    let key = DataKey::Positions(owner.clone());
    match e.storage().persistent().get(&key) {
        Some(positions) => {
            bump_persistent(e, &key);
            positions
        }
        None => Vec::new(e),
    }
}

/// Writes the owner's positions, dropping the key when the vector is empty.
pub fn set_positions(e: &Env, owner: &Address, positions: &Vec<StakePosition>) {
    let key = DataKey::Positions(owner.clone());
    if positions.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, positions);
        bump_persistent(e, &key);
    }
}

// ---------------------------------------------------------------------------
// Staker registry
// ---------------------------------------------------------------------------

pub fn staker_count(e: &Env) -> u32 {
    e.storage().instance().get(&DataKey::StakerCount).unwrap_or(0)
}

pub fn staker_at(e: &Env, slot: u32) -> Result<Address, StakingError> {
    let key = DataKey::Staker(slot);
    let owner = e
        .storage()
        .persistent()
        .get(&key)
        .ok_or(StakingError::InvalidPositionIndex)?;
    bump_persistent(e, &key);
    Ok(owner)
}

pub fn is_registered(e: &Env, owner: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::StakerSlot(owner.clone()))
}

/// Appends `owner` to the registry if absent.
pub fn register_staker(e: &Env, owner: &Address) -> Result<(), StakingError> {
    if is_registered(e, owner) {
        return Ok(());
    }
    let slot = staker_count(e);
    let next = slot.checked_add(1).ok_or(StakingError::ArithmeticOverflow)?;
    let slot_key = DataKey::Staker(slot);
    let owner_key = DataKey::StakerSlot(owner.clone());
    e.storage().persistent().set(&slot_key, owner);
    e.storage().persistent().set(&owner_key, &slot);
    bump_persistent(e, &slot_key);
    bump_persistent(e, &owner_key);
    e.storage().instance().set(&DataKey::StakerCount, &next);
    Ok(())
}

/// Swap-removes `owner` from the registry: the last registered owner takes its slot.
pub fn unregister_staker(e: &Env, owner: &Address) -> Result<(), StakingError> {
    let owner_key = DataKey::StakerSlot(owner.clone());
    let slot: u32 = match e.storage().persistent().get(&owner_key) {
        Some(slot) => slot,
        None => return Ok(()),
    };
    let last = staker_count(e)
        .checked_sub(1)
        .ok_or(StakingError::ArithmeticOverflow)?;
    if slot != last {
        let moved = staker_at(e, last)?;
        let moved_key = DataKey::Staker(slot);
        e.storage().persistent().set(&moved_key, &moved);
        e.storage()
            .persistent()
            .set(&DataKey::StakerSlot(moved), &slot);
        bump_persistent(e, &moved_key);
    }
    e.storage().persistent().remove(&DataKey::Staker(last));
    e.storage().persistent().remove(&owner_key);
    e.storage().instance().set(&DataKey::StakerCount, &last);
    Ok(())
}
