//! Global aggregate maintenance.
//!
//! `total_principal` and `total_weighted_principal` only ever move together with a
//! position field, by the exact same delta, so both totals stay equal to the sums over
//! all live positions.

use crate::errors::StakingError;
use crate::math;
use crate::types::{GlobalLedger, StakePosition};

/// Accounts for a newly opened position.
pub fn record_open(ledger: &mut GlobalLedger, position: &StakePosition) -> Result<(), StakingError> {
    ledger.total_principal = math::add(ledger.total_principal, position.principal)?;
    ledger.total_weighted_principal =
        math::add(ledger.total_weighted_principal, position.weighted_principal)?;
    Ok(())
}

/// Moves `principal` and `weighted` out of `position` and the totals.
pub fn record_removal(
    ledger: &mut GlobalLedger,
    position: &mut StakePosition,
    principal: i128,
    weighted: i128,
) -> Result<(), StakingError> {
    position.principal = math::sub(position.principal, principal)?;
    position.weighted_principal = math::sub(position.weighted_principal, weighted)?;
    ledger.total_principal = math::sub(ledger.total_principal, principal)?;
    ledger.total_weighted_principal = math::sub(ledger.total_weighted_principal, weighted)?;
    Ok(())
}

/// Folds a compounded share into `position` and the totals.
pub fn record_compound(
    ledger: &mut GlobalLedger,
    position: &mut StakePosition,
    principal: i128,
    weighted: i128,
) -> Result<(), StakingError> {
    position.principal = math::add(position.principal, principal)?;
    position.weighted_principal = math::add(position.weighted_principal, weighted)?;
    ledger.total_principal = math::add(ledger.total_principal, principal)?;
    ledger.total_weighted_principal = math::add(ledger.total_weighted_principal, weighted)?;
    Ok(())
}

/// Rejects stake/unstake while a pass is mid-flight.
pub fn require_idle(ledger: &GlobalLedger) -> Result<(), StakingError> {
    if ledger.is_distributing() {
        return Err(StakingError::DistributionInProgress);
    }
    Ok(())
}
