//! Stake token custody: the only place the contract moves or destroys tokens.

use soroban_sdk::{token, Address, Env};

/// Pulls `amount` base units from `owner` into the contract.
pub fn debit(e: &Env, stake_token: &Address, owner: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, stake_token).transfer(owner, &e.current_contract_address(), &amount);
    }
}

/// Pays `amount` base units from the contract to `owner`.
pub fn credit(e: &Env, stake_token: &Address, owner: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, stake_token).transfer(&e.current_contract_address(), owner, &amount);
    }
}

/// Destroys `amount` base units held by the contract.
pub fn burn(e: &Env, stake_token: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, stake_token).burn(&e.current_contract_address(), &amount);
    }
}

pub fn balance_of(e: &Env, asset: &Address, holder: &Address) -> i128 {
    token::Client::new(e, asset).balance(holder)
}
