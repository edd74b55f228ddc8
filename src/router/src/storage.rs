use soroban_sdk::{contracttype, Address, Env};

use crate::errors::RouterError;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Route,
}

/// The pool this router fronts, and the two assets it trades.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Route {
    pub pool: Address,
    pub base_asset: Address,
    pub token: Address,
}

pub fn has_route(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Route)
}

pub fn read_route(env: &Env) -> Result<Route, RouterError> {
    env.storage()
        .instance()
        .get(&DataKey::Route)
        .ok_or(RouterError::NotInitialized)
}

pub fn write_route(env: &Env, route: &Route) {
    env.storage().instance().set(&DataKey::Route, route);
}
