use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub max_pools: u32,
    pub timestamp: u64,
}

/// Fired when the admin registers a new pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub administrator: Address,
    pub pool_id: u32,
    pub min_stake: i128,
    pub max_stake: i128,
    pub closes_at: u64,
    pub timestamp: u64,
}

/// Fired when a participant deposits into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub participant: Address,
    pub amount: i128,
    pub pool_id: u32,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address, max_pools: u32) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            max_pools,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    administrator: Address,
    pool_id: u32,
    min_stake: i128,
    max_stake: i128,
    closes_at: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_CRTD"), administrator.clone()),
        PoolCreatedEvent {
            administrator,
            pool_id,
            min_stake,
            max_stake,
            closes_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    participant: Address,
    amount: i128,
    pool_id: u32,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), participant.clone()),
        StakedEvent {
            participant,
            amount,
            pool_id,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}
