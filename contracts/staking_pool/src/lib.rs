#![no_std]

pub mod events;
pub mod rewards;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const MAX_POOLS: Symbol = symbol_short!("MAX_POOLS");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

// Per-pool / per-participant persistent storage uses tuple keys:
//   (POOL, pool_id)                → Pool
//   (STAKE, pool_id, participant)  → Stake
const POOL: Symbol = symbol_short!("POOL");
const STAKE: Symbol = symbol_short!("STK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    NotAuthorized = 4,
    PoolCapacityExceeded = 5,
    MinAmountTooLow = 6,
    MaxAmountTooLow = 7,
    InvalidDuration = 8,
    MaxBelowMin = 9,
    InvalidPoolId = 10,
    AmountTooLow = 11,
    InsufficientBalance = 12,
    TransferFailed = 13,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// A registered staking opportunity.
///
/// Immutable once created except for `total_staked`, which only grows as
/// deposits are admitted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Smallest deposit accepted per `stake` call.
    pub min_stake: i128,
    /// Declared upper bound for deposits into this pool.
    pub max_stake: i128,
    /// Ledger time after which no further reward accrues.
    pub closes_at: u64,
    /// Sum of all admitted stakes for this pool.
    pub total_staked: i128,
}

/// A participant's deposited balance within one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    /// Token units currently deposited by this participant.
    pub amount: i128,
    /// Time of the most recent deposit or top-up.
    pub staked_at: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolContract;

#[contractimpl]
impl StakingPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`     – the only identity permitted to create pools.
    /// * `token`     – SAC address of the token participants stake.
    /// * `max_pools` – fixed capacity of the pool registry.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        max_pools: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if max_pools == 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&MAX_POOLS, &max_pools);
        // POOL_COUNT starts at zero; unwrap_or(0) handles the absent key,
        // so no explicit init needed.

        events::publish_initialized(&env, admin, token, max_pools);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a new pool and return its 1-based id.
    ///
    /// Only the stored admin may call this. Parameter checks run in a fixed
    /// order so callers can rely on which error is reported first:
    /// capacity, then `min_stake`, `max_stake`, `closes_at`, and finally the
    /// min/max ordering. No token movement happens here.
    pub fn create_pool(
        env: Env,
        caller: Address,
        min_stake: i128,
        max_stake: i128,
        closes_at: u64,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let pool_count: u32 = env.storage().instance().get(&POOL_COUNT).unwrap_or(0);
        let max_pools: u32 = env.storage().instance().get(&MAX_POOLS).unwrap_or(0);
        if pool_count >= max_pools {
            return Err(ContractError::PoolCapacityExceeded);
        }
        if min_stake < 1 {
            return Err(ContractError::MinAmountTooLow);
        }
        if max_stake < 1 {
            return Err(ContractError::MaxAmountTooLow);
        }
        if closes_at <= env.ledger().timestamp() {
            return Err(ContractError::InvalidDuration);
        }
        if max_stake < min_stake {
            return Err(ContractError::MaxBelowMin);
        }

        let pool_id = pool_count.saturating_add(1);
        let pool = Pool {
            min_stake,
            max_stake,
            closes_at,
            total_staked: 0,
        };
        env.storage().persistent().set(&pool_key(pool_id), &pool);
        env.storage().instance().set(&POOL_COUNT, &pool_id);

        events::publish_pool_created(&env, caller, pool_id, min_stake, max_stake, closes_at);

        Ok(pool_id)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens into `pool_id`.
    ///
    /// The minimum bound applies to each deposit call, not the cumulative
    /// balance. A repeat deposit adds to the existing record and resets its
    /// `staked_at` to the current time, restarting the reward clock for the
    /// whole accumulated balance.
    ///
    /// The transfer is attempted only after every other precondition has
    /// passed, and the ledger record is written only after the transfer
    /// succeeds, so a failure at any step leaves no partial state behind.
    pub fn stake(
        env: Env,
        participant: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        participant.require_auth();

        let mut pool = Self::load_pool(&env, pool_id)?;
        if amount < pool.min_stake {
            return Err(ContractError::AmountTooLow);
        }

        let token_addr: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let token_client = token::Client::new(&env, &token_addr);

        if token_client.balance(&participant) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        // Pull the deposit into the contract. Any transport-level rejection
        // (missing allowance, frozen balance) surfaces as TransferFailed.
        let transfer = token_client.try_transfer(
            &participant,
            &env.current_contract_address(),
            &amount,
        );
        if !matches!(transfer, Ok(Ok(()))) {
            return Err(ContractError::TransferFailed);
        }

        let now = env.ledger().timestamp();
        let key = stake_key(pool_id, &participant);
        let prev: Option<Stake> = env.storage().persistent().get(&key);
        let new_amount = match prev {
            Some(prev) => prev.amount.saturating_add(amount),
            None => amount,
        };
        env.storage().persistent().set(
            &key,
            &Stake {
                amount: new_amount,
                staked_at: now,
            },
        );

        pool.total_staked = pool.total_staked.saturating_add(amount);
        env.storage().persistent().set(&pool_key(pool_id), &pool);

        events::publish_staked(&env, participant, amount, pool_id, pool.total_staked);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Project the reward accrued so far for `(pool_id, participant)`.
    ///
    /// Read-only: repeated calls at the same ledger time return the same
    /// value and never touch the ledger. Accrual stops at `closes_at`.
    /// Returns 0 when the participant holds no stake in the pool.
    pub fn calculate_reward(env: Env, pool_id: u32, participant: Address) -> i128 {
        let pool: Pool = match env.storage().persistent().get(&pool_key(pool_id)) {
            Some(p) => p,
            None => return 0,
        };
        let stake: Stake = match env
            .storage()
            .persistent()
            .get(&stake_key(pool_id, &participant))
        {
            Some(s) => s,
            None => return 0,
        };

        let elapsed =
            rewards::accrual_window(stake.staked_at, pool.closes_at, env.ledger().timestamp());
        rewards::accrued(elapsed, stake.amount, pool.total_staked)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Return the pool record for `pool_id`.
    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        Self::load_pool(&env, pool_id)
    }

    /// Return the stake record for `(pool_id, participant)`, if any.
    pub fn get_stake(env: Env, pool_id: u32, participant: Address) -> Option<Stake> {
        env.storage()
            .persistent()
            .get(&stake_key(pool_id, &participant))
    }

    /// Return the number of pools registered so far.
    pub fn total_pools(env: Env) -> u32 {
        env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
    }

    /// Return the fixed registry capacity.
    pub fn get_max_pools(env: Env) -> u32 {
        env.storage().instance().get(&MAX_POOLS).unwrap_or(0)
    }

    /// Return the staking token address.
    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    /// Load a pool record, mapping an absent key to `InvalidPoolId`.
    ///
    /// Pool ids are allocated densely from 1, so a missing key is exactly
    /// an id outside `[1, pool_count]`.
    fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
        env.storage()
            .persistent()
            .get(&pool_key(pool_id))
            .ok_or(ContractError::InvalidPoolId)
    }
}

// ── Storage key helpers ──────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

fn stake_key(pool_id: u32, participant: &Address) -> (Symbol, u32, Address) {
    (STAKE, pool_id, participant.clone())
}

// ── Tests ────────────────────────────────────────────────────────────────────
