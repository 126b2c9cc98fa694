#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use staking_pool::{StakingPoolContract, StakingPoolContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    CreatePool {
        min_stake: i64,
        max_stake: i64,
        closes_in: u32,
    },
    Stake {
        pool_id: u8,
        amount: u64,
    },
    CalculateReward {
        pool_id: u8,
    },
    AdvanceTime {
        by: u16,
    },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = token.address();

    let contract_id = env.register(StakingPoolContract, ());
    let client = StakingPoolContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let _ = client.try_initialize(&admin, &token_id, &6u32);

    let mut users = vec![admin.clone()];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token_id).mint(&user, &1_000_000_000i128);
        users.push(user);
    }

    // Call entry points with arbitrary parameters looking for unhandled
    // panics (overflow, division by zero, broken accounting).
    let mut now = 0u64;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::CreatePool {
                min_stake,
                max_stake,
                closes_in,
            } => {
                let closes_at = now.saturating_add(closes_in as u64);
                let _ = client.try_create_pool(
                    &admin,
                    &(min_stake as i128),
                    &(max_stake as i128),
                    &closes_at,
                );
            }
            FuzzAction::Stake { pool_id, amount } => {
                let _ = client.try_stake(caller, &(pool_id as u32), &(amount as i128));
            }
            FuzzAction::CalculateReward { pool_id } => {
                let _ = client.calculate_reward(&(pool_id as u32), caller);
            }
            FuzzAction::AdvanceTime { by } => {
                now = now.saturating_add(by as u64);
                env.ledger().set_timestamp(now);
            }
        }
    }

    // Conservation: every pool's recorded total matches the sum of the
    // individual stake records.
    for pool_id in 1..=client.total_pools() {
        let pool = client.get_pool(&pool_id);
        let sum: i128 = users
            .iter()
            .map(|u| client.get_stake(&pool_id, u).map(|s| s.amount).unwrap_or(0))
            .sum();
        assert_eq!(pool.total_staked, sum);
    }
});
