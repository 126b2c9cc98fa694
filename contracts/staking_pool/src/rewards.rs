/// Reward emitted per second of staked time, in token base units, before
/// the participant's share weighting is applied.
///
/// With 18-decimal token amounts this corresponds to 0.0001 tokens per
/// second for a participant holding the entire pool.
pub const REWARD_RATE_PER_SECOND: i128 = 100_000_000_000_000;

// ── Core reward math ────────────────────────────────────────────────────────

/// Number of seconds a stake has accrued reward for.
///
/// Accrual runs from `staked_at` until `now`, but never past `closes_at`:
/// once the pool has closed the window is frozen. A stake recorded at or
/// after the close (or a clock reading behind `staked_at`) yields zero.
pub fn accrual_window(staked_at: u64, closes_at: u64, now: u64) -> u64 {
    let end = if now < closes_at { now } else { closes_at };
    end.saturating_sub(staked_at)
}

/// Reward accrued over `elapsed` seconds for a stake of `amount` in a pool
/// holding `total_staked` in aggregate.
///
/// ```text
/// reward = elapsed × REWARD_RATE_PER_SECOND × amount / total_staked
/// ```
///
/// The rate is weighted by the participant's share of the pool, so the sum
/// of all participants' rewards over the same window never exceeds
/// `elapsed × REWARD_RATE_PER_SECOND`. When `total_staked` is zero there is
/// nothing to distribute and the result is zero, which also prevents
/// division by zero.
#[allow(clippy::arithmetic_side_effects)]
pub fn accrued(elapsed: u64, amount: i128, total_staked: i128) -> i128 {
    if total_staked <= 0 || amount <= 0 {
        return 0;
    }

    // elapsed is u64; the cast to i128 is lossless.
    REWARD_RATE_PER_SECOND
        .saturating_mul(elapsed as i128)
        .saturating_mul(amount)
        / total_staked
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
