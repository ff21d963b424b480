mod common;

use common::{params, snapshot, Harness, ONE};
use proptest::prelude::*;
use ve_staking::state::InitializeParams;

const USERS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Wait(i64),
    Deposit(usize, u64),
    /// Withdraw this share (in percent) of the user's balance, at least 1
    Withdraw(usize, u8),
    Claim(usize),
    UpdateRewardVars,
    SetBaseRate(u128),
    SetSpeedUpRate(u128),
    SetSpeedUpThreshold(u64),
    RaiseMaxCap(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i64..200).prop_map(Op::Wait),
        1 => (1_000_000i64..50_000_000).prop_map(Op::Wait),
        3 => (0..USERS, 0u64..1_000_000).prop_map(|(u, a)| Op::Deposit(u, a)),
        1 => (0..USERS, 1_000_000_000_000u64..1_000_000_000_000_000)
            .prop_map(|(u, a)| Op::Deposit(u, a)),
        2 => (0..USERS, 0u8..=120).prop_map(|(u, p)| Op::Withdraw(u, p)),
        3 => (0..USERS).prop_map(Op::Claim),
        1 => Just(Op::UpdateRewardVars),
        1 => (0u128..=4 * ONE).prop_map(Op::SetBaseRate),
        1 => (0u128..=4 * ONE).prop_map(Op::SetSpeedUpRate),
        1 => (0u64..=110).prop_map(Op::SetSpeedUpThreshold),
        1 => (0u64..50_000).prop_map(Op::RaiseMaxCap),
    ]
}

fn start_params() -> impl Strategy<Value = InitializeParams> {
    (0u128..=2 * ONE, 0u128..=2 * ONE, 1u64..=100, 0i64..500, 1u64..100_000).prop_map(
        |(base, speed_up, threshold, window, cap)| InitializeParams {
            base_rate_per_share_per_sec: base,
            speed_up_rate_per_share_per_sec: speed_up,
            speed_up_threshold_pct: threshold,
            speed_up_window_seconds: window,
            max_cap_pct: cap,
        },
    )
}

fn check_invariants(h: &Harness) -> std::result::Result<(), TestCaseError> {
    for user in &h.users {
        let p = &user.position;
        let cap = h.pool.max_holding(p.balance).unwrap();
        prop_assert!(p.ve_held <= cap, "holding {} above cap {}", p.ve_held, cap);
        prop_assert_eq!(user.holding, p.ve_held);
        if p.balance == 0 {
            prop_assert_eq!(p.reward_debt, 0);
        }
        if p.speed_up_end_timestamp != 0 {
            prop_assert!(p.speed_up_end_timestamp >= p.last_claim_timestamp);
        }
    }

    let staked: u64 = h.users.iter().map(|u| u.position.balance).sum();
    prop_assert_eq!(h.pool.total_staked, staked);
    Ok(())
}

proptest! {
    #[test]
    fn ledger_invariants_hold_for_any_sequence(
        start in start_params(),
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut h = Harness::new(start, USERS);
        let admin = h.admin();
        let mut now = 0i64;

        for op in ops {
            let acc_before = h.pool.acc_reward_per_share;
            let last_before = h.pool.last_reward_timestamp;

            match op {
                Op::Wait(secs) => now += secs,
                Op::Deposit(u, amount) => {
                    let before = snapshot(&h.pool, h.user(u));
                    if h.deposit(u, amount, now).is_err() {
                        prop_assert_eq!(amount, 0);
                        prop_assert_eq!(snapshot(&h.pool, h.user(u)), before);
                    }
                }
                Op::Withdraw(u, pct) => {
                    let balance = h.user(u).position.balance;
                    let amount = (balance * pct as u64 / 100).max(1);
                    let before = snapshot(&h.pool, h.user(u));
                    if h.withdraw(u, amount, now).is_err() {
                        prop_assert!(amount > balance);
                        prop_assert_eq!(snapshot(&h.pool, h.user(u)), before);
                    }
                }
                Op::Claim(u) => {
                    if h.user(u).position.balance == 0 {
                        prop_assert!(h.claim(u, now).is_err());
                    } else {
                        h.claim(u, now).unwrap();
                        // nothing left to pay in the same second
                        let again = h.claim(u, now).unwrap();
                        prop_assert_eq!(again.pending(), 0);
                    }
                }
                Op::UpdateRewardVars => {
                    h.pool.update_reward_vars(now).unwrap();
                }
                Op::SetBaseRate(rate) => {
                    h.pool.set_base_rate(&admin, rate, now).unwrap();
                }
                Op::SetSpeedUpRate(rate) => {
                    h.pool.set_speed_up_rate(&admin, rate, now).unwrap();
                }
                Op::SetSpeedUpThreshold(pct) => {
                    let ok = h.pool.set_speed_up_threshold(&admin, pct, now).is_ok();
                    prop_assert_eq!(ok, pct != 0 && pct <= 100);
                }
                Op::RaiseMaxCap(delta) => {
                    let next = h.pool.max_cap_pct + delta;
                    let ok = h.pool.set_max_cap_pct(&admin, next, now).is_ok();
                    prop_assert_eq!(ok, delta > 0);
                }
            }

            prop_assert!(h.pool.acc_reward_per_share >= acc_before);
            prop_assert!(h.pool.last_reward_timestamp >= last_before);
            prop_assert!(h.pool.last_reward_timestamp <= now);
            check_invariants(&h)?;
        }
    }

    #[test]
    fn eligible_deposits_restart_rather_than_extend_the_window(
        first in 1u64..1_000_000,
        gap in 0i64..100,
    ) {
        let mut h = Harness::new(params(), 1);
        h.deposit(0, first, 0).unwrap();
        // a deposit equal to the balance always clears the 5% threshold
        h.deposit(0, first, gap).unwrap();

        let window = h.pool.speed_up_window_seconds;
        prop_assert_eq!(h.user(0).position.speed_up_end_timestamp, gap + window);
    }

    #[test]
    fn base_reward_is_exact_with_one_rate(
        amount in 1u64..1_000_000_000_000_000,
        secs in 1i64..100_000_000,
    ) {
        let mut h = Harness::new(
            InitializeParams { speed_up_rate_per_share_per_sec: 0, ..params() },
            1,
        );
        h.deposit(0, amount, 0).unwrap();
        let claimed = h.claim(0, secs).unwrap();
        let exact = amount as u128 * secs as u128;
        prop_assert_eq!(claimed.base as u128, exact.min(u64::MAX as u128));

        // the position can always be topped up and emptied again
        h.deposit(0, amount, 2 * secs).unwrap();
        h.withdraw(0, 2 * amount, 3 * secs).unwrap();
        prop_assert_eq!(h.user(0).position.ve_held, 0);
        prop_assert_eq!(h.user(0).holding, 0);
    }
}
