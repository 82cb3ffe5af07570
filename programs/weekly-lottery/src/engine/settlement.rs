use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, DRAW_DAYS, MATCH_TIERS};
use crate::error::LotteryError;
use crate::state::{Lottery, LotteryPhase, Ticket};

/// How the prize pool is divided once all draws are in.
///
/// Tickets in the same tier always split that tier's amount equally; purchase
/// order never matters. Whatever cannot be split evenly stays undistributed
/// and is reported as carry-over.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PrizePolicy {
    /// The whole pool goes to the tickets at the highest match count
    /// reached, as long as that count is at least `min_matches`.
    HighestTier { min_matches: u8 },
    /// `shares_bps[k]` of the pool goes to the tickets that matched exactly
    /// `k` numbers. A tier without tickets leaves its share undistributed.
    /// A ticket only counts as a winner when its share is at least one
    /// lamport; a tier whose share rounds down to zero per ticket wins
    /// nothing and its share is carried over.
    Tiered { shares_bps: [u16; MATCH_TIERS] },
}

impl Default for PrizePolicy {
    fn default() -> Self {
        PrizePolicy::HighestTier {
            min_matches: DRAW_DAYS,
        }
    }
}

impl PrizePolicy {
    pub fn validate(&self) -> Result<()> {
        match self {
            PrizePolicy::HighestTier { min_matches } => {
                require!(
                    (1..=DRAW_DAYS).contains(min_matches),
                    LotteryError::InvalidPrizePolicy
                );
            }
            PrizePolicy::Tiered { shares_bps } => {
                let total: u64 = shares_bps.iter().map(|bps| u64::from(*bps)).sum();
                require!(
                    total > 0 && total <= BPS_DENOMINATOR,
                    LotteryError::InvalidPrizePolicy
                );
                require!(shares_bps[0] == 0, LotteryError::InvalidPrizePolicy);
            }
        }
        Ok(())
    }

    /// Splits `pool` given how many tickets ended at each match count.
    pub fn allocate(&self, pool: u64, tally: &[u64; MATCH_TIERS]) -> Result<PrizeAllocation> {
        let mut allocation = PrizeAllocation::default();

        match self {
            PrizePolicy::HighestTier { min_matches } => {
                let top = (usize::from(*min_matches)..MATCH_TIERS)
                    .rev()
                    .find(|&tier| tally[tier] > 0);
                if let Some(tier) = top {
                    allocation.per_ticket[tier] = pool / tally[tier];
                }
            }
            PrizePolicy::Tiered { shares_bps } => {
                for tier in 0..MATCH_TIERS {
                    if tally[tier] == 0 || shares_bps[tier] == 0 {
                        continue;
                    }
                    let tier_pool = (u128::from(pool) * u128::from(shares_bps[tier])
                        / u128::from(BPS_DENOMINATOR)) as u64;
                    allocation.per_ticket[tier] = tier_pool / tally[tier];
                }
            }
        }

        for tier in 0..MATCH_TIERS {
            if allocation.per_ticket[tier] == 0 {
                continue;
            }
            let tier_total = allocation.per_ticket[tier]
                .checked_mul(tally[tier])
                .ok_or(LotteryError::MathOverflow)?;
            allocation.distributed = allocation
                .distributed
                .checked_add(tier_total)
                .ok_or(LotteryError::MathOverflow)?;
            allocation.winner_count += tally[tier];
        }
        allocation.carry_over = pool
            .checked_sub(allocation.distributed)
            .ok_or(LotteryError::MathOverflow)?;
        Ok(allocation)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrizeAllocation {
    /// Prize per ticket, indexed by match count.
    pub per_ticket: [u64; MATCH_TIERS],
    pub winner_count: u64,
    pub distributed: u64,
    pub carry_over: u64,
}

/// Outcome of a settlement call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementReport {
    pub allocation: PrizeAllocation,
    /// `(ticket_id, prize)` for every winner awarded in this call.
    pub awarded: Vec<(u64, u64)>,
}

/// Fixes the prize table for a completed lottery and awards the given
/// tickets. Tickets not passed here are awarded later with [`award_batch`].
pub fn settle<'a, I>(lottery: &mut Lottery, tickets: I) -> Result<SettlementReport>
where
    I: IntoIterator<Item = &'a mut Ticket>,
{
    let allocation = finalize(lottery)?;
    let awarded = award_batch(lottery, tickets)?;
    Ok(SettlementReport {
        allocation,
        awarded,
    })
}

/// One-time computation of the prize table.
pub fn finalize(lottery: &mut Lottery) -> Result<PrizeAllocation> {
    if lottery.phase != LotteryPhase::Completed {
        msg!(
            "Settlement rejected: lottery {} is in phase {:?}",
            lottery.lottery_id,
            lottery.phase
        );
        return err!(LotteryError::NotCompleted);
    }
    if lottery.prizes_distributed {
        msg!(
            "Settlement rejected: lottery {} already distributed {} lamports",
            lottery.lottery_id,
            lottery.distributed_total
        );
        return err!(LotteryError::AlreadyDistributed);
    }
    require!(
        lottery.all_tickets_tallied(),
        LotteryError::MatchesIncomplete
    );

    let allocation = lottery
        .prize_policy
        .allocate(lottery.prize_pool, &lottery.match_tally)?;

    lottery.tier_prizes = allocation.per_ticket;
    lottery.winner_count = allocation.winner_count;
    lottery.distributed_total = allocation.distributed;
    lottery.carry_over = allocation.carry_over;
    lottery.prizes_distributed = true;
    Ok(allocation)
}

/// Awards each ticket from the fixed prize table. Tickets already awarded
/// are skipped so a batch can be replayed.
pub fn award_batch<'a, I>(lottery: &Lottery, tickets: I) -> Result<Vec<(u64, u64)>>
where
    I: IntoIterator<Item = &'a mut Ticket>,
{
    let mut awarded = Vec::new();
    for ticket in tickets {
        if let Some(prize) = ticket.award(lottery)? {
            awarded.push((ticket.ticket_id, prize));
        }
    }
    Ok(awarded)
}

impl Ticket {
    /// Sets the winner flag and prize. Returns the prize for a newly
    /// awarded winner, `None` for losers and tickets awarded before.
    pub fn award(&mut self, lottery: &Lottery) -> Result<Option<u64>> {
        require!(lottery.prizes_distributed, LotteryError::NotDistributed);
        require!(
            self.matched_through_day == DRAW_DAYS,
            LotteryError::MatchesIncomplete
        );
        if self.prize_awarded {
            return Ok(None);
        }

        let prize = lottery.tier_prizes[usize::from(self.matched_count)];
        self.prize_awarded = true;
        self.is_winner = prize > 0;
        self.prize_amount = prize;
        Ok(self.is_winner.then_some(prize))
    }

    /// Marks the prize as paid and returns the lamports owed.
    pub fn claim_prize(&mut self) -> Result<u64> {
        require!(self.is_winner, LotteryError::NotWinner);
        require!(!self.prize_claimed, LotteryError::PrizeAlreadyClaimed);
        self.prize_claimed = true;
        Ok(self.prize_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lifecycle::tests::{drawing_lottery, DAY, PRICE, SALES_END};
    use crate::engine::matcher::recompute_matches;
    use proptest::prelude::*;

    const DRAWN: [u8; 6] = [1, 15, 33, 45, 67, 89];

    /// Runs all six draws and the final match pass.
    fn completed(tickets: &[[u8; 6]], policy: PrizePolicy) -> (Lottery, Vec<Ticket>) {
        let (mut lottery, mut tickets) = drawing_lottery(tickets);
        lottery.prize_policy = policy;
        let mut now = SALES_END;
        for number in DRAWN {
            now += DAY;
            lottery.record_draw(number, now).unwrap();
        }
        let summary = recompute_matches(tickets.iter_mut(), &lottery.drawn_set().unwrap());
        lottery.record_tally(&summary).unwrap();
        (lottery, tickets)
    }

    #[test]
    fn jackpot_is_split_equally_between_ties() {
        let (mut lottery, mut tickets) = completed(
            &[DRAWN, DRAWN, [1, 15, 33, 45, 67, 90]],
            PrizePolicy::default(),
        );
        let report = settle(&mut lottery, tickets.iter_mut()).unwrap();

        let share = 3 * PRICE / 2;
        assert_eq!(report.awarded, vec![(0, share), (1, share)]);
        assert!(tickets[0].is_winner && tickets[1].is_winner);
        assert!(!tickets[2].is_winner);
        assert_eq!(tickets[2].prize_amount, 0);
        assert!(tickets.iter().all(|t| t.prize_awarded));
        assert!(lottery.prizes_distributed);
        assert_eq!(lottery.winner_count, 2);
    }

    #[test]
    fn highest_tier_reached_takes_the_pool() {
        let (mut lottery, mut tickets) = completed(
            &[[1, 15, 33, 45, 67, 90], [1, 15, 33, 2, 3, 4]],
            PrizePolicy::HighestTier { min_matches: 3 },
        );
        settle(&mut lottery, tickets.iter_mut()).unwrap();
        assert_eq!(tickets[0].prize_amount, 2 * PRICE);
        assert!(!tickets[1].is_winner);
        assert_eq!(lottery.carry_over, 0);
    }

    #[test]
    fn no_winner_carries_the_whole_pool() {
        let (mut lottery, mut tickets) =
            completed(&[[2, 3, 4, 5, 6, 7]], PrizePolicy::default());
        let report = settle(&mut lottery, tickets.iter_mut()).unwrap();
        assert!(report.awarded.is_empty());
        assert_eq!(report.allocation.winner_count, 0);
        assert_eq!(lottery.carry_over, PRICE);
        assert!(lottery.prizes_distributed);
    }

    #[test]
    fn tiered_split_uses_the_share_table() {
        let policy = PrizePolicy::Tiered {
            shares_bps: [0, 0, 0, 1_000, 2_000, 2_000, 5_000],
        };
        let (mut lottery, mut tickets) = completed(
            &[DRAWN, [1, 15, 33, 2, 3, 4], [1, 15, 33, 5, 6, 7], [50, 51, 52, 53, 54, 55]],
            policy,
        );
        settle(&mut lottery, tickets.iter_mut()).unwrap();

        let pool = 4 * PRICE;
        assert_eq!(tickets[0].prize_amount, pool / 2);
        assert_eq!(tickets[1].prize_amount, pool / 10 / 2);
        assert_eq!(tickets[2].prize_amount, pool / 10 / 2);
        assert!(!tickets[3].is_winner);
        // tiers 4 and 5 had no tickets
        assert_eq!(lottery.carry_over, pool * 4 / 10);
        assert_eq!(lottery.distributed_total + lottery.carry_over, pool);
    }

    #[test]
    fn tier_share_below_one_lamport_is_not_a_win() {
        let policy = PrizePolicy::Tiered {
            shares_bps: [0, 0, 0, 0, 0, 1, 9_999],
        };
        let (mut lottery, mut tickets) =
            completed(&[DRAWN, [1, 15, 33, 45, 67, 2]], policy);
        lottery.prize_pool = 5_000;
        let report = settle(&mut lottery, tickets.iter_mut()).unwrap();

        assert_eq!(lottery.tier_prizes[5], 0);
        assert!(tickets[1].prize_awarded);
        assert!(!tickets[1].is_winner);
        assert_eq!(tickets[1].claim_prize().unwrap_err(), LotteryError::NotWinner.into());
        assert_eq!(report.awarded, vec![(0, 4_999)]);
        assert_eq!(lottery.winner_count, 1);
        assert_eq!(lottery.carry_over, 1);
    }

    #[test]
    fn rounding_remainder_is_carried_over() {
        let policy = PrizePolicy::HighestTier { min_matches: 6 };
        let (mut lottery, mut tickets) = completed(&[DRAWN, DRAWN, DRAWN], policy);
        lottery.prize_pool = 100;
        settle(&mut lottery, tickets.iter_mut()).unwrap();
        assert!(tickets.iter().all(|t| t.prize_amount == 33));
        assert_eq!(lottery.carry_over, 1);
    }

    #[test]
    fn settle_before_completion_fails() {
        let (mut lottery, mut tickets) = drawing_lottery(&[DRAWN]);
        let err = settle(&mut lottery, tickets.iter_mut()).unwrap_err();
        assert_eq!(err, LotteryError::NotCompleted.into());
        assert!(!lottery.prizes_distributed);
        assert!(!tickets[0].prize_awarded);
    }

    #[test]
    fn second_settle_fails_and_leaves_tickets_alone() {
        let (mut lottery, mut tickets) = completed(&[DRAWN], PrizePolicy::default());
        settle(&mut lottery, tickets.iter_mut()).unwrap();
        let before = tickets.clone();

        let err = settle(&mut lottery, tickets.iter_mut()).unwrap_err();
        assert_eq!(err, LotteryError::AlreadyDistributed.into());
        for (a, b) in before.iter().zip(&tickets) {
            assert_eq!(a.is_winner, b.is_winner);
            assert_eq!(a.prize_amount, b.prize_amount);
        }
    }

    #[test]
    fn settle_waits_for_every_final_match() {
        let (mut lottery, mut tickets) = drawing_lottery(&[DRAWN, DRAWN]);
        let mut now = SALES_END;
        for number in DRAWN {
            now += DAY;
            lottery.record_draw(number, now).unwrap();
        }
        let summary = recompute_matches(tickets.iter_mut().take(1), &lottery.drawn_set().unwrap());
        lottery.record_tally(&summary).unwrap();

        let err = finalize(&mut lottery).unwrap_err();
        assert_eq!(err, LotteryError::MatchesIncomplete.into());
    }

    #[test]
    fn later_batches_are_awarded_once() {
        let (mut lottery, mut tickets) = completed(&[DRAWN, DRAWN], PrizePolicy::default());
        let (first, rest) = tickets.split_at_mut(1);
        settle(&mut lottery, first.iter_mut()).unwrap();

        let awarded = award_batch(&lottery, rest.iter_mut()).unwrap();
        assert_eq!(awarded, vec![(1, PRICE)]);
        let replay = award_batch(&lottery, rest.iter_mut()).unwrap();
        assert!(replay.is_empty());
        assert_eq!(rest[0].prize_amount, PRICE);
    }

    #[test]
    fn claim_pays_winners_once() {
        let (mut lottery, mut tickets) =
            completed(&[DRAWN, [2, 3, 4, 5, 6, 7]], PrizePolicy::default());
        settle(&mut lottery, tickets.iter_mut()).unwrap();

        assert_eq!(tickets[0].claim_prize().unwrap(), 2 * PRICE);
        assert_eq!(
            tickets[0].claim_prize().unwrap_err(),
            LotteryError::PrizeAlreadyClaimed.into()
        );
        assert_eq!(
            tickets[1].claim_prize().unwrap_err(),
            LotteryError::NotWinner.into()
        );
    }

    #[test]
    fn policy_validation() {
        assert!(PrizePolicy::default().validate().is_ok());
        assert!(PrizePolicy::HighestTier { min_matches: 0 }.validate().is_err());
        assert!(PrizePolicy::HighestTier { min_matches: 7 }.validate().is_err());
        assert!(PrizePolicy::Tiered { shares_bps: [0, 0, 0, 0, 0, 5_000, 5_001] }
            .validate()
            .is_err());
        assert!(PrizePolicy::Tiered { shares_bps: [0; MATCH_TIERS] }.validate().is_err());
        assert!(PrizePolicy::Tiered { shares_bps: [100, 0, 0, 0, 0, 0, 9_000] }
            .validate()
            .is_err());
    }

    fn tiered_policy() -> impl Strategy<Value = PrizePolicy> {
        proptest::array::uniform6(0u16..=1_666).prop_map(|tail| {
            let mut shares_bps = [0u16; MATCH_TIERS];
            shares_bps[1..].copy_from_slice(&tail);
            PrizePolicy::Tiered { shares_bps }
        })
    }

    proptest! {
        #[test]
        fn prizes_never_exceed_the_pool(
            pool in 0u64..=u64::MAX / 2,
            tally in proptest::array::uniform7(0u64..1_000),
            policy in prop_oneof![
                (1u8..=6).prop_map(|min_matches| PrizePolicy::HighestTier { min_matches }),
                tiered_policy(),
            ],
        ) {
            let allocation = policy.allocate(pool, &tally).unwrap();
            let paid: u128 = allocation
                .per_ticket
                .iter()
                .zip(tally.iter())
                .map(|(prize, count)| u128::from(*prize) * u128::from(*count))
                .sum();
            prop_assert!(paid <= u128::from(pool));
            prop_assert_eq!(u128::from(allocation.distributed), paid);
            prop_assert_eq!(allocation.distributed + allocation.carry_over, pool);
        }
    }
}
