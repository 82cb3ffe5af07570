//! Read-only views over lottery and ticket accounts, used by cranks and
//! off-chain readers to decide what to do next.

use crate::constants::BPS_DENOMINATOR;
use crate::state::{Lottery, LotteryPhase, Ticket};

/// The lottery currently selling or drawing. When several are active the one
/// whose sales opened first wins, then the lower id.
pub fn current_lottery<'a, I>(lotteries: I) -> Option<&'a Lottery>
where
    I: IntoIterator<Item = &'a Lottery>,
{
    lotteries
        .into_iter()
        .filter(|lottery| lottery.phase.is_active())
        .min_by_key(|lottery| (lottery.sales_start, lottery.lottery_id))
}

pub fn due_for_draw<'a, I>(lotteries: I, now: i64) -> Vec<&'a Lottery>
where
    I: IntoIterator<Item = &'a Lottery>,
{
    lotteries
        .into_iter()
        .filter(|lottery| lottery.is_draw_due(now))
        .collect()
}

pub fn ready_to_close<'a, I>(lotteries: I, now: i64) -> Vec<&'a Lottery>
where
    I: IntoIterator<Item = &'a Lottery>,
{
    lotteries
        .into_iter()
        .filter(|lottery| lottery.phase == LotteryPhase::TicketSales && now >= lottery.sales_end)
        .collect()
}

pub fn ready_to_settle<'a, I>(lotteries: I) -> Vec<&'a Lottery>
where
    I: IntoIterator<Item = &'a Lottery>,
{
    lotteries
        .into_iter()
        .filter(|lottery| {
            lottery.phase == LotteryPhase::Completed
                && !lottery.prizes_distributed
                && lottery.all_tickets_tallied()
        })
        .collect()
}

pub fn winning_tickets<'a, I>(tickets: I) -> Vec<&'a Ticket>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets.into_iter().filter(|ticket| ticket.is_winner).collect()
}

pub fn tickets_with_matches<'a, I>(tickets: I, matched: u8) -> Vec<&'a Ticket>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets
        .into_iter()
        .filter(|ticket| ticket.matched_count == matched)
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub total_tickets: u64,
    pub winning_tickets: u64,
    pub total_spent: u64,
    pub total_won: u64,
}

impl PlayerStats {
    pub fn from_tickets<'a, I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        tickets.into_iter().fold(Self::default(), |mut stats, ticket| {
            stats.total_tickets += 1;
            stats.total_spent = stats.total_spent.saturating_add(ticket.price_paid);
            if ticket.is_winner {
                stats.winning_tickets += 1;
                stats.total_won = stats.total_won.saturating_add(ticket.prize_amount);
            }
            stats
        })
    }

    /// Share of tickets that won, in basis points.
    pub fn win_rate_bps(&self) -> u64 {
        ratio_bps(self.winning_tickets, self.total_tickets)
    }

    /// Winnings relative to spend, in basis points (10 000 = break-even).
    pub fn return_bps(&self) -> u64 {
        ratio_bps(self.total_won, self.total_spent)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LotteryStats {
    pub total_lotteries: u64,
    pub completed_lotteries: u64,
    pub total_prizes_paid: u64,
}

impl LotteryStats {
    pub fn from_lotteries<'a, I>(lotteries: I) -> Self
    where
        I: IntoIterator<Item = &'a Lottery>,
    {
        lotteries.into_iter().fold(Self::default(), |mut stats, lottery| {
            stats.total_lotteries += 1;
            if lottery.phase == LotteryPhase::Completed {
                stats.completed_lotteries += 1;
            }
            if lottery.prizes_distributed {
                stats.total_prizes_paid = stats
                    .total_prizes_paid
                    .saturating_add(lottery.distributed_total);
            }
            stats
        })
    }
}

fn ratio_bps(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    (u128::from(part) * u128::from(BPS_DENOMINATOR) / u128::from(whole)) as u64
}
