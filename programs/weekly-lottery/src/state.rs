use anchor_lang::prelude::*;

use crate::constants::{DRAW_DAYS, MATCH_TIERS};
use crate::engine::number_set::NumberSet;
use crate::engine::settlement::PrizePolicy;

/// Program-wide settings. Every new lottery snapshots the draw interval and
/// prize policy from here, so later updates never change a running lottery.
#[account]
#[derive(InitSpace, Default)]
pub struct LotteryConfig {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Admin allowed to create, cancel and commit randomness for lotteries.
    pub authority: Pubkey,

    /// Seconds between two consecutive draws.
    pub draw_interval: i64,

    /// Winner threshold and prize split applied at settlement.
    pub prize_policy: PrizePolicy,

    /// Id handed to the next lottery. Only ever increases.
    pub lottery_count: u64,
}

/// Phase of a lottery. Phases only move forward; `Completed` and
/// `Cancelled` are terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum LotteryPhase {
    #[default]
    TicketSales,
    DrawingPhase,
    Completed,
    Cancelled,
}

impl LotteryPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, LotteryPhase::Completed | LotteryPhase::Cancelled)
    }

    /// Selling tickets or drawing numbers.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition_to(self, next: LotteryPhase) -> bool {
        use LotteryPhase::*;
        matches!(
            (self, next),
            (TicketSales, DrawingPhase)
                | (TicketSales, Cancelled)
                | (DrawingPhase, DrawingPhase)
                | (DrawingPhase, Completed)
                | (DrawingPhase, Cancelled)
        )
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Sequential id assigned from `LotteryConfig::lottery_count`.
    pub lottery_id: u64,

    /// The authority responsible for managing this lottery.
    pub authority: Pubkey,

    /// The price (in lamports) of a single ticket.
    pub ticket_price: u64,

    /// Lamports collected from ticket sales. The lamports themselves sit on
    /// this account on top of its rent-exempt balance.
    pub prize_pool: u64,

    /// The total number of tickets issued for this lottery.
    pub ticket_count: u64,

    pub phase: LotteryPhase,

    /// UNIX timestamp when ticket sales open.
    pub sales_start: i64,

    /// UNIX timestamp when ticket sales close.
    pub sales_end: i64,

    /// Seconds between two draws, copied from the config at creation.
    pub draw_interval: i64,

    /// Draws recorded so far, 0 before the first draw.
    pub current_draw_day: u8,

    /// When the next draw becomes due. Only set during `DrawingPhase`.
    pub next_draw_time: Option<i64>,

    /// Drawn numbers in draw-day order.
    #[max_len(6)]
    pub drawn_numbers: Vec<u8>,

    /// Switchboard randomness account committed for the next draw.
    /// `Pubkey::default()` when nothing is committed.
    pub pending_randomness: Pubkey,

    /// Prize policy copied from the config at creation.
    pub prize_policy: PrizePolicy,

    /// Number of tickets per final match count, filled in as tickets are
    /// matched against the complete drawn set.
    pub match_tally: [u64; MATCH_TIERS],

    /// Tickets already counted in `match_tally`.
    pub tickets_tallied: u64,

    /// Set once settlement has fixed the prize table.
    pub prizes_distributed: bool,

    /// Prize per ticket, indexed by match count. Fixed at settlement.
    pub tier_prizes: [u64; MATCH_TIERS],

    pub winner_count: u64,

    /// Sum of every prize awarded at settlement.
    pub distributed_total: u64,

    /// Pool share left undistributed by rounding or empty tiers.
    pub carry_over: u64,
}

impl Lottery {
    pub fn next_draw_day(&self) -> u8 {
        self.current_draw_day.saturating_add(1)
    }

    pub fn draws_complete(&self) -> bool {
        self.current_draw_day >= DRAW_DAYS
    }
}

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Ticket {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Lottery this ticket was bought for. Never reassigned.
    pub lottery: Pubkey,

    /// Position of this ticket in its lottery's sales.
    pub ticket_id: u64,

    /// Wallet that bought the ticket and receives prizes or refunds.
    pub holder: Pubkey,

    /// The six chosen numbers.
    pub numbers: NumberSet,

    pub matched_count: u8,

    /// Draw day the current `matched_count` was computed against.
    pub matched_through_day: u8,

    pub price_paid: u64,

    pub purchased_at: i64,

    /// Set by settlement together with `prize_amount`.
    pub is_winner: bool,

    pub prize_amount: u64,

    /// Settlement has processed this ticket, winning or not.
    pub prize_awarded: bool,

    pub prize_claimed: bool,

    pub refunded: bool,
}

/// One daily draw. Written once by the scheduler and never modified.
#[account]
#[derive(InitSpace, Default)]
pub struct DrawEvent {
    pub bump: u8,
    pub lottery: Pubkey,
    /// 1 through 6.
    pub draw_day: u8,
    pub drawn_number: u8,
    pub scheduled_time: i64,
    pub drawn_at: i64,
    /// Randomness account the number was derived from, kept for audits.
    pub randomness_account: Pubkey,
    pub slot: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_only_move_forward() {
        use LotteryPhase::*;
        assert!(TicketSales.can_transition_to(DrawingPhase));
        assert!(DrawingPhase.can_transition_to(DrawingPhase));
        assert!(DrawingPhase.can_transition_to(Completed));
        assert!(!DrawingPhase.can_transition_to(TicketSales));
        assert!(!TicketSales.can_transition_to(Completed));
        assert!(!TicketSales.can_transition_to(TicketSales));
    }

    #[test]
    fn terminal_phases_have_no_exit() {
        use LotteryPhase::*;
        for from in [Completed, Cancelled] {
            assert!(from.is_terminal());
            for to in [TicketSales, DrawingPhase, Completed, Cancelled] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn either_active_phase_can_be_cancelled() {
        assert!(LotteryPhase::TicketSales.can_transition_to(LotteryPhase::Cancelled));
        assert!(LotteryPhase::DrawingPhase.can_transition_to(LotteryPhase::Cancelled));
    }
}
