// Events are the indexer-facing history of every lottery: draws, settlement
// and payouts can be reconstructed from the log alone.

use crate::state::LotteryPhase;
use anchor_lang::prelude::*;

#[event]
pub struct LotteryCreated {
    pub lottery: Pubkey,
    pub lottery_id: u64,
    pub ticket_price: u64,
    pub sales_start: i64,
    pub sales_end: i64,
}

#[event]
pub struct TicketPurchased {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub ticket_id: u64,
    pub holder: Pubkey,
    pub numbers: Vec<u8>,
    pub prize_pool: u64,
}

/// Sales ended; `phase` is either `DrawingPhase` or `Cancelled`.
#[event]
pub struct SalesClosed {
    pub lottery: Pubkey,
    pub phase: LotteryPhase,
    pub ticket_count: u64,
    pub prize_pool: u64,
    pub next_draw_time: Option<i64>,
}

/// A randomness account was committed for the next draw. `replaced` names
/// an earlier commit that was dropped without being drawn.
#[event]
pub struct RandomnessCommitted {
    pub lottery: Pubkey,
    pub draw_day: u8,
    pub randomness_account: Pubkey,
    pub replaced: Option<Pubkey>,
    pub slot: u64,
}

#[event]
pub struct DrawRecorded {
    pub lottery: Pubkey,
    pub draw_event: Pubkey,
    pub draw_day: u8,
    pub drawn_number: u8,
    pub scheduled_time: i64,
    pub drawn_at: i64,
    pub randomness_account: Pubkey,
    pub phase: LotteryPhase,
}

#[event]
pub struct MatchesRecomputed {
    pub lottery: Pubkey,
    pub draw_day: u8,
    pub tickets_updated: u64,
    pub tickets_tallied: u64,
}

#[event]
pub struct LotterySettled {
    pub lottery: Pubkey,
    pub prize_pool: u64,
    pub tier_prizes: [u64; 7],
    pub winner_count: u64,
    pub distributed_total: u64,
    pub carry_over: u64,
}

#[event]
pub struct PrizeAwarded {
    pub lottery: Pubkey,
    pub ticket_id: u64,
    pub prize_amount: u64,
}

#[event]
pub struct PrizeClaimed {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LotteryCancelled {
    pub lottery: Pubkey,
    pub draw_day: u8,
    /// Lamports kept on the lottery account for refunds.
    pub prize_pool: u64,
}

#[event]
pub struct TicketRefunded {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CarryOverWithdrawn {
    pub lottery: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
}
