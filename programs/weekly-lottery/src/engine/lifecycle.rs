use anchor_lang::prelude::*;

use crate::constants::DRAW_DAYS;
use crate::engine::number_set::NumberSet;
use crate::engine::settlement::PrizePolicy;
use crate::error::LotteryError;
use crate::state::{Lottery, LotteryPhase, Ticket};

/// Everything needed to open a lottery for sales.
#[derive(Clone, Copy, Debug)]
pub struct LotteryParams {
    pub bump: u8,
    pub lottery_id: u64,
    pub authority: Pubkey,
    pub ticket_price: u64,
    pub sales_start: i64,
    pub sales_end: i64,
    pub draw_interval: i64,
    pub prize_policy: PrizePolicy,
}

impl Lottery {
    /// Opens a fresh lottery in `TicketSales`.
    pub fn initialize(&mut self, params: LotteryParams) -> Result<()> {
        require!(params.ticket_price > 0, LotteryError::InvalidTicketPrice);
        require!(
            params.sales_start < params.sales_end,
            LotteryError::InvalidSalesWindow
        );
        require!(params.draw_interval > 0, LotteryError::InvalidDrawInterval);
        params.prize_policy.validate()?;

        *self = Lottery {
            bump: params.bump,
            lottery_id: params.lottery_id,
            authority: params.authority,
            ticket_price: params.ticket_price,
            sales_start: params.sales_start,
            sales_end: params.sales_end,
            draw_interval: params.draw_interval,
            prize_policy: params.prize_policy,
            phase: LotteryPhase::TicketSales,
            ..Lottery::default()
        };
        Ok(())
    }

    pub fn is_selling(&self, now: i64) -> bool {
        self.phase == LotteryPhase::TicketSales && now >= self.sales_start && now <= self.sales_end
    }

    /// Records a purchase into `ticket` and adds the price to the pool.
    /// The caller moves the lamports.
    pub fn sell_ticket(
        &mut self,
        ticket: &mut Ticket,
        lottery_key: Pubkey,
        holder: Pubkey,
        numbers: NumberSet,
        now: i64,
    ) -> Result<()> {
        require!(self.is_selling(now), LotteryError::SalesClosed);

        let ticket_id = self.ticket_count;
        self.ticket_count = ticket_id
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        self.prize_pool = self
            .prize_pool
            .checked_add(self.ticket_price)
            .ok_or(LotteryError::MathOverflow)?;

        ticket.lottery = lottery_key;
        ticket.ticket_id = ticket_id;
        ticket.holder = holder;
        ticket.numbers = numbers;
        ticket.matched_count = 0;
        ticket.matched_through_day = 0;
        ticket.price_paid = self.ticket_price;
        ticket.purchased_at = now;
        Ok(())
    }

    /// Ends ticket sales once the window has passed. A lottery nobody bought
    /// into is cancelled instead of entering the drawing phase.
    pub fn close_sales(&mut self, now: i64) -> Result<LotteryPhase> {
        require!(
            self.phase == LotteryPhase::TicketSales,
            LotteryError::InvalidPhaseTransition
        );
        require!(now >= self.sales_end, LotteryError::SalesStillOpen);

        let next = if self.ticket_count == 0 {
            LotteryPhase::Cancelled
        } else {
            LotteryPhase::DrawingPhase
        };
        self.transition(next, now)?;
        Ok(next)
    }

    pub fn is_draw_due(&self, now: i64) -> bool {
        self.phase == LotteryPhase::DrawingPhase
            && matches!(self.next_draw_time, Some(at) if now >= at)
    }

    /// Appends one drawn number and advances the draw day, completing the
    /// lottery on the last day. Returns the day just recorded.
    pub fn record_draw(&mut self, number: u8, now: i64) -> Result<u8> {
        require!(
            self.phase == LotteryPhase::DrawingPhase,
            LotteryError::NotDue
        );
        require!(!self.draws_complete(), LotteryError::LotteryExhausted);

        let mut drawn = self.drawn_numbers.clone();
        drawn.push(number);
        // rejects repeats and out-of-range values
        NumberSet::drawn(&drawn)?;

        self.drawn_numbers = drawn;
        self.current_draw_day += 1;

        let next = if self.current_draw_day == DRAW_DAYS {
            LotteryPhase::Completed
        } else {
            LotteryPhase::DrawingPhase
        };
        self.transition(next, now)?;
        Ok(self.current_draw_day)
    }

    /// Administrative stop. The pool stays on the account for refunds.
    pub fn cancel(&mut self, now: i64) -> Result<()> {
        self.transition(LotteryPhase::Cancelled, now)
    }

    pub fn drawn_set(&self) -> Result<NumberSet> {
        NumberSet::drawn(&self.drawn_numbers)
    }

    fn transition(&mut self, next: LotteryPhase, now: i64) -> Result<()> {
        require!(
            self.phase.can_transition_to(next),
            LotteryError::InvalidPhaseTransition
        );
        self.next_draw_time = match next {
            LotteryPhase::DrawingPhase => Some(
                now.checked_add(self.draw_interval)
                    .ok_or(LotteryError::MathOverflow)?,
            ),
            _ => None,
        };
        self.phase = next;
        Ok(())
    }
}

impl Ticket {
    /// Marks the ticket refunded and returns the lamports owed to the holder.
    pub fn refund(&mut self, lottery: &mut Lottery) -> Result<u64> {
        require!(
            lottery.phase == LotteryPhase::Cancelled,
            LotteryError::NotCancelled
        );
        require!(!self.refunded, LotteryError::AlreadyRefunded);

        lottery.prize_pool = lottery
            .prize_pool
            .checked_sub(self.price_paid)
            .ok_or(LotteryError::MathOverflow)?;
        self.refunded = true;
        Ok(self.price_paid)
    }
}
