use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::events::SalesClosed;
use crate::state::{Lottery, LotteryPhase};

/// Accounts required to end ticket sales. Anyone may send this once the
/// sales window is over.
#[derive(Accounts)]
pub struct CloseSales<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Moves the lottery into its drawing phase, or cancels it when no ticket was
/// sold.
pub fn process_close_sales(ctx: Context<CloseSales>) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &mut ctx.accounts.lottery;

    let phase = lottery.close_sales(clock.unix_timestamp)?;

    match phase {
        LotteryPhase::Cancelled => msg!(
            "Lottery {} closed with no tickets and was cancelled",
            lottery.lottery_id
        ),
        _ => msg!(
            "Lottery {} closed with {} tickets, first draw at {:?}",
            lottery.lottery_id,
            lottery.ticket_count,
            lottery.next_draw_time
        ),
    }
    emit!(SalesClosed {
        lottery: lottery.key(),
        phase,
        ticket_count: lottery.ticket_count,
        prize_pool: lottery.prize_pool,
        next_draw_time: lottery.next_draw_time,
    });
    Ok(())
}
