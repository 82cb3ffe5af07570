use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::engine::settlement::{award_batch, settle};
use crate::events::{LotterySettled, PrizeAwarded};
use crate::instructions::shared::{load_tickets, store_tickets};
use crate::state::Lottery;

/// Accounts required to settle a lottery or award a further batch of tickets.
///
/// Remaining accounts: writable `Ticket` accounts of this lottery, each
/// already matched against the final draw.
#[derive(Accounts)]
pub struct Settle<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Fixes the prize table of a completed lottery and awards the tickets passed
/// along. Can only succeed once per lottery.
pub fn process_settle<'info>(ctx: Context<'_, '_, 'info, 'info, Settle<'info>>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    let lottery_key = lottery.key();

    let mut tickets = load_tickets(lottery_key, ctx.remaining_accounts)?;
    let report = settle(lottery, tickets.iter_mut().map(|ticket| &mut **ticket))?;
    store_tickets(&tickets, ctx.program_id)?;

    msg!(
        "Lottery {} settled: {} winners share {} of {} lamports, {} carried over",
        lottery.lottery_id,
        lottery.winner_count,
        lottery.distributed_total,
        lottery.prize_pool,
        lottery.carry_over
    );
    emit!(LotterySettled {
        lottery: lottery_key,
        prize_pool: lottery.prize_pool,
        tier_prizes: lottery.tier_prizes,
        winner_count: lottery.winner_count,
        distributed_total: lottery.distributed_total,
        carry_over: lottery.carry_over,
    });
    emit_awards(lottery_key, &report.awarded);
    Ok(())
}

/// Awards tickets of an already settled lottery that were not part of the
/// `settle` call.
pub fn process_award_prizes<'info>(
    ctx: Context<'_, '_, 'info, 'info, Settle<'info>>,
) -> Result<()> {
    let lottery = &ctx.accounts.lottery;
    let lottery_key = lottery.key();

    let mut tickets = load_tickets(lottery_key, ctx.remaining_accounts)?;
    let awarded = award_batch(lottery, tickets.iter_mut().map(|ticket| &mut **ticket))?;
    store_tickets(&tickets, ctx.program_id)?;

    msg!(
        "Lottery {}: {} tickets processed, {} new winners",
        lottery.lottery_id,
        tickets.len(),
        awarded.len()
    );
    emit_awards(lottery_key, &awarded);
    Ok(())
}

fn emit_awards(lottery: Pubkey, awarded: &[(u64, u64)]) {
    for &(ticket_id, prize_amount) in awarded {
        emit!(PrizeAwarded {
            lottery,
            ticket_id,
            prize_amount,
        });
    }
}
