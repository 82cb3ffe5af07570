use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::engine::matcher::recompute_matches;
use crate::events::MatchesRecomputed;
use crate::instructions::shared::{load_tickets, store_tickets};
use crate::state::Lottery;

/// Accounts required to refresh match counts.
///
/// Remaining accounts: writable `Ticket` accounts of this lottery, in any
/// batch size that fits a transaction.
#[derive(Accounts)]
pub struct RecomputeMatches<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

pub fn process_recompute_matches<'info>(
    ctx: Context<'_, '_, 'info, 'info, RecomputeMatches<'info>>,
) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    let drawn = lottery.drawn_set()?;

    let mut tickets = load_tickets(lottery.key(), ctx.remaining_accounts)?;
    let summary = recompute_matches(tickets.iter_mut().map(|ticket| &mut **ticket), &drawn);
    lottery.record_tally(&summary)?;
    store_tickets(&tickets, ctx.program_id)?;

    msg!(
        "Lottery {}: {} tickets matched against day {}, {}/{} final",
        lottery.lottery_id,
        summary.updated,
        summary.draw_day,
        lottery.tickets_tallied,
        lottery.ticket_count
    );
    emit!(MatchesRecomputed {
        lottery: lottery.key(),
        draw_day: summary.draw_day,
        tickets_updated: summary.updated,
        tickets_tallied: lottery.tickets_tallied,
    });
    Ok(())
}
