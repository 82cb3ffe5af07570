use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, TICKET_SEED};
use crate::error::LotteryError;
use crate::events::{PrizeClaimed, TicketRefunded};
use crate::instructions::shared::pay_out;
use crate::state::{Lottery, Ticket};

/// Accounts required for a ticket holder to collect lamports from the
/// lottery, either a prize or a refund.
///
/// Ensures:
/// 1. The ticket belongs to the lottery.
/// 2. Only the holder of the ticket can collect.
#[derive(Accounts)]
pub struct CollectFromTicket<'info> {
    /// The ticket holder, receiving the lamports.
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [TICKET_SEED, lottery.key().as_ref(), ticket.ticket_id.to_le_bytes().as_ref()],
        bump = ticket.bump,
        has_one = lottery @ LotteryError::TicketLotteryMismatch,
        has_one = holder @ LotteryError::NotTicketHolder,
    )]
    pub ticket: Box<Account<'info, Ticket>>,
}

/// Pays the awarded prize of a winning ticket to its holder.
///
/// Steps:
/// 1. Verify the ticket was awarded a prize and has not been paid.
/// 2. Transfer the prize from the lottery to the holder.
///
/// # Arguments
/// * `ctx` - Context containing `CollectFromTicket` accounts
pub fn process_claim_prize(ctx: Context<CollectFromTicket>) -> Result<()> {
    let ticket = &mut ctx.accounts.ticket;
    let amount = ticket.claim_prize()?;

    pay_out(
        &ctx.accounts.lottery.to_account_info(),
        &ctx.accounts.holder.to_account_info(),
        amount,
    )?;

    msg!("Ticket {} claimed {} lamports", ticket.ticket_id, amount);
    emit!(PrizeClaimed {
        lottery: ctx.accounts.lottery.key(),
        ticket: ticket.key(),
        holder: ctx.accounts.holder.key(),
        amount,
    });
    Ok(())
}

/// Returns the ticket price of a ticket in a cancelled lottery.
pub fn process_refund_ticket(ctx: Context<CollectFromTicket>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    let ticket = &mut ctx.accounts.ticket;
    let amount = ticket.refund(lottery)?;

    pay_out(
        &lottery.to_account_info(),
        &ctx.accounts.holder.to_account_info(),
        amount,
    )?;

    msg!("Ticket {} refunded {} lamports", ticket.ticket_id, amount);
    emit!(TicketRefunded {
        lottery: lottery.key(),
        ticket: ticket.key(),
        holder: ctx.accounts.holder.key(),
        amount,
    });
    Ok(())
}
