use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{LOTTERY_SEED, TICKET_SEED};
use crate::engine::number_set::NumberSet;
use crate::events::TicketPurchased;
use crate::state::{Lottery, Ticket};

/// Accounts required to buy a lottery ticket.
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The account paying for the ticket. Becomes the ticket holder.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Lottery the ticket is bought for. Receives the ticket price.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The new ticket, addressed by its position in the lottery's sales.
    #[account(
        init,
        payer = payer,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [TICKET_SEED, lottery.key().as_ref(), lottery.ticket_count.to_le_bytes().as_ref()],
        bump
    )]
    pub ticket: Box<Account<'info, Ticket>>,

    pub system_program: Program<'info, System>,
}

/// Buys a lottery ticket for the caller.
///
/// Steps performed:
/// 1. Validate the six chosen numbers.
/// 2. Check the lottery is selling and record the ticket.
/// 3. Transfer the ticket price from payer to the lottery.
///
/// # Arguments
/// * `ctx` - Context containing BuyTicket accounts
/// * `numbers` - The six chosen numbers, each in 1..=100
pub fn process_buy_ticket(ctx: Context<BuyTicket>, numbers: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let numbers = NumberSet::new(&numbers)?;

    let lottery_key = ctx.accounts.lottery.key();
    let holder = ctx.accounts.payer.key();
    let lottery = &mut ctx.accounts.lottery;
    let ticket = &mut ctx.accounts.ticket;

    lottery.sell_ticket(ticket, lottery_key, holder, numbers, clock.unix_timestamp)?;
    ticket.bump = ctx.bumps.ticket;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: lottery.to_account_info(),
            },
        ),
        ticket.price_paid,
    )?;

    msg!(
        "Ticket {} sold to {} with numbers {:?}",
        ticket.ticket_id,
        holder,
        numbers.to_vec()
    );
    emit!(TicketPurchased {
        lottery: lottery_key,
        ticket: ticket.key(),
        ticket_id: ticket.ticket_id,
        holder,
        numbers: numbers.to_vec(),
        prize_pool: lottery.prize_pool,
    });

    Ok(())
}
