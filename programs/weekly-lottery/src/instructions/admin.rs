use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DEFAULT_DRAW_INTERVAL, LOTTERY_SEED};
use crate::engine::lifecycle::LotteryParams;
use crate::engine::settlement::PrizePolicy;
use crate::error::LotteryError;
use crate::events::{CarryOverWithdrawn, LotteryCancelled, LotteryCreated};
use crate::instructions::shared::pay_out;
use crate::state::{Lottery, LotteryConfig};

/// Accounts required to initialize the lottery configuration.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation. Becomes the config authority.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to change the configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Box<Account<'info, LotteryConfig>>,
}

/// Accounts required to open a new lottery for ticket sales.
#[derive(Accounts)]
pub struct CreateLottery<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    #[account(
        init,
        payer = authority,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED, config.lottery_count.to_le_bytes().as_ref()],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    pub system_program: Program<'info, System>,
}

/// Accounts required for administrative actions on one lottery.
#[derive(Accounts)]
pub struct ManageLottery<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Creates the config with the draw spacing and prize policy every new
/// lottery will use.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
/// * `draw_interval` - Seconds between two draws, one day when omitted
/// * `prize_policy` - Winner threshold and split table
pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    draw_interval: Option<i64>,
    prize_policy: PrizePolicy,
) -> Result<()> {
    let draw_interval = draw_interval.unwrap_or(DEFAULT_DRAW_INTERVAL);
    require!(draw_interval > 0, LotteryError::InvalidDrawInterval);
    prize_policy.validate()?;

    let config = &mut ctx.accounts.config;
    config.bump = ctx.bumps.config;
    config.authority = ctx.accounts.payer.key();
    config.draw_interval = draw_interval;
    config.prize_policy = prize_policy;
    config.lottery_count = 0;

    msg!(
        "Config initialized: draw interval {}s, policy {:?}",
        draw_interval,
        prize_policy
    );
    Ok(())
}

/// Replaces the draw spacing and prize policy. Lotteries already created keep
/// the values they were created with.
pub fn process_update_config(
    ctx: Context<UpdateConfig>,
    draw_interval: i64,
    prize_policy: PrizePolicy,
) -> Result<()> {
    require!(draw_interval > 0, LotteryError::InvalidDrawInterval);
    prize_policy.validate()?;

    let config = &mut ctx.accounts.config;
    config.draw_interval = draw_interval;
    config.prize_policy = prize_policy;

    msg!("Config updated: draw interval {}s, policy {:?}", draw_interval, prize_policy);
    Ok(())
}

/// Opens a lottery for ticket sales.
///
/// # Arguments
/// * `ctx` - Context holding the CreateLottery accounts
/// * `ticket_price` - Ticket price in lamports
/// * `sales_start` - UNIX timestamp when sales open
/// * `sales_end` - UNIX timestamp when sales close
pub fn process_create_lottery(
    ctx: Context<CreateLottery>,
    ticket_price: u64,
    sales_start: i64,
    sales_end: i64,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let lottery_id = config.lottery_count;

    ctx.accounts.lottery.initialize(LotteryParams {
        bump: ctx.bumps.lottery,
        lottery_id,
        authority: ctx.accounts.authority.key(),
        ticket_price,
        sales_start,
        sales_end,
        draw_interval: config.draw_interval,
        prize_policy: config.prize_policy,
    })?;

    config.lottery_count = lottery_id
        .checked_add(1)
        .ok_or(LotteryError::MathOverflow)?;

    msg!(
        "Lottery {} created: price {} lamports, sales {}..{}",
        lottery_id,
        ticket_price,
        sales_start,
        sales_end
    );
    emit!(LotteryCreated {
        lottery: ctx.accounts.lottery.key(),
        lottery_id,
        ticket_price,
        sales_start,
        sales_end,
    });
    Ok(())
}

/// Cancels a lottery that is still selling or drawing. No further draws or
/// settlement happen; holders reclaim their ticket price with `refund_ticket`.
pub fn process_cancel_lottery(ctx: Context<ManageLottery>) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &mut ctx.accounts.lottery;

    lottery.cancel(clock.unix_timestamp)?;

    msg!(
        "Lottery {} cancelled on draw day {}, {} lamports held for refunds",
        lottery.lottery_id,
        lottery.current_draw_day,
        lottery.prize_pool
    );
    emit!(LotteryCancelled {
        lottery: lottery.key(),
        draw_day: lottery.current_draw_day,
        prize_pool: lottery.prize_pool,
    });
    Ok(())
}

/// Sends the undistributed remainder of a settled lottery to its authority.
pub fn process_withdraw_carry_over(ctx: Context<ManageLottery>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    require!(lottery.prizes_distributed, LotteryError::NotDistributed);

    let amount = lottery.carry_over;
    require!(amount > 0, LotteryError::NothingToWithdraw);
    lottery.carry_over = 0;

    pay_out(
        &lottery.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        amount,
    )?;

    msg!("Withdrew {} lamports of carry-over", amount);
    emit!(CarryOverWithdrawn {
        lottery: lottery.key(),
        authority: ctx.accounts.authority.key(),
        amount,
    });
    Ok(())
}
