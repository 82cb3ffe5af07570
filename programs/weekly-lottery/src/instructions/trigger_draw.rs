use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{DRAW_SEED, LOTTERY_SEED};
use crate::engine::scheduler::{trigger_next_draw, SeededNumbers};
use crate::error::LotteryError;
use crate::events::DrawRecorded;
use crate::state::{DrawEvent, Lottery};

/// Accounts required to record the next daily draw.
///
/// The draw event is addressed by `(lottery, draw day)`, so a day can only
/// ever be recorded once. Anyone may crank this once the draw is due.
#[derive(Accounts)]
pub struct TriggerNextDraw<'info> {
    /// Account paying for the draw event.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        init,
        payer = payer,
        space = 8 + DrawEvent::INIT_SPACE,
        seeds = [DRAW_SEED, lottery.key().as_ref(), lottery.next_draw_day().to_le_bytes().as_ref()],
        bump
    )]
    pub draw_event: Box<Account<'info, DrawEvent>>,

    /// The randomness oracle account committed for this draw.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_trigger_next_draw(ctx: Context<TriggerNextDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &mut ctx.accounts.lottery;

    // cancellation and timing are checked before randomness is touched
    if !lottery.is_draw_due(clock.unix_timestamp) {
        msg!(
            "Lottery {} not due: phase {:?}, next draw {:?}, now {}",
            lottery.lottery_id,
            lottery.phase,
            lottery.next_draw_time,
            clock.unix_timestamp
        );
        return err!(LotteryError::NotDue);
    }
    let randomness_account =
        lottery.take_pending_randomness(ctx.accounts.randomness_account_data.key())?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| LotteryError::RandomnessNotResolved)?;

    let mut source = SeededNumbers::new(revealed_random_value);
    let record = trigger_next_draw(lottery, clock.unix_timestamp, &mut source)?;

    let draw_event = &mut ctx.accounts.draw_event;
    draw_event.bump = ctx.bumps.draw_event;
    draw_event.lottery = lottery.key();
    draw_event.draw_day = record.draw_day;
    draw_event.drawn_number = record.drawn_number;
    draw_event.scheduled_time = record.scheduled_time;
    draw_event.drawn_at = record.drawn_at;
    draw_event.randomness_account = randomness_account;
    draw_event.slot = clock.slot;

    msg!(
        "Lottery {} day {}: drew {}",
        lottery.lottery_id,
        record.draw_day,
        record.drawn_number
    );
    emit!(DrawRecorded {
        lottery: lottery.key(),
        draw_event: draw_event.key(),
        draw_day: record.draw_day,
        drawn_number: record.drawn_number,
        scheduled_time: record.scheduled_time,
        drawn_at: record.drawn_at,
        randomness_account,
        phase: lottery.phase,
    });

    Ok(())
}
