use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use engine::settlement::PrizePolicy;

declare_id!("5Jqsab6V95TEb1mPagjGiRrpQiCNkRxcsFXchy9xwnpe");

#[program]
pub mod weekly_lottery {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        draw_interval: Option<i64>,
        prize_policy: PrizePolicy,
    ) -> Result<()> {
        process_initialize_config(ctx, draw_interval, prize_policy)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        draw_interval: i64,
        prize_policy: PrizePolicy,
    ) -> Result<()> {
        process_update_config(ctx, draw_interval, prize_policy)
    }

    pub fn create_lottery(
        ctx: Context<CreateLottery>,
        ticket_price: u64,
        sales_start: i64,
        sales_end: i64,
    ) -> Result<()> {
        process_create_lottery(ctx, ticket_price, sales_start, sales_end)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>, numbers: Vec<u8>) -> Result<()> {
        process_buy_ticket(ctx, numbers)
    }

    pub fn close_sales(ctx: Context<CloseSales>) -> Result<()> {
        process_close_sales(ctx)
    }

    pub fn cancel_lottery(ctx: Context<ManageLottery>) -> Result<()> {
        process_cancel_lottery(ctx)
    }

    pub fn commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
        process_commit_draw(ctx)
    }

    pub fn trigger_next_draw(ctx: Context<TriggerNextDraw>) -> Result<()> {
        process_trigger_next_draw(ctx)
    }

    pub fn recompute_matches<'info>(
        ctx: Context<'_, '_, 'info, 'info, RecomputeMatches<'info>>,
    ) -> Result<()> {
        process_recompute_matches(ctx)
    }

    pub fn settle<'info>(ctx: Context<'_, '_, 'info, 'info, Settle<'info>>) -> Result<()> {
        process_settle(ctx)
    }

    pub fn award_prizes<'info>(ctx: Context<'_, '_, 'info, 'info, Settle<'info>>) -> Result<()> {
        process_award_prizes(ctx)
    }

    pub fn claim_prize(ctx: Context<CollectFromTicket>) -> Result<()> {
        process_claim_prize(ctx)
    }

    pub fn refund_ticket(ctx: Context<CollectFromTicket>) -> Result<()> {
        process_refund_ticket(ctx)
    }

    pub fn withdraw_carry_over(ctx: Context<ManageLottery>) -> Result<()> {
        process_withdraw_carry_over(ctx)
    }
}
