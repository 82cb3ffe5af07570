use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // ===== Ticket numbers =====
    #[msg("A ticket must hold exactly six numbers")]
    InvalidFormat,

    #[msg("Numbers must be between 1 and 100")]
    OutOfRange,

    #[msg("Numbers must not repeat")]
    DuplicateValue,

    // ===== Scheduling =====
    #[msg("The next draw is not due yet")]
    NotDue,

    #[msg("All six draws have already been recorded")]
    LotteryExhausted,

    #[msg("Randomness source kept producing numbers that were already drawn")]
    RandomnessExhausted,

    // ===== Settlement =====
    #[msg("Lottery has not completed its draws")]
    NotCompleted,

    #[msg("Prizes have already been distributed")]
    AlreadyDistributed,

    #[msg("Not every ticket has been matched against the final draw")]
    MatchesIncomplete,

    #[msg("Prizes have not been distributed yet")]
    NotDistributed,

    #[msg("More tickets tallied than were sold")]
    TallyExceedsTickets,

    // ===== Lifecycle =====
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,

    #[msg("Sales window must start before it ends")]
    InvalidSalesWindow,

    #[msg("Draw interval must be positive")]
    InvalidDrawInterval,

    #[msg("Ticket sales are closed for this lottery")]
    SalesClosed,

    #[msg("Ticket sales are still open")]
    SalesStillOpen,

    #[msg("Transition not allowed from the current phase")]
    InvalidPhaseTransition,

    // ===== Tickets and payouts =====
    #[msg("Ticket does not belong to this lottery")]
    TicketLotteryMismatch,

    #[msg("The same ticket account was passed twice")]
    DuplicateTicketAccount,

    #[msg("Ticket is not a winning ticket")]
    NotWinner,

    #[msg("Prize already claimed")]
    PrizeAlreadyClaimed,

    #[msg("Lottery is not cancelled")]
    NotCancelled,

    #[msg("Ticket already refunded")]
    AlreadyRefunded,

    #[msg("Signer is not the ticket holder")]
    NotTicketHolder,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    // ===== Configuration =====
    #[msg("Prize shares must not exceed 100%")]
    InvalidPrizePolicy,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Math overflow")]
    MathOverflow,

    // ===== Randomness =====
    #[msg("Randomness account does not match the committed one")]
    IncorrectRandomnessAccount,

    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,

    #[msg("Randomness not resolved")]
    RandomnessNotResolved,

    #[msg("No randomness committed for the next draw")]
    RandomnessNotCommitted,
}
