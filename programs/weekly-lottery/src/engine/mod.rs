/// Validated six-number sets and drawn-number sets.
pub mod number_set;

/// Phase transitions of a lottery: sales, daily draws, completion, cancellation.
pub mod lifecycle;

/// Daily draw generation.
pub mod scheduler;

/// Match counts of tickets against the drawn numbers.
pub mod matcher;

/// Prize policy, prize table and per-ticket awards.
pub mod settlement;

pub mod query;
