pub mod admin;
pub mod buy_ticket;
pub mod claim_prize;
pub mod close_sales;
pub mod commit_draw;
pub mod recompute_matches;
pub mod settle;
pub mod shared;
pub mod trigger_draw;

pub use admin::*;
pub use buy_ticket::*;
pub use claim_prize::*;
pub use close_sales::*;
pub use commit_draw::*;
pub use recompute_matches::*;
pub use settle::*;
pub use trigger_draw::*;
