pub mod settlement;

pub mod initialize_token;
pub use initialize_token::*;

pub mod register_holder;
pub use register_holder::*;

pub mod approve;
pub use approve::*;

pub mod transfer;
pub use transfer::*;

pub mod seed_liquidity;
pub use seed_liquidity::*;

pub mod swap;
pub use swap::*;

pub mod process_dividends;
pub use process_dividends::*;

pub mod claim_dividend;
pub use claim_dividend::*;

pub mod update_exemptions;
pub use update_exemptions::*;

pub mod query;
pub use query::*;
