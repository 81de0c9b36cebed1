pub mod fee_config;
pub mod token_config;
pub mod token_state;
pub mod distributor;
pub mod holder_account;
pub mod allowance;
pub mod liquidity_pool;

pub use fee_config::*;
pub use token_config::*;
pub use token_state::*;
pub use distributor::*;
pub use holder_account::*;
pub use allowance::*;
pub use liquidity_pool::*;
