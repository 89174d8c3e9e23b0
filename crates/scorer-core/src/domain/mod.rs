//! 도메인 모델.

pub mod market_data;
pub mod price_history;
pub mod score;

pub use market_data::*;
pub use price_history::*;
pub use score::*;
