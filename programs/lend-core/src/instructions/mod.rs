pub mod admin_set_params;
pub mod admin_set_paused;
pub mod borrow;
pub mod deposit;
pub mod flash_borrow;
pub mod get_liquidation_info;
pub mod get_position;
pub mod init_asset;
pub mod initialize;
pub mod liquidate;
pub mod repay;
pub mod withdraw;

pub use admin_set_params::*;
pub use admin_set_paused::*;
pub use borrow::*;
pub use deposit::*;
pub use flash_borrow::*;
pub use get_liquidation_info::*;
pub use get_position::*;
pub use init_asset::*;
pub use initialize::*;
pub use liquidate::*;
pub use repay::*;
pub use withdraw::*;
