pub mod initialize_distributor;
pub mod claim;
pub mod end_airdrop;
pub mod is_claimed;

pub use initialize_distributor::*;
pub use claim::*;
pub use end_airdrop::*;
pub use is_claimed::*;
