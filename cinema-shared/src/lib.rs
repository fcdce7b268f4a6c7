pub mod models;
pub mod money;
pub mod pii;
pub mod time;

pub use money::Amount;
pub use pii::Masked;
