pub mod cipher_traits;
pub mod deal;
pub mod des;
pub mod des_tables;
pub mod error;
pub mod key;
pub mod modes;
pub mod padding;
pub mod triple_des;
pub mod utils;
