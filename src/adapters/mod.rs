//! External integrations
//!
//! - [`vendor`] - the vendor shift push REST API
//! - [`store`] - receipt store backends behind the [`store::ReceiptStore`]
//!   trait

pub mod store;
pub mod vendor;
