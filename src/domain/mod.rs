pub mod admin;
pub mod impression;
pub mod ledger;
pub mod plan;
pub mod shared;
