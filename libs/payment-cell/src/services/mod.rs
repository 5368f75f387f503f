pub mod checkout;
pub mod coordinator;
pub mod gateway;
