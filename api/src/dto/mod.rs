//! Request and response bodies (camelCase JSON)

pub mod account;
pub mod otp;

pub use account::{AccountCheckRequest, AccountCheckResponse, CurrentAccountResponse};
pub use otp::{OtpRequest, OtpRequestResponse, OtpVerifyRequest};
