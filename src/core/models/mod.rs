//! Core data models for the checker

pub mod record;

pub use record::{
    AUTH_FAILED, AccountSnapshot, CAPTCHA_REQUIRED, Credential, ITEM_FAULT, LoginFailure, Record,
    RecordStatus,
};
