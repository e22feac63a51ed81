//! HTTP request handlers

pub mod health;
pub mod rates;
pub mod labels;
