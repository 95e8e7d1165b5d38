pub mod auth;
pub mod distribution;
pub mod pages;
pub mod production;
pub mod sales;
pub mod utils;
