pub mod auth;
pub mod company;
pub mod geo;
pub mod map;
pub mod production;
pub mod transfer;
