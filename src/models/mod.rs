pub mod auth;
pub mod company;
pub mod geo;
pub mod production;
