pub mod analytics;
pub mod application;
pub mod company;
pub mod health;
pub mod posting;
