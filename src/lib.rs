// src/lib.rs

pub mod api;
pub mod config;
pub mod definition;
pub mod error;
pub mod listing;
pub mod models;
pub mod routes;
pub mod session;
pub mod wizard;

pub use api::{HttpRecruitingApi, RecruitingApi};
pub use error::AppError;
pub use listing::TestListing;
pub use wizard::TestWizard;
