//! crediflow-web — Web GUI for Crediflow
//! Provides a two-page loan application dashboard:
//!   - Prediction form backed by the pre-trained classifier
//!   - Dataset visualization (table, describe, histogram, correlation)

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
