//! Route handlers organized by resource

pub mod contact;
pub mod features;
pub mod health;
pub mod public;
