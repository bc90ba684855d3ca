// Rampart - ui/pages/mod.rs

pub mod about;
pub mod dashboard;
pub mod profile;
pub mod report_detail;
pub mod reports;
pub mod repository;
pub mod scan;
pub mod warnings;
