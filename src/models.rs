pub mod asset;
pub mod configuration;
pub mod dashboard;
pub mod lifecycle;
pub mod site;
pub mod report;
