pub mod configuration_service;
pub mod contract_service;
pub mod dashboard_service;
pub mod report_service;
pub mod site_service;
pub mod timeline_service;
