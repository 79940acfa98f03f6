pub mod configuration_repo;
pub use configuration_repo::ConfigurationRepository;
pub mod site_repo;
pub use site_repo::SiteRepository;
pub mod asset_repo;
pub use asset_repo::AssetRepository;
