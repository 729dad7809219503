pub mod app_config;
pub mod database;
pub mod inquiry_repo;

pub use database::DbClient;
pub use inquiry_repo::PostgresInquiryRepository;
