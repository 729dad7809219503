pub mod inquiry;
pub mod repository;
pub mod service;
pub mod validation;

pub use inquiry::{StoredInquiry, TravelInquiry};
pub use repository::{InMemoryInquiryRepository, InquiryRepository, RepositoryError};
pub use service::{InquiryService, SubmitError};
pub use validation::{validate_inquiry, ValidationErrors, NON_FIELD_ERRORS};
