use std::sync::Arc;
use travelingo_core::{InquiryRepository, InquiryService};

#[derive(Clone)]
pub struct AppState {
    pub inquiries: InquiryService,
}

impl AppState {
    pub fn new(repo: Arc<dyn InquiryRepository>) -> Self {
        Self {
            inquiries: InquiryService::new(repo),
        }
    }
}
