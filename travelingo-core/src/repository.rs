use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::inquiry::{StoredInquiry, TravelInquiry};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("record rejected by store: {0}")]
    Rejected(String),
}

/// Write side of inquiry persistence.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Insert a new record and return it with its assigned id. Every call
    /// creates a distinct row; identical inquiries are not deduplicated.
    async fn insert(&self, inquiry: &TravelInquiry) -> Result<StoredInquiry, RepositoryError>;
}

/// Process-local store used by tests and by the API when no database is
/// configured.
#[derive(Default)]
pub struct InMemoryInquiryRepository {
    records: RwLock<Vec<StoredInquiry>>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of everything stored so far, in insertion order.
    pub async fn records(&self) -> Vec<StoredInquiry> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn insert(&self, inquiry: &TravelInquiry) -> Result<StoredInquiry, RepositoryError> {
        if inquiry.return_date <= inquiry.departure_date {
            return Err(RepositoryError::Rejected(
                "return_date must be after departure_date".to_string(),
            ));
        }

        let mut records = self.records.write().await;
        let stored = StoredInquiry {
            id: records.len() as i64 + 1,
            inquiry: inquiry.clone(),
        };
        records.push(stored.clone());
        Ok(stored)
    }
}
