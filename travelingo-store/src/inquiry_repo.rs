use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use travelingo_core::repository::{InquiryRepository, RepositoryError};
use travelingo_core::{StoredInquiry, TravelInquiry};
use travelingo_shared::pii::Masked;

// Postgres SQLSTATE codes the schema itself raises.
const CHECK_VIOLATION: &str = "23514";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
const CHARACTER_NOT_IN_REPERTOIRE: &str = "22021";

pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    travelers: i32,
    budget_range: String,
    travel_type: String,
}

impl TryFrom<InquiryRow> for StoredInquiry {
    type Error = RepositoryError;

    fn try_from(row: InquiryRow) -> Result<Self, Self::Error> {
        let travelers = u32::try_from(row.travelers).map_err(|_| {
            RepositoryError::Rejected(format!("negative travelers count in row {}", row.id))
        })?;

        Ok(StoredInquiry {
            id: row.id,
            inquiry: TravelInquiry {
                first_name: row.first_name,
                last_name: row.last_name,
                email: Masked::new(row.email),
                phone: Masked::new(row.phone),
                destination: row.destination,
                departure_date: row.departure_date,
                return_date: row.return_date,
                travelers,
                budget_range: row.budget_range,
                travel_type: row.travel_type,
            },
        })
    }
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|c| c.into_owned());

    match code.as_deref() {
        Some(CHECK_VIOLATION)
        | Some(STRING_DATA_RIGHT_TRUNCATION)
        | Some(CHARACTER_NOT_IN_REPERTOIRE) => {
            RepositoryError::Rejected(err.to_string())
        }
        _ => RepositoryError::Storage(Box::new(err)),
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn insert(&self, inquiry: &TravelInquiry) -> Result<StoredInquiry, RepositoryError> {
        let travelers = i32::try_from(inquiry.travelers).map_err(|_| {
            RepositoryError::Rejected(format!("travelers out of range: {}", inquiry.travelers))
        })?;

        let row = sqlx::query_as::<_, InquiryRow>(
            r#"
            INSERT INTO travel_inquiries (
                first_name, last_name, email, phone, destination,
                departure_date, return_date, travelers, budget_range, travel_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, first_name, last_name, email, phone, destination,
                      departure_date, return_date, travelers, budget_range, travel_type
            "#,
        )
        .bind(&inquiry.first_name)
        .bind(&inquiry.last_name)
        .bind(inquiry.email.expose())
        .bind(inquiry.phone.expose())
        .bind(&inquiry.destination)
        .bind(inquiry.departure_date)
        .bind(inquiry.return_date)
        .bind(travelers)
        .bind(&inquiry.budget_range)
        .bind(&inquiry.travel_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        StoredInquiry::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(travelers: i32) -> InquiryRow {
        InquiryRow {
            id: 42,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: "555-0100".to_string(),
            destination: "Paris".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            travelers,
            budget_range: "medium".to_string(),
            travel_type: "leisure".to_string(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let stored = StoredInquiry::try_from(row(2)).unwrap();
        assert_eq!(stored.id, 42);
        assert_eq!(stored.inquiry.email.expose(), "ann@example.com");
        assert_eq!(stored.inquiry.travelers, 2);
        assert_eq!(stored.inquiry.to_string(), "Ann Lee - Paris");
    }

    #[test]
    fn test_row_with_negative_travelers_is_rejected() {
        let err = StoredInquiry::try_from(row(-3)).unwrap_err();
        assert!(matches!(err, RepositoryError::Rejected(_)));
    }

    #[test]
    fn test_non_database_errors_map_to_storage() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Storage(_)));
    }
}
