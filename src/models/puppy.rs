//! Puppy listing model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::member::Gender;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "puppy_status")]
pub enum PuppyStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Puppy {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    /// Asking price in whole currency units.
    pub price: Option<i32>,
    pub status: PuppyStatus,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub sire_id: Option<Uuid>,
    pub dam_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePuppy {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub breed: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub price: Option<i32>,
    #[serde(default)]
    pub status: PuppyStatus,
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,
    pub sire_id: Option<Uuid>,
    pub dam_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct UpdatePuppy {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub price: Option<i32>,
    pub status: Option<PuppyStatus>,
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,
    pub sire_id: Option<Uuid>,
    pub dam_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_puppy_defaults_to_available() {
        let input: CreatePuppy =
            serde_json::from_str(r#"{"name":"Kuro","breed":"Shiba Inu","gender":"Male"}"#).unwrap();
        assert_eq!(input.status, PuppyStatus::Available);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        let update = UpdatePuppy {
            price: Some(-1),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
