use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    AdoptionStatus, ApplicationStatus, Gender, PetType, UserRole, adoption_applications, donations,
    favourites, pets, shelter_managements, shelters, user_profiles, users,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl UserDetails {
    pub fn new(user: users::Model, profile: Option<user_profiles::Model>) -> Self {
        let (phone_number, address) = match profile {
            Some(p) => (p.phone_number, p.address),
            None => (None, None),
        };
        Self {
            user: user.into(),
            phone_number,
            address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Shelter {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<shelters::Model> for Shelter {
    fn from(model: shelters::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            phone_number: model.phone_number,
            website_url: model.website_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShelterManagement {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub admin_user_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<shelter_managements::Model> for ShelterManagement {
    fn from(model: shelter_managements::Model) -> Self {
        Self {
            id: model.id,
            shelter_id: model.shelter_id,
            admin_user_id: model.admin_user_id,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub shelter_name: Option<String>,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub domesticated: bool,
    pub pet_type: PetType,
    pub adoption_status: AdoptionStatus,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    pub fn with_shelter(model: pets::Model, shelter: Option<shelters::Model>) -> Self {
        let mut pet = Self::from(model);
        pet.shelter_name = shelter.map(|s| s.name);
        pet
    }
}

impl From<pets::Model> for Pet {
    fn from(model: pets::Model) -> Self {
        Self {
            id: model.id,
            shelter_id: model.shelter_id,
            shelter_name: None,
            name: model.name,
            age: model.age,
            gender: model.gender,
            domesticated: model.domesticated,
            pet_type: model.pet_type,
            adoption_status: model.adoption_status,
            image: model.image,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdopterSummary {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdoptionApplication {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: Option<String>,
    pub adopter_user_id: Uuid,
    pub adopter_user: Option<AdopterSummary>,
    pub application_status: ApplicationStatus,
    pub message: Option<String>,
    pub submission_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdoptionApplication {
    pub fn with_relations(
        model: adoption_applications::Model,
        pet: Option<&pets::Model>,
        adopter: Option<&users::Model>,
    ) -> Self {
        let mut application = Self::from(model);
        application.pet_name = pet.map(|p| p.name.clone());
        application.adopter_user = adopter.map(|u| AdopterSummary {
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
        });
        application
    }
}

impl From<adoption_applications::Model> for AdoptionApplication {
    fn from(model: adoption_applications::Model) -> Self {
        Self {
            id: model.id,
            pet_id: model.pet_id,
            pet_name: None,
            adopter_user_id: model.adopter_user_id,
            adopter_user: None,
            application_status: model.application_status,
            message: model.message,
            submission_date: model.submission_date.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Favourite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet: Pet,
    pub created_at: DateTime<Utc>,
}

impl Favourite {
    pub fn new(model: favourites::Model, pet: pets::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            pet: pet.into(),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shelter_id: Uuid,
    pub amount: Decimal,
    pub donation_date: DateTime<Utc>,
}

impl From<donations::Model> for Donation {
    fn from(model: donations::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shelter_id: model.shelter_id,
            amount: model.amount,
            donation_date: model.donation_date.with_timezone(&Utc),
        }
    }
}
