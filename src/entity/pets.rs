use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PetType {
    #[sea_orm(string_value = "Dog")]
    Dog,
    #[sea_orm(string_value = "Cat")]
    Cat,
    #[sea_orm(string_value = "Bird")]
    Bird,
    #[sea_orm(string_value = "Rabbit")]
    Rabbit,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
}

/// Where a pet sits in the adoption pipeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AdoptionStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    /// An application has been submitted and awaits a decision.
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Adopted")]
    Adopted,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub domesticated: bool,
    pub pet_type: PetType,
    pub adoption_status: AdoptionStatus,
    pub image: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shelters::Entity",
        from = "Column::ShelterId",
        to = "super::shelters::Column::Id",
        on_delete = "Cascade"
    )]
    Shelters,
    #[sea_orm(has_many = "super::adoption_applications::Entity")]
    AdoptionApplications,
    #[sea_orm(has_many = "super::favourites::Entity")]
    Favourites,
}

impl Related<super::shelters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelters.def()
    }
}

impl Related<super::adoption_applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionApplications.def()
    }
}

impl Related<super::favourites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favourites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
