use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        applications::{
            ApplicationList, ApplicationStatusUpdate, CreateApplicationRequest,
            UpdateApplicationStatusRequest,
        },
        auth::{RefreshRequest, RegisterAdminRequest, RegisterRequest, TokenPair, TokenRequest},
        donations::{CreateDonationRequest, DonationList},
        favourites::{FavouriteAdded, FavouriteList},
        pets::{CreatePetRequest, PetList, UpdatePetRequest},
        shelters::{
            CreateShelterManagementRequest, CreateShelterRequest, ShelterList,
            UpdateShelterManagementRequest, UpdateShelterRequest,
        },
    },
    entity::{ApplicationStatus, AdoptionStatus, Gender, PetType, UserRole},
    error::ErrorData,
    models::{
        AdopterSummary, AdoptionApplication, Donation, Favourite, Pet, Shelter,
        ShelterManagement, User, UserDetails,
    },
    response::{ApiResponse, Meta},
    routes::{applications, auth, donations, favourites, health, params, pets, shelters},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::register_admin,
        auth::user_details,
        auth::obtain_token,
        auth::refresh_token,
        pets::list_pets,
        pets::create_pet,
        pets::get_pet,
        pets::update_pet,
        pets::delete_pet,
        applications::create_application,
        applications::list_applications,
        applications::admin_list_applications,
        applications::get_application,
        applications::delete_application,
        applications::update_application_status,
        shelters::create_shelter,
        shelters::list_shelters,
        shelters::get_shelter,
        shelters::update_shelter,
        shelters::delete_shelter,
        shelters::create_management,
        shelters::get_management,
        shelters::update_management,
        shelters::delete_management,
        favourites::add_favourite,
        favourites::remove_favourite,
        favourites::list_favourites,
        donations::create_donation,
        donations::get_donation,
        donations::list_donations
    ),
    components(
        schemas(
            User,
            UserDetails,
            UserRole,
            Shelter,
            ShelterManagement,
            Pet,
            PetType,
            Gender,
            AdoptionStatus,
            AdopterSummary,
            AdoptionApplication,
            ApplicationStatus,
            Favourite,
            Donation,
            RegisterRequest,
            RegisterAdminRequest,
            TokenRequest,
            RefreshRequest,
            TokenPair,
            CreatePetRequest,
            UpdatePetRequest,
            PetList,
            CreateApplicationRequest,
            UpdateApplicationStatusRequest,
            ApplicationStatusUpdate,
            ApplicationList,
            CreateShelterRequest,
            UpdateShelterRequest,
            ShelterList,
            CreateShelterManagementRequest,
            UpdateShelterManagementRequest,
            FavouriteAdded,
            FavouriteList,
            CreateDonationRequest,
            DonationList,
            ErrorData,
            params::Pagination,
            params::PetQuery,
            params::ApplicationListQuery,
            Meta,
            ApiResponse<Pet>,
            ApiResponse<PetList>,
            ApiResponse<AdoptionApplication>,
            ApiResponse<ApplicationList>,
            ApiResponse<Donation>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and JWT endpoints"),
        (name = "Pets", description = "Pet catalogue endpoints"),
        (name = "Adoption Applications", description = "Adoption application endpoints"),
        (name = "Shelters", description = "Shelter and shelter management endpoints"),
        (name = "Favourites", description = "Favourite pet endpoints"),
        (name = "Donations", description = "Donation endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
