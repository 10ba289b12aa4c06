pub mod application_service;
pub mod auth_service;
pub mod donation_service;
pub mod favourite_service;
pub mod pet_service;
pub mod shelter_service;
