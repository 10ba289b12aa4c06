pub mod adoption_applications;
pub mod donations;
pub mod favourites;
pub mod pets;
pub mod shelter_managements;
pub mod shelters;
pub mod user_profiles;
pub mod users;

pub use adoption_applications::{ApplicationStatus, Entity as AdoptionApplications};
pub use donations::Entity as Donations;
pub use favourites::Entity as Favourites;
pub use pets::{AdoptionStatus, Entity as Pets, Gender, PetType};
pub use shelter_managements::Entity as ShelterManagements;
pub use shelters::Entity as Shelters;
pub use user_profiles::Entity as UserProfiles;
pub use users::{Entity as Users, UserRole};
