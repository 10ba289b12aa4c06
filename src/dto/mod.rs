pub mod applications;
pub mod auth;
pub mod donations;
pub mod favourites;
pub mod pets;
pub mod shelters;
