//! Database entities module

pub mod account;
pub mod category;
pub mod favorite;
pub mod reservation;
pub mod restaurant;
pub mod review;

pub use account::Entity as Account;
pub use category::Entity as Category;
pub use favorite::Entity as Favorite;
pub use reservation::Entity as Reservation;
pub use restaurant::Entity as Restaurant;
pub use review::Entity as Review;
