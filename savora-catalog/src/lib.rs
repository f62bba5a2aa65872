pub mod menu;
pub mod restaurant;

pub use menu::{MenuItem, MenuProvider, RestaurantMenu};
pub use restaurant::{PriceRange, Restaurant, RestaurantDirectory, SearchFilters};
