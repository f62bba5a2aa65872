use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rough price tier shown next to a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceRange {
    Budget,
    Moderate,
    Upscale,
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            PriceRange::Budget => "$",
            PriceRange::Moderate => "$$",
            PriceRange::Upscale => "$$$",
        };
        write!(f, "{}", symbol)
    }
}

/// A browsable restaurant listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub rating: f64,
    pub price_range: PriceRange,
    pub delivery: bool,
}

impl Restaurant {
    pub fn new(
        name: &str,
        cuisine: &str,
        location: &str,
        rating: f64,
        price_range: PriceRange,
        delivery: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            location: location.to_string(),
            rating,
            price_range,
            delivery,
        }
    }
}

/// Optional, conjunctive search criteria
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub cuisine: Option<String>,
    pub location: Option<String>,
    pub min_rating: Option<f64>,
}

/// In-memory restaurant directory
pub struct RestaurantDirectory {
    restaurants: Vec<Restaurant>,
}

impl RestaurantDirectory {
    pub fn new() -> Self {
        Self {
            restaurants: Vec::new(),
        }
    }

    /// Directory pre-loaded with the demo listings
    pub fn with_sample_listings() -> Self {
        let mut directory = Self::new();
        directory.add(Restaurant::new(
            "Italian Bistro", "Italian", "Downtown", 4.5, PriceRange::Moderate, true,
        ));
        directory.add(Restaurant::new(
            "Sushi House", "Japanese", "Midtown", 4.8, PriceRange::Upscale, false,
        ));
        directory.add(Restaurant::new(
            "Burger King", "Fast Food", "Uptown", 4.0, PriceRange::Budget, true,
        ));
        directory.add(Restaurant::new(
            "Taco Town", "Mexican", "Downtown", 4.2, PriceRange::Budget, true,
        ));
        directory.add(Restaurant::new(
            "Pizza Palace", "Italian", "Uptown", 3.9, PriceRange::Moderate, true,
        ));
        directory
    }

    pub fn add(&mut self, restaurant: Restaurant) {
        self.restaurants.push(restaurant);
    }

    pub fn all(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Case-insensitive match on cuisine
    pub fn search_by_cuisine(&self, cuisine: &str) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| r.cuisine.eq_ignore_ascii_case(cuisine))
            .collect()
    }

    /// Case-insensitive match on location
    pub fn search_by_location(&self, location: &str) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| r.location.eq_ignore_ascii_case(location))
            .collect()
    }

    /// Listings rated at or above the threshold
    pub fn search_by_min_rating(&self, min_rating: f64) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| r.rating >= min_rating)
            .collect()
    }

    /// Apply every present filter; absent filters match everything
    pub fn search(&self, filters: &SearchFilters) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| {
                filters
                    .cuisine
                    .as_deref()
                    .map_or(true, |c| r.cuisine.eq_ignore_ascii_case(c))
            })
            .filter(|r| {
                filters
                    .location
                    .as_deref()
                    .map_or(true, |l| r.location.eq_ignore_ascii_case(l))
            })
            .filter(|r| filters.min_rating.map_or(true, |min| r.rating >= min))
            .collect()
    }
}

impl Default for RestaurantDirectory {
    fn default() -> Self {
        Self::new()
    }
}
