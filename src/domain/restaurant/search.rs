//! Typed search predicates for the restaurant listing.
//!
//! Raw query parameters are parsed once into a [`RestaurantQuery`]; the
//! persistence layer folds its filters into a single SQL statement, and
//! [`RestaurantQuery::matches`] / [`RestaurantOrder::compare`] describe the
//! same semantics in memory.

use std::cmp::Ordering;

use super::model::Restaurant;

/// A single filter predicate. All filters of a query must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantFilter {
    /// Case-insensitive substring of the name OR the address.
    Keyword(String),
    /// Exact category id.
    Category(i32),
}

impl RestaurantFilter {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        match self {
            Self::Keyword(keyword) => {
                let needle = keyword.to_lowercase();
                restaurant.name.to_lowercase().contains(&needle)
                    || restaurant.address.to_lowercase().contains(&needle)
            }
            Self::Category(id) => restaurant.category_id == *id,
        }
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestaurantOrder {
    /// Ascending `price_lower`
    PriceAsc,
    /// Descending `price_lower`
    PriceDesc,
    /// Descending creation time
    #[default]
    Newest,
}

impl RestaurantOrder {
    /// `price_asc` / `price_desc`; anything else means newest first.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "",
        }
    }

    /// Total order used by the listing; ties fall back to the id so that
    /// pagination is stable.
    pub fn compare(&self, a: &Restaurant, b: &Restaurant) -> Ordering {
        match self {
            Self::PriceAsc => a
                .price_lower
                .cmp(&b.price_lower)
                .then_with(|| a.id.cmp(&b.id)),
            Self::PriceDesc => b
                .price_lower
                .cmp(&a.price_lower)
                .then_with(|| a.id.cmp(&b.id)),
            Self::Newest => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id)),
        }
    }
}

/// Filters plus ordering for one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestaurantQuery {
    pub filters: Vec<RestaurantFilter>,
    pub order: RestaurantOrder,
}

impl RestaurantQuery {
    /// Build a query from raw listing parameters.
    ///
    /// Blank keywords and blank or non-numeric category ids are ignored.
    pub fn from_params(keyword: Option<&str>, category: Option<&str>, order: Option<&str>) -> Self {
        let mut filters = Vec::new();

        if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
            filters.push(RestaurantFilter::Keyword(keyword.to_string()));
        }

        if let Some(id) = category.and_then(|c| c.trim().parse::<i32>().ok()) {
            filters.push(RestaurantFilter::Category(id));
        }

        Self {
            filters,
            order: RestaurantOrder::from_param(order),
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.filters.iter().find_map(|f| match f {
            RestaurantFilter::Keyword(k) => Some(k.as_str()),
            _ => None,
        })
    }

    pub fn category_id(&self) -> Option<i32> {
        self.filters.iter().find_map(|f| match f {
            RestaurantFilter::Category(id) => Some(*id),
            _ => None,
        })
    }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.filters.iter().all(|f| f.matches(restaurant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn restaurant(id: i32, name: &str, address: &str, category_id: i32, price: u32) -> Restaurant {
        let created = Utc::now() + Duration::seconds(id as i64);
        Restaurant {
            id,
            name: name.into(),
            image: None,
            description: String::new(),
            price_lower: price,
            price_upper: price + 1000,
            opening_time: "11:00-22:00".into(),
            closing_day: "None".into(),
            address: address.into(),
            phone_number: "000".into(),
            category_id,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn keyword_matches_name_or_address_case_insensitively() {
        let filter = RestaurantFilter::Keyword("SAKAE".into());
        assert!(filter.matches(&restaurant(1, "Sakae Grill", "Meieki", 1, 1000)));
        assert!(filter.matches(&restaurant(2, "Grill", "Naka-ku, sakae 3", 1, 1000)));
        assert!(!filter.matches(&restaurant(3, "Grill", "Meieki", 1, 1000)));
    }

    #[test]
    fn blank_params_produce_no_filters() {
        let q = RestaurantQuery::from_params(Some("  "), Some(""), None);
        assert!(q.filters.is_empty());
        assert_eq!(q.order, RestaurantOrder::Newest);
    }

    #[test]
    fn non_numeric_category_is_ignored() {
        let q = RestaurantQuery::from_params(None, Some("abc"), Some("price_asc"));
        assert_eq!(q.category_id(), None);
        assert_eq!(q.order, RestaurantOrder::PriceAsc);
    }

    #[test]
    fn filters_are_conjunctive() {
        let q = RestaurantQuery::from_params(Some("noodle"), Some("2"), None);
        assert_eq!(q.keyword(), Some("noodle"));
        assert_eq!(q.category_id(), Some(2));
        assert!(q.matches(&restaurant(1, "Noodle Bar", "x", 2, 500)));
        assert!(!q.matches(&restaurant(2, "Noodle Bar", "x", 3, 500)));
        assert!(!q.matches(&restaurant(3, "Sushi", "x", 2, 500)));
    }

    #[test]
    fn unknown_order_means_newest() {
        assert_eq!(RestaurantOrder::from_param(Some("rating")), RestaurantOrder::Newest);
        assert_eq!(RestaurantOrder::from_param(None), RestaurantOrder::Newest);
    }

    #[test]
    fn price_desc_orders_by_lower_price() {
        let mut rows = vec![
            restaurant(1, "a", "x", 1, 1000),
            restaurant(2, "b", "x", 1, 2000),
            restaurant(3, "c", "x", 1, 1500),
        ];
        rows.sort_by(|a, b| RestaurantOrder::PriceDesc.compare(a, b));
        let prices: Vec<u32> = rows.iter().map(|r| r.price_lower).collect();
        assert_eq!(prices, vec![2000, 1500, 1000]);
    }

    #[test]
    fn newest_puts_latest_first() {
        let mut rows = vec![
            restaurant(1, "a", "x", 1, 1000),
            restaurant(3, "c", "x", 1, 1000),
            restaurant(2, "b", "x", 1, 1000),
        ];
        rows.sort_by(|a, b| RestaurantOrder::Newest.compare(a, b));
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
