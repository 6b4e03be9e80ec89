//! Catalog service: read side of the directory plus staff writes.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    AuthoredReview, Category, DomainError, DomainResult, RepositoryProvider, Restaurant,
    RestaurantInput, RestaurantQuery,
};
use crate::shared::{PaginatedResult, PaginationParams, DEFAULT_PAGE_SIZE};

/// Number of restaurants shown on the top page
pub const TOP_PAGE_NEWEST: u64 = 6;

#[derive(Debug, Clone)]
pub struct TopPage {
    pub categories: Vec<Category>,
    pub newest: Vec<Restaurant>,
}

#[derive(Debug, Clone)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub category: Option<Category>,
    pub reviews: Vec<AuthoredReview>,
    /// `None` for anonymous viewers
    pub is_favorite: Option<bool>,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn top_page(&self) -> DomainResult<TopPage> {
        Ok(TopPage {
            categories: self.repos.categories().list_all().await?,
            newest: self.repos.restaurants().newest(TOP_PAGE_NEWEST).await?,
        })
    }

    /// One page (1-based) of the filtered listing.
    ///
    /// Page 0, or a page past the last one, is `NotFound`; page 1 of an
    /// empty result is valid.
    pub async fn search(
        &self,
        query: &RestaurantQuery,
        page: u64,
    ) -> DomainResult<PaginatedResult<Restaurant>> {
        let invalid_page = || DomainError::NotFound {
            entity: "Page",
            field: "page",
            value: page.to_string(),
        };
        let params = PaginationParams::new(page, DEFAULT_PAGE_SIZE);
        if params.offset().is_none() {
            return Err(invalid_page());
        }

        let result = self.repos.restaurants().search(query, params).await?;

        if page > 1 && page > result.total_pages {
            return Err(invalid_page());
        }
        Ok(result)
    }

    pub async fn restaurant(&self, id: i32) -> DomainResult<Restaurant> {
        self.repos
            .restaurants()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", id))
    }

    /// Detail view; `viewer` is the requester's account id when signed in.
    pub async fn detail(&self, id: i32, viewer: Option<i32>) -> DomainResult<RestaurantDetail> {
        let restaurant = self.restaurant(id).await?;
        let category = self
            .repos
            .categories()
            .find_by_id(restaurant.category_id)
            .await?;
        let reviews = self.repos.reviews().list_for_restaurant(id).await?;

        let is_favorite = match viewer {
            Some(account_id) => Some(self.repos.favorites().exists(account_id, id).await?),
            None => None,
        };

        Ok(RestaurantDetail {
            restaurant,
            category,
            reviews,
            is_favorite,
        })
    }

    pub async fn categories(&self) -> DomainResult<Vec<Category>> {
        self.repos.categories().list_all().await
    }

    // ── Staff administration ────────────────────────────────────

    pub async fn create_category(&self, name: &str) -> DomainResult<Category> {
        let name = Category::validate_name(name)?;
        let category = self.repos.categories().create(&name).await?;
        info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i32, name: &str) -> DomainResult<Category> {
        let name = Category::validate_name(name)?;
        self.repos
            .categories()
            .update(id, &name)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub async fn delete_category(&self, id: i32) -> DomainResult<()> {
        if !self.repos.categories().delete(id).await? {
            return Err(DomainError::not_found("Category", id));
        }
        info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn check_restaurant_input(&self, input: &RestaurantInput) -> DomainResult<()> {
        input.validate()?;
        if self
            .repos
            .categories()
            .find_by_id(input.category_id)
            .await?
            .is_none()
        {
            return Err(DomainError::Validation(format!(
                "category {} does not exist",
                input.category_id
            )));
        }
        Ok(())
    }

    pub async fn create_restaurant(&self, input: RestaurantInput) -> DomainResult<Restaurant> {
        self.check_restaurant_input(&input).await?;
        let restaurant = self.repos.restaurants().create(input).await?;
        info!(restaurant_id = restaurant.id, "Restaurant created");
        Ok(restaurant)
    }

    pub async fn update_restaurant(
        &self,
        id: i32,
        input: RestaurantInput,
    ) -> DomainResult<Restaurant> {
        self.check_restaurant_input(&input).await?;
        self.repos
            .restaurants()
            .update(id, input)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", id))
    }

    pub async fn delete_restaurant(&self, id: i32) -> DomainResult<()> {
        if !self.repos.restaurants().delete(id).await? {
            return Err(DomainError::not_found("Restaurant", id));
        }
        info!(restaurant_id = id, "Restaurant deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{member, repos_with_shop};

    fn input(category_id: i32) -> RestaurantInput {
        RestaurantInput {
            name: "Atsuta Horaiken".into(),
            image: None,
            description: "Hitsumabushi".into(),
            price_lower: 3000,
            price_upper: 6000,
            opening_time: "11:30-20:30".into(),
            closing_day: "Wednesday".into(),
            address: "Atsuta-ku".into(),
            phone_number: "052-671-8686".into(),
            category_id,
        }
    }

    #[tokio::test]
    async fn page_bounds() {
        let (repos, _) = repos_with_shop().await;
        let svc = CatalogService::new(repos);
        let all = RestaurantQuery::default();

        assert!(matches!(svc.search(&all, 0).await, Err(DomainError::NotFound { .. })));
        assert_eq!(svc.search(&all, 1).await.unwrap().total, 1);
        assert!(matches!(svc.search(&all, 2).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.search(&all, u64::MAX).await, Err(DomainError::NotFound { .. })));

        let none = RestaurantQuery::from_params(Some("no such place"), None, None);
        let empty = svc.search(&none, 1).await.unwrap();
        assert!(empty.items.is_empty());
        assert_eq!(empty.total, 0);
    }

    #[tokio::test]
    async fn anonymous_detail_has_no_favorite_flag() {
        let (repos, shop) = repos_with_shop().await;
        let viewer = member(&repos, "hanako").await;
        let svc = CatalogService::new(repos.clone());

        let anonymous = svc.detail(shop, None).await.unwrap();
        assert_eq!(anonymous.is_favorite, None);
        assert_eq!(anonymous.category.map(|c| c.name).as_deref(), Some("Tonkatsu"));

        assert_eq!(svc.detail(shop, Some(viewer.id)).await.unwrap().is_favorite, Some(false));
        repos.favorites().toggle(viewer.id, shop).await.unwrap();
        assert_eq!(svc.detail(shop, Some(viewer.id)).await.unwrap().is_favorite, Some(true));

        assert!(matches!(svc.detail(shop + 100, None).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn top_page_shows_newest_six() {
        let (repos, _) = repos_with_shop().await;
        let svc = CatalogService::new(repos.clone());
        let cat = svc.create_category("Kissaten").await.unwrap();
        for i in 0..7 {
            let mut i_input = input(cat.id);
            i_input.name = format!("Cafe {}", i);
            svc.create_restaurant(i_input).await.unwrap();
        }

        let top = svc.top_page().await.unwrap();
        assert_eq!(top.categories.len(), 2);
        assert_eq!(top.newest.len(), 6);
        assert_eq!(top.newest[0].name, "Cafe 6");
    }

    #[tokio::test]
    async fn restaurant_writes_are_validated() {
        let (repos, _) = repos_with_shop().await;
        let svc = CatalogService::new(repos);

        let err = svc.create_restaurant(input(999)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let cat = svc.create_category("Unagi").await.unwrap();
        let mut inverted = input(cat.id);
        inverted.price_lower = 9000;
        assert!(matches!(
            svc.create_restaurant(inverted).await,
            Err(DomainError::Validation(_))
        ));

        let created = svc.create_restaurant(input(cat.id)).await.unwrap();
        svc.delete_restaurant(created.id).await.unwrap();
        assert!(matches!(
            svc.delete_restaurant(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(svc.create_category("  ").await.is_err());
    }
}
