//! Engagement service: review posting and favorite toggling.

use std::sync::Arc;

use tracing::info;

use crate::domain::review::{score_label, DEFAULT_SCORE, MAX_SCORE, MIN_SCORE};
use crate::domain::{
    DomainError, DomainResult, FavoriteToggle, NewReview, RepositoryProvider, Restaurant, Review,
};

/// Context of the review form
#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub restaurant: Restaurant,
    /// `(score, label)` pairs from 1 to 5
    pub score_choices: Vec<(u8, String)>,
    pub default_score: u8,
}

pub struct EngagementService {
    repos: Arc<dyn RepositoryProvider>,
}

impl EngagementService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn restaurant(&self, id: i32) -> DomainResult<Restaurant> {
        self.repos
            .restaurants()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", id))
    }

    pub async fn review_form(&self, restaurant_id: i32) -> DomainResult<ReviewForm> {
        Ok(ReviewForm {
            restaurant: self.restaurant(restaurant_id).await?,
            score_choices: (MIN_SCORE..=MAX_SCORE).map(|s| (s, score_label(s))).collect(),
            default_score: DEFAULT_SCORE,
        })
    }

    /// Post a review as `account_id`; a missing score means the default.
    pub async fn create_review(
        &self,
        account_id: i32,
        restaurant_id: i32,
        score: Option<u8>,
        comment: String,
    ) -> DomainResult<Review> {
        let score = score.unwrap_or(DEFAULT_SCORE);
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(DomainError::Validation(format!(
                "score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }
        if comment.trim().is_empty() {
            return Err(DomainError::Validation("comment must not be empty".into()));
        }
        self.restaurant(restaurant_id).await?;

        let review = self
            .repos
            .reviews()
            .create(NewReview {
                restaurant_id,
                account_id,
                score,
                comment,
            })
            .await?;

        info!(review_id = review.id, restaurant_id, account_id, "Review posted");
        Ok(review)
    }

    /// Flip the requester's favorite for a restaurant.
    pub async fn toggle_favorite(
        &self,
        account_id: i32,
        restaurant_id: i32,
    ) -> DomainResult<FavoriteToggle> {
        self.restaurant(restaurant_id).await?;

        let outcome = self
            .repos
            .favorites()
            .toggle(account_id, restaurant_id)
            .await?;

        metrics::counter!("favorite_toggles_total", "action" => outcome.as_str()).increment(1);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{member, repos_with_shop};

    #[tokio::test]
    async fn review_defaults_to_three_stars() {
        let (repos, shop) = repos_with_shop().await;
        let author = member(&repos, "hanako").await;
        let svc = EngagementService::new(repos);

        let review = svc
            .create_review(author.id, shop, None, "Crispy miso katsu".into())
            .await
            .unwrap();
        assert_eq!(review.score, 3);

        let form = svc.review_form(shop).await.unwrap();
        assert_eq!(form.score_choices.len(), 5);
        assert_eq!(form.score_choices[4], (5, "★★★★★".to_string()));
    }

    #[tokio::test]
    async fn review_input_is_checked() {
        let (repos, shop) = repos_with_shop().await;
        let author = member(&repos, "hanako").await;
        let svc = EngagementService::new(repos);

        for score in [0, 6] {
            assert!(matches!(
                svc.create_review(author.id, shop, Some(score), "ok".into()).await,
                Err(DomainError::Validation(_))
            ));
        }
        assert!(matches!(
            svc.create_review(author.id, shop, Some(4), "  ".into()).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create_review(author.id, shop + 1, Some(4), "ok".into()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn toggling_twice_restores_state() {
        let (repos, shop) = repos_with_shop().await;
        let viewer = member(&repos, "taro").await;
        let svc = EngagementService::new(repos.clone());

        assert_eq!(svc.toggle_favorite(viewer.id, shop).await.unwrap(), FavoriteToggle::Added);
        assert_eq!(repos.favorites().list_for_account(viewer.id).await.unwrap().len(), 1);
        assert_eq!(svc.toggle_favorite(viewer.id, shop).await.unwrap(), FavoriteToggle::Removed);
        assert!(!repos.favorites().exists(viewer.id, shop).await.unwrap());
    }

    #[tokio::test]
    async fn toggling_unknown_restaurant_is_not_found() {
        let (repos, shop) = repos_with_shop().await;
        let viewer = member(&repos, "taro").await;
        let svc = EngagementService::new(repos);
        assert!(matches!(
            svc.toggle_favorite(viewer.id, shop + 1).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
