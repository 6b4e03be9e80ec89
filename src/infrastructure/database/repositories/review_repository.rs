//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::review::{AuthoredReview, NewReview, Review, ReviewRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{account, review};

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: review::Model) -> Review {
    Review {
        id: m.id,
        restaurant_id: m.restaurant_id,
        account_id: m.account_id,
        score: u8::try_from(m.score).unwrap_or_default(),
        comment: m.comment,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn create(&self, r: NewReview) -> DomainResult<Review> {
        debug!(
            "Saving review: restaurant={} account={} score={}",
            r.restaurant_id, r.account_id, r.score
        );

        let now = Utc::now();
        let model = review::ActiveModel {
            restaurant_id: Set(r.restaurant_id),
            account_id: Set(r.account_id),
            score: Set(i32::from(r.score)),
            comment: Set(r.comment),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model_to_domain(model))
    }

    async fn list_for_restaurant(&self, restaurant_id: i32) -> DomainResult<Vec<AuthoredReview>> {
        let rows = review::Entity::find()
            .filter(review::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .find_also_related(account::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(review, author)| AuthoredReview {
                review: model_to_domain(review),
                author: author.map(|a| a.username).unwrap_or_default(),
            })
            .collect())
    }

    async fn list_for_account(&self, account_id: i32) -> DomainResult<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::AccountId.eq(account_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountRepository, CreateAccountDto};
    use crate::infrastructure::database::repositories::account_repository::SeaOrmAccountRepository;
    use crate::infrastructure::database::test_support::{insert_category, insert_restaurant, setup_db};

    #[tokio::test]
    async fn reviews_are_listed_newest_first_with_author() {
        let db = setup_db().await;
        let cat = insert_category(&db, "Ramen").await;
        let shop = insert_restaurant(&db, "Menya", "Sakae", cat, 900, 0).await;
        let author = SeaOrmAccountRepository::new(db.clone())
            .create(CreateAccountDto {
                username: "hanako".into(),
                email: "hanako@example.com".into(),
                password_hash: "hash".into(),
                is_staff: false,
            })
            .await
            .unwrap();

        let repo = SeaOrmReviewRepository::new(db);
        for (score, comment) in [(3, "ok"), (5, "great")] {
            repo.create(NewReview {
                restaurant_id: shop,
                account_id: author.id,
                score,
                comment: comment.into(),
            })
            .await
            .unwrap();
        }

        let listed = repo.list_for_restaurant(shop).await.unwrap();
        let comments: Vec<&str> = listed.iter().map(|r| r.review.comment.as_str()).collect();
        assert_eq!(comments, vec!["great", "ok"]);
        assert!(listed.iter().all(|r| r.author == "hanako"));
        assert_eq!(listed[0].review.score, 5);

        assert_eq!(repo.list_for_account(author.id).await.unwrap().len(), 2);
        assert!(repo.list_for_restaurant(shop + 1).await.unwrap().is_empty());
    }
}
