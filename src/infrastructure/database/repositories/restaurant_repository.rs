//! SeaORM implementation of RestaurantRepository
//!
//! Every filter of a [`RestaurantQuery`] becomes one condition of a single
//! SELECT; the total is counted over the same filtered statement.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::db_err;
use crate::domain::restaurant::{
    Restaurant, RestaurantFilter, RestaurantInput, RestaurantOrder, RestaurantQuery,
    RestaurantRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::restaurant;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmRestaurantRepository {
    db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn price_to_domain(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn model_to_domain(m: restaurant::Model) -> Restaurant {
    Restaurant {
        id: m.id,
        name: m.name,
        image: m.image,
        description: m.description,
        price_lower: price_to_domain(m.price_lower),
        price_upper: price_to_domain(m.price_upper),
        opening_time: m.opening_time,
        closing_day: m.closing_day,
        address: m.address,
        phone_number: m.phone_number,
        category_id: m.category_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn apply_input(active: &mut restaurant::ActiveModel, input: RestaurantInput) {
    active.name = Set(input.name);
    active.image = Set(input.image);
    active.description = Set(input.description);
    active.price_lower = Set(i64::from(input.price_lower));
    active.price_upper = Set(i64::from(input.price_upper));
    active.opening_time = Set(input.opening_time);
    active.closing_day = Set(input.closing_day);
    active.address = Set(input.address);
    active.phone_number = Set(input.phone_number);
    active.category_id = Set(input.category_id);
}

// ── Query building ──────────────────────────────────────────────

/// Escape LIKE wildcards so the keyword is matched literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn lower_like(column: restaurant::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((restaurant::Entity, column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn filter_condition(filter: &RestaurantFilter) -> Condition {
    match filter {
        RestaurantFilter::Keyword(keyword) => {
            let pattern = format!("%{}%", escape_like(&keyword.to_lowercase()));
            Condition::any()
                .add(lower_like(restaurant::Column::Name, &pattern))
                .add(lower_like(restaurant::Column::Address, &pattern))
        }
        RestaurantFilter::Category(id) => {
            Condition::all().add(restaurant::Column::CategoryId.eq(*id))
        }
    }
}

fn filtered(query: &RestaurantQuery) -> Select<restaurant::Entity> {
    let condition = query
        .filters
        .iter()
        .fold(Condition::all(), |acc, f| acc.add(filter_condition(f)));
    restaurant::Entity::find().filter(condition)
}

fn ordered(select: Select<restaurant::Entity>, order: RestaurantOrder) -> Select<restaurant::Entity> {
    match order {
        RestaurantOrder::PriceAsc => select
            .order_by_asc(restaurant::Column::PriceLower)
            .order_by_asc(restaurant::Column::Id),
        RestaurantOrder::PriceDesc => select
            .order_by_desc(restaurant::Column::PriceLower)
            .order_by_asc(restaurant::Column::Id),
        RestaurantOrder::Newest => select
            .order_by_desc(restaurant::Column::CreatedAt)
            .order_by_desc(restaurant::Column::Id),
    }
}

// ── RestaurantRepository impl ───────────────────────────────────

#[async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn search(
        &self,
        query: &RestaurantQuery,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Restaurant>> {
        debug!(
            "Searching restaurants: filters={:?} order={:?} page={}",
            query.filters, query.order, page.page
        );

        let offset = page.offset().ok_or_else(|| {
            DomainError::Validation(format!("page {} is out of range", page.page))
        })?;

        let select = filtered(query);
        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let models = ordered(select, query.order)
            .offset(offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn newest(&self, limit: u64) -> DomainResult<Vec<Restaurant>> {
        let models = ordered(restaurant::Entity::find(), RestaurantOrder::Newest)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>> {
        let model = restaurant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Restaurant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = restaurant::Entity::find()
            .filter(restaurant::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, input: RestaurantInput) -> DomainResult<Restaurant> {
        debug!("Creating restaurant: {}", input.name);

        let now = Utc::now();
        let mut active = restaurant::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_input(&mut active, input);

        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, id: i32, input: RestaurantInput) -> DomainResult<Option<Restaurant>> {
        debug!("Updating restaurant: {}", id);

        let Some(existing) = restaurant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: restaurant::ActiveModel = existing.into();
        apply_input(&mut active, input);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(model)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        debug!("Deleting restaurant: {}", id);

        let result = restaurant::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{insert_category, insert_restaurant, setup_db};
    use crate::shared::DEFAULT_PAGE_SIZE;

    async fn seeded() -> (SeaOrmRestaurantRepository, i32, i32) {
        let db = setup_db().await;
        let ramen = insert_category(&db, "Ramen").await;
        let sushi = insert_category(&db, "Sushi").await;

        insert_restaurant(&db, "Menya Sakae", "Naka-ku", ramen, 900, 50).await;
        insert_restaurant(&db, "Kura", "Sakae 3-chome", sushi, 1500, 40).await;
        insert_restaurant(&db, "Hokkai Sushi", "Meieki", sushi, 3000, 30).await;
        insert_restaurant(&db, "Ramen 100%", "Osu", ramen, 700, 20).await;
        insert_restaurant(&db, "Tonkotsu_Bar", "Fushimi", ramen, 1100, 10).await;

        (SeaOrmRestaurantRepository::new(db), ramen, sushi)
    }

    async fn everything(repo: &SeaOrmRestaurantRepository) -> Vec<Restaurant> {
        repo.search(&RestaurantQuery::default(), PaginationParams::new(1, 100))
            .await
            .unwrap()
            .items
    }

    #[tokio::test]
    async fn search_agrees_with_in_memory_predicates() {
        let (repo, ramen, sushi) = seeded().await;
        let all = everything(&repo).await;
        assert_eq!(all.len(), 5);

        let ramen_id = ramen.to_string();
        let sushi_id = sushi.to_string();
        let cases = [
            (Some("sakae"), None, Some("price_asc")),
            (Some("SAKAE"), Some(sushi_id.as_str()), None),
            (None, Some(ramen_id.as_str()), Some("price_desc")),
            (Some("sushi"), None, None),
            (Some("100%"), None, None),
            (Some("_"), None, None),
            (Some("nothing-here"), None, None),
        ];

        for (keyword, category, order) in cases {
            let query = RestaurantQuery::from_params(keyword, category, order);
            let page = repo.search(&query, PaginationParams::new(1, 100)).await.unwrap();

            let mut expected: Vec<Restaurant> =
                all.iter().filter(|r| query.matches(r)).cloned().collect();
            expected.sort_by(|a, b| query.order.compare(a, b));

            let got: Vec<i32> = page.items.iter().map(|r| r.id).collect();
            let want: Vec<i32> = expected.iter().map(|r| r.id).collect();
            assert_eq!(got, want, "keyword={:?} category={:?} order={:?}", keyword, category, order);
            assert_eq!(page.total, want.len() as u64);
        }
    }

    #[tokio::test]
    async fn like_wildcards_in_keyword_are_literal() {
        let (repo, _, _) = seeded().await;

        let query = RestaurantQuery::from_params(Some("100%"), None, None);
        let page = repo.search(&query, PaginationParams::new(1, 10)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Ramen 100%");

        let query = RestaurantQuery::from_params(Some("_"), None, None);
        let page = repo.search(&query, PaginationParams::new(1, 10)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Tonkotsu_Bar");
    }

    #[tokio::test]
    async fn price_desc_orders_by_lower_price() {
        let db = setup_db().await;
        let cat = insert_category(&db, "Cafe").await;
        insert_restaurant(&db, "A", "x", cat, 1000, 3).await;
        insert_restaurant(&db, "B", "x", cat, 2000, 2).await;
        insert_restaurant(&db, "C", "x", cat, 1500, 1).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        let query = RestaurantQuery::from_params(None, None, Some("price_desc"));
        let page = repo.search(&query, PaginationParams::new(1, 10)).await.unwrap();
        let prices: Vec<u32> = page.items.iter().map(|r| r.price_lower).collect();
        assert_eq!(prices, vec![2000, 1500, 1000]);
    }

    #[tokio::test]
    async fn pages_split_results_and_report_total() {
        let db = setup_db().await;
        let cat = insert_category(&db, "Cafe").await;
        for i in 0..23 {
            insert_restaurant(&db, &format!("Cafe {}", i), "Sakae", cat, 500, 100 - i).await;
        }
        let repo = SeaOrmRestaurantRepository::new(db);
        let query = RestaurantQuery::default();

        let first = repo
            .search(&query, PaginationParams::new(1, DEFAULT_PAGE_SIZE))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 23);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items[0].name, "Cafe 22");

        let last = repo
            .search(&query, PaginationParams::new(3, DEFAULT_PAGE_SIZE))
            .await
            .unwrap();
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[2].name, "Cafe 0");
    }

    #[tokio::test]
    async fn newest_is_limited_and_latest_first() {
        let (repo, _, _) = seeded().await;
        let names: Vec<String> = repo
            .newest(2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Tonkotsu_Bar", "Ramen 100%"]);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let (repo, ramen, _) = seeded().await;
        let target = everything(&repo).await.remove(0);

        let input = RestaurantInput {
            name: "Renamed".into(),
            image: Some("restaurants/renamed.jpg".into()),
            description: target.description.clone(),
            price_lower: 1200,
            price_upper: 2400,
            opening_time: target.opening_time.clone(),
            closing_day: target.closing_day.clone(),
            address: target.address.clone(),
            phone_number: target.phone_number.clone(),
            category_id: ramen,
        };
        let updated = repo.update(target.id, input).await.unwrap().unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.price_upper, 2400);
        assert_eq!(updated.created_at, target.created_at);

        assert!(repo.delete(target.id).await.unwrap());
        assert!(repo.find_by_id(target.id).await.unwrap().is_none());
    }
}
