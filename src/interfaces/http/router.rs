//! HTTP router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AccountService, CatalogService, EngagementService, MembershipService, TokenRevocations,
};
use crate::domain::{BillingProvider, RepositoryProvider};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::middleware::{
    optional_auth, require_login, require_paid_member, require_staff, AuthState,
};

use super::modules::{
    accounts, admin, catalog, engagement, health, membership,
    metrics::{http_metrics_middleware, prometheus_metrics, MetricsState},
    request_id::request_id_middleware,
};

/// Application services shared by all route groups
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub engagement: Arc<EngagementService>,
    pub accounts: Arc<AccountService>,
    pub membership: Arc<MembershipService>,
}

impl AppServices {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        billing: Arc<dyn BillingProvider>,
        public_url: &str,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(repos.clone())),
            engagement: Arc::new(EngagementService::new(repos.clone())),
            accounts: Arc::new(AccountService::new(
                repos.clone(),
                jwt_config,
                TokenRevocations::new(),
            )),
            membership: Arc::new(MembershipService::new(repos, billing, public_url)),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::top_page,
        catalog::list_restaurants,
        catalog::restaurant_detail,
        engagement::review_form,
        engagement::create_review,
        engagement::toggle_favorite,
        accounts::signup_form,
        accounts::signup,
        accounts::login_form,
        accounts::login,
        accounts::logout,
        accounts::my_page,
        accounts::profile_form,
        accounts::update_profile,
        membership::reservation_form,
        membership::create_reservation,
        membership::settings,
        membership::checkout,
        membership::checkout_success,
        membership::portal,
        admin::create_category,
        admin::update_category,
        admin::delete_category,
        admin::create_restaurant,
        admin::update_restaurant,
        admin::delete_restaurant,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ComponentHealth,
            catalog::CategoryDto,
            catalog::RestaurantDto,
            catalog::ReviewDto,
            catalog::TopPageResponse,
            catalog::RestaurantListResponse,
            catalog::RestaurantDetailResponse,
            engagement::ScoreChoice,
            engagement::ReviewFormResponse,
            engagement::CreateReviewRequest,
            accounts::AccountDto,
            accounts::SignupFormResponse,
            accounts::SignupRequest,
            accounts::LoginFormResponse,
            accounts::LoginRequest,
            accounts::LoginResponse,
            accounts::ProfileFormResponse,
            accounts::UpdateProfileRequest,
            accounts::MyPageResponse,
            membership::ReservationFormResponse,
            membership::CreateReservationRequest,
            membership::SettingsResponse,
            membership::ConfirmationResponse,
            admin::CategoryRequest,
            admin::RestaurantRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Catalog", description = "Top page, restaurant search and detail"),
        (name = "Engagement", description = "Reviews and favorites"),
        (name = "Accounts", description = "Signup, login/logout, profile and my page"),
        (name = "Reservations", description = "Reservations (paid members only)"),
        (name = "Membership", description = "Paid membership via the billing provider"),
        (name = "Admin", description = "Catalog administration (staff only)"),
    ),
    info(
        title = "Dining Service API",
        version = "0.1.0",
        description = "Restaurant directory with reviews, favorites and member-only reservations"
    )
)]
pub struct ApiDoc;

/// Build the application router.
pub fn create_api_router(
    services: AppServices,
    db: DatabaseConnection,
    metrics_handle: PrometheusHandle,
) -> Router {
    let auth = AuthState {
        accounts: services.accounts.clone(),
        membership: services.membership.clone(),
    };

    let catalog_state = catalog::CatalogState {
        catalog: services.catalog.clone(),
    };

    // Public catalog
    let catalog_routes = Router::new()
        .route("/", get(catalog::top_page))
        .route("/list", get(catalog::list_restaurants))
        .with_state(catalog_state.clone());

    // Detail: the requester is optional
    let detail_routes = Router::new()
        .route("/restaurant/{id}", get(catalog::restaurant_detail))
        .layer(middleware::from_fn_with_state(auth.clone(), optional_auth))
        .with_state(catalog_state);

    // Reviews and favorites (login)
    let engagement_routes = Router::new()
        .route(
            "/restaurant/{id}/review",
            get(engagement::review_form).post(engagement::create_review),
        )
        .route("/restaurant/{id}/favorite", post(engagement::toggle_favorite))
        .layer(middleware::from_fn_with_state(auth.clone(), require_login))
        .with_state(engagement::EngagementState {
            engagement: services.engagement.clone(),
        });

    let membership_state = membership::MembershipHandlerState {
        membership: services.membership.clone(),
    };

    // Reservations (login + paid membership)
    let reservation_routes = Router::new()
        .route(
            "/restaurant/{id}/reservations",
            get(membership::reservation_form).post(membership::create_reservation),
        )
        .layer(middleware::from_fn_with_state(auth.clone(), require_paid_member))
        .layer(middleware::from_fn_with_state(auth.clone(), require_login))
        .with_state(membership_state.clone());

    // Billing bridge (login)
    let billing_routes = Router::new()
        .route("/settings", get(membership::settings))
        .route("/checkout", post(membership::checkout))
        .route("/success", get(membership::checkout_success))
        .route("/portal", post(membership::portal))
        .layer(middleware::from_fn_with_state(auth.clone(), require_login))
        .with_state(membership_state);

    let accounts_state = accounts::AccountsState {
        accounts: services.accounts.clone(),
    };

    // Signup / login (public)
    let account_routes = Router::new()
        .route("/signup", get(accounts::signup_form).post(accounts::signup))
        .route("/login", get(accounts::login_form).post(accounts::login))
        .with_state(accounts_state.clone());

    // Own account (login)
    let account_protected_routes = Router::new()
        .route("/logout", post(accounts::logout))
        .route("/mypage", get(accounts::my_page))
        .route(
            "/mypage/edit",
            get(accounts::profile_form).post(accounts::update_profile),
        )
        .layer(middleware::from_fn_with_state(auth.clone(), require_login))
        .with_state(accounts_state);

    // Catalog administration (staff)
    let admin_routes = Router::new()
        .route("/admin/categories", post(admin::create_category))
        .route(
            "/admin/categories/{id}",
            put(admin::update_category).delete(admin::delete_category),
        )
        .route("/admin/restaurants", post(admin::create_restaurant))
        .route(
            "/admin/restaurants/{id}",
            put(admin::update_restaurant).delete(admin::delete_restaurant),
        )
        .layer(middleware::from_fn(require_staff))
        .layer(middleware::from_fn_with_state(auth, require_login))
        .with_state(admin::AdminState {
            catalog: services.catalog,
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: metrics_handle,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(catalog_routes)
        .merge(detail_routes)
        .merge(engagement_routes)
        .merge(reservation_routes)
        .merge(billing_routes)
        .merge(account_routes)
        .merge(account_protected_routes)
        .merge(admin_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::test_support::{member, paid_member, staff, FakeBilling, TEST_PASSWORD};
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_support::{
        insert_category, insert_restaurant, setup_db,
    };

    struct TestApp {
        router: Router,
        repos: Arc<dyn RepositoryProvider>,
        services: AppServices,
        billing: Arc<FakeBilling>,
        shop: i32,
    }

    async fn app() -> TestApp {
        let db = setup_db().await;
        let cat = insert_category(&db, "Tonkatsu").await;
        let shop = insert_restaurant(&db, "Yabaton", "Osu, Naka-ku", cat, 1200, 0).await;
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let billing = Arc::new(FakeBilling::default());
        let services = AppServices::new(
            repos.clone(),
            JwtConfig::default(),
            billing.clone(),
            "http://localhost:8080",
        );
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let router = create_api_router(services.clone(), db, handle);

        TestApp {
            router,
            repos,
            services,
            billing,
            shop,
        }
    }

    impl TestApp {
        async fn token(&self, username: &str) -> String {
            self.services
                .accounts
                .login(username, TEST_PASSWORD)
                .await
                .unwrap()
                .token
        }

        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn anonymous_detail_has_no_favorite_flag() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;
        let uri = format!("/restaurant/{}", app.shop);

        let anonymous = json_body(app.send(request("GET", &uri, None, None)).await).await;
        assert_eq!(anonymous["data"]["restaurant"]["name"], "Yabaton");
        assert!(anonymous["data"].get("is_favorite").is_none());

        let signed_in = json_body(app.send(request("GET", &uri, Some(&token), None)).await).await;
        assert_eq!(signed_in["data"]["is_favorite"], false);
    }

    #[tokio::test]
    async fn unknown_restaurant_is_404() {
        let app = app().await;
        let response = app.send(request("GET", "/restaurant/999", None, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn login_only_route_redirects_anonymous_requests() {
        let app = app().await;
        let uri = format!("/restaurant/{}/review", app.shop);

        let response = app
            .send(request("POST", &uri, None, Some(json!({"comment": "good"}))))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            format!("/login?next=%2Frestaurant%2F{}%2Freview", app.shop)
        );
    }

    #[tokio::test]
    async fn login_redirect_keeps_the_checkout_session_id() {
        let app = app().await;

        let response = app
            .send(request("GET", "/success?session_id=cs_1", None, None))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/login?next=%2Fsuccess%3Fsession_id%3Dcs_1"
        );

        member(&app.repos, "hanako").await;
        let login = json_body(
            app.send(request(
                "POST",
                location(&response),
                None,
                Some(json!({"username": "hanako", "password": TEST_PASSWORD})),
            ))
            .await,
        )
        .await;
        assert_eq!(login["data"]["next"], "/success?session_id=cs_1");
    }

    #[tokio::test]
    async fn unpaid_member_is_sent_to_settings() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;
        let uri = format!("/restaurant/{}/reservations", app.shop);

        let body = json!({"reservation_date": "2031-05-01T18:00:00Z", "number_of_people": 2});
        let response = app.send(request("POST", &uri, Some(&token), Some(body))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/settings");

        let form = app.send(request("GET", &uri, Some(&token), None)).await;
        assert_eq!(location(&form), "/settings");

        assert_eq!(
            app.repos.reservations().count_for_restaurant(app.shop).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn paid_member_can_reserve() {
        let app = app().await;
        paid_member(&app.repos).await;
        let token = app.token("paid").await;
        let uri = format!("/restaurant/{}/reservations", app.shop);

        let form = json_body(app.send(request("GET", &uri, Some(&token), None)).await).await;
        assert_eq!(form["data"]["earliest_date"], "2023-01-01");

        let body = json!({"reservation_date": "2031-05-01T18:00:00Z", "number_of_people": 2});
        let response = app.send(request("POST", &uri, Some(&token), Some(body))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(
            app.repos.reservations().count_for_restaurant(app.shop).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn party_size_out_of_range_is_rejected() {
        let app = app().await;
        paid_member(&app.repos).await;
        let token = app.token("paid").await;
        let uri = format!("/restaurant/{}/reservations", app.shop);

        for people in [0u64, 2_147_483_648] {
            let body = json!({"reservation_date": "2031-05-01T18:00:00Z", "number_of_people": people});
            let response = app.send(request("POST", &uri, Some(&token), Some(body))).await;
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", people);
        }
        assert_eq!(app.repos.reservations().count_for_restaurant(app.shop).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn favorite_toggle_redirects_back_and_flips() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;
        let detail = format!("/restaurant/{}", app.shop);
        let toggle = format!("{}/favorite", detail);

        let response = app.send(request("POST", &toggle, Some(&token), None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), detail);

        let body = json_body(app.send(request("GET", &detail, Some(&token), None)).await).await;
        assert_eq!(body["data"]["is_favorite"], true);

        app.send(request("POST", &toggle, Some(&token), None)).await;
        let body = json_body(app.send(request("GET", &detail, Some(&token), None)).await).await;
        assert_eq!(body["data"]["is_favorite"], false);
    }

    #[tokio::test]
    async fn review_is_listed_on_detail() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;
        let uri = format!("/restaurant/{}/review", app.shop);

        let form = json_body(app.send(request("GET", &uri, Some(&token), None)).await).await;
        assert_eq!(form["data"]["default_score"], 3);
        assert_eq!(form["data"]["score_choices"].as_array().unwrap().len(), 5);

        let response = app
            .send(request("POST", &uri, Some(&token), Some(json!({"score": 5, "comment": "Crispy"}))))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let detail = format!("/restaurant/{}", app.shop);
        let body = json_body(app.send(request("GET", &detail, None, None)).await).await;
        assert_eq!(body["data"]["reviews"][0]["author"], "hanako");
        assert_eq!(body["data"]["reviews"][0]["score"], 5);
    }

    #[tokio::test]
    async fn list_orders_by_price_desc() {
        let app = app().await;
        let token = {
            staff(&app.repos).await;
            app.token("staff").await
        };
        let cat = app.services.catalog.categories().await.unwrap()[0].id;
        for price in [1000, 2000, 1500] {
            let body = json!({
                "name": format!("Shop {}", price),
                "price_lower": price,
                "price_upper": price + 500,
                "address": "Sakae",
                "category_id": cat,
            });
            let response = app
                .send(request("POST", "/admin/restaurants", Some(&token), Some(body)))
                .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let body = json_body(
            app.send(request("GET", "/list?keyword=sakae&order=price_desc", None, None))
                .await,
        )
        .await;
        let prices: Vec<u64> = body["data"]["restaurants"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["price_lower"].as_u64().unwrap())
            .collect();
        assert_eq!(prices, vec![2000, 1500, 1000]);
        assert_eq!(body["data"]["keyword"], "sakae");
        assert_eq!(body["data"]["order"], "price_desc");
    }

    #[tokio::test]
    async fn page_past_the_end_is_404() {
        let app = app().await;
        let response = app.send(request("GET", "/list?page=2", None, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = app.send(request("GET", "/list?page=1", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_page_numbers_are_404() {
        let app = app().await;
        for uri in ["/list?page=18446744073709551615", "/list?page=1000000000000000000"] {
            let response = app.send(request("GET", uri, None, None)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn admin_routes_require_staff() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;

        let response = app
            .send(request("POST", "/admin/categories", Some(&token), Some(json!({"name": "Ramen"}))))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn signup_login_logout_flow() {
        let app = app().await;
        let body = json!({
            "username": "taro",
            "email": "taro@example.com",
            "password": "tebasaki-7",
            "password_confirmation": "tebasaki-7",
        });
        let response = app.send(request("POST", "/signup", None, Some(body))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let login = json_body(
            app.send(request(
                "POST",
                "/login?next=/mypage",
                None,
                Some(json!({"username": "taro@example.com", "password": "tebasaki-7"})),
            ))
            .await,
        )
        .await;
        assert_eq!(login["data"]["next"], "/mypage");
        assert_eq!(login["data"]["account"]["is_paid"], false);
        let token = login["data"]["token"].as_str().unwrap().to_string();

        let mypage = app.send(request("GET", "/mypage", Some(&token), None)).await;
        assert_eq!(mypage.status(), StatusCode::OK);

        let response = app.send(request("POST", "/logout", Some(&token), None)).await;
        assert_eq!(location(&response), "/");

        let after = app.send(request("GET", "/mypage", Some(&token), None)).await;
        assert_eq!(after.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&after), "/login?next=/mypage");
    }

    #[tokio::test]
    async fn signup_rejects_mismatched_passwords() {
        let app = app().await;
        let body = json!({
            "username": "taro",
            "email": "taro@example.com",
            "password": "tebasaki-7",
            "password_confirmation": "tebasaki-8",
        });
        let response = app.send(request("POST", "/signup", None, Some(body))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn success_without_session_id_is_400() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;

        let response = app.send(request("GET", "/success", Some(&token), None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn completed_checkout_unlocks_reservations() {
        let app = app().await;
        let account = member(&app.repos, "hanako").await;
        app.billing.complete("cs_1", account.id, "cus_1");
        let token = app.token("hanako").await;

        let response = app.send(request("POST", "/checkout", Some(&token), None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "https://checkout.example/cs_new");

        let confirmed = app
            .send(request("GET", "/success?session_id=cs_1", Some(&token), None))
            .await;
        assert_eq!(confirmed.status(), StatusCode::OK);
        assert_eq!(json_body(confirmed).await["data"]["is_paid"], true);

        let settings = json_body(app.send(request("GET", "/settings", Some(&token), None)).await).await;
        assert_eq!(settings["data"]["membership"], "paid");
        assert_eq!(settings["data"]["has_billing_customer"], true);

        let uri = format!("/restaurant/{}/reservations", app.shop);
        let body = json!({"reservation_date": "2031-05-01T18:00:00Z", "number_of_people": 4});
        let response = app.send(request("POST", &uri, Some(&token), Some(body))).await;
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn portal_without_customer_goes_to_settings() {
        let app = app().await;
        member(&app.repos, "hanako").await;
        let token = app.token("hanako").await;

        let response = app.send(request("POST", "/portal", Some(&token), None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/settings");
    }

    #[tokio::test]
    async fn health_reports_database() {
        let app = app().await;
        let response = app.send(request("GET", "/health", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(json_body(response).await["database"]["status"], "ok");
    }
}
