//! Membership DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{ReservationForm, SettingsView};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationFormResponse {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    /// Earliest selectable reservation date
    pub earliest_date: NaiveDate,
    pub min_people: u32,
}

impl From<ReservationForm> for ReservationFormResponse {
    fn from(form: ReservationForm) -> Self {
        Self {
            restaurant_id: form.restaurant.id,
            restaurant_name: form.restaurant.name,
            earliest_date: form.earliest_date,
            min_people: form.min_people,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// RFC 3339 timestamp
    pub reservation_date: DateTime<Utc>,
    #[validate(range(
        min = 1,
        max = 2_147_483_647,
        message = "number_of_people must be between 1 and 2147483647"
    ))]
    pub number_of_people: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub is_paid: bool,
    /// `unpaid`, `checkout_pending` or `paid`
    pub membership: String,
    pub has_billing_customer: bool,
}

impl From<SettingsView> for SettingsResponse {
    fn from(view: SettingsView) -> Self {
        Self {
            is_paid: view.is_paid,
            membership: view.state.to_string(),
            has_billing_customer: view.has_billing_customer,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuccessParams {
    /// Checkout session id filled in by the provider
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmationResponse {
    pub is_paid: bool,
}
