//! Feedback DTOs

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    pub user_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub risk_type: String,
    #[validate(length(min = 1, max = 50))]
    pub severity: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ListFeedbackParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
