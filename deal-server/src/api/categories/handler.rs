//! Category API Handlers

use axum::{Json, extract::State};
use shared::models::CategorySummary;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

/// GET /api/categories - "all" + 8 个分类及各自商品数
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<CategorySummary>>>> {
    ok(state.catalog.category_counts())
}
