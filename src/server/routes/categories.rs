use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Category, Question,
    },
    server::{
        app::AppState,
        pagination::{paginate, PageQuery},
    },
};

use super::{ApiError, ApiResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

pub(super) fn categories_by_id(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        categories: categories_by_id(categories),
    }))
}

async fn questions_in_category(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let Path(id) = path?;
    let Query(PageQuery { page }) = query?;

    let category = get_category(&pool, id).await?;
    let questions = get_questions_for_category(&pool, id).await?;

    Ok(Json(CategoryQuestions {
        total_questions: questions.len(),
        questions: paginate(questions, page),
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_in_category))
        .with_state(state)
}
