use std::{collections::BTreeMap, ops::RangeInclusive};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::{self, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        pagination::{paginate, PageQuery},
    },
    telemetry::CREATED_QUESTIONS_CNTR,
};

use super::{categories::categories_by_id, ApiError, ApiResponse};

const DIFFICULTY: RangeInclusive<i64> = 1..=5;

// forms post category and difficulty as strings, the JSON client as numbers
#[derive(Deserialize)]
struct NewQuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

impl NewQuestionBody {
    fn is_valid(&self) -> bool {
        !self.question.trim().is_empty()
            && !self.answer.trim().is_empty()
            && DIFFICULTY.contains(&self.difficulty)
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    // listing isn't scoped to a category, so there is nothing to report here
    current_category: Option<String>,
}

#[derive(Serialize)]
struct CreatedQuestion {
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct DeletedQuestion {
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPage>> {
    let Query(PageQuery { page }) = query?;

    let questions = get_all_questions(&pool).await?;
    let total_questions = questions.len();
    let current = paginate(questions, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        questions: current,
        total_questions,
        categories: categories_by_id(get_all_categories(&pool).await?),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResponse<Json<CreatedQuestion>> {
    let Json(body) = payload?;
    if !body.is_valid() {
        tracing::warn!(
            "Refusing question with empty text or difficulty {}",
            body.difficulty
        );
        return Err(ApiError::Unprocessable);
    }
    get_category(&pool, body.category)
        .await
        .map_err(ApiError::missing_as_unprocessable)?;

    let id = questions::create_question(
        &pool,
        NewQuestion {
            question: body.question.trim(),
            answer: body.answer.trim(),
            category: body.category,
            difficulty: body.difficulty,
        },
    )
    .await?;
    CREATED_QUESTIONS_CNTR.inc();
    tracing::info!("Created question {id}");

    let all = get_all_questions(&pool).await?;
    Ok(Json(CreatedQuestion {
        created: id,
        total_questions: all.len(),
        questions: paginate(all, 1),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<DeletedQuestion>> {
    let Path(id) = path?;
    questions::delete_question(&pool, id).await?;
    tracing::info!("Deleted question {id}");
    Ok(Json(DeletedQuestion { deleted: id }))
}

async fn search(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<SearchResults>> {
    let Query(PageQuery { page }) = query?;
    let Json(body) = payload?;

    let matches = search_questions(&pool, &body.search_term).await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResults {
        total_questions: matches.len(),
        questions: paginate(matches, page),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(question: &str, answer: &str, difficulty: i64) -> NewQuestionBody {
        NewQuestionBody {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category: 1,
            difficulty,
        }
    }

    #[test]
    fn validation() {
        assert!(body("Who discovered penicillin?", "Alexander Fleming", 3).is_valid());
        assert!(!body("Who discovered penicillin?", "", 3).is_valid());
        assert!(!body("   ", "Alexander Fleming", 3).is_valid());
        assert!(!body("Who discovered penicillin?", "Alexander Fleming", 0).is_valid());
        assert!(!body("Who discovered penicillin?", "Alexander Fleming", 6).is_valid());
    }

    #[test]
    fn numeric_fields_accept_strings() {
        let parsed: NewQuestionBody = serde_json::from_str(
            r#"{"question": "Q?", "answer": "A", "category": "4", "difficulty": 2}"#,
        )
        .unwrap();
        assert_eq!(parsed.category, 4);
        assert_eq!(parsed.difficulty, 2);
    }
}
