use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category,
            questions::{get_all_questions, get_questions_for_category},
        },
        Question,
    },
    server::{
        app::AppState,
        quiz::{pick_unseen, ALL_CATEGORIES},
    },
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// the client also sends a `type` label here, only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct NextQuestion {
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<Json<NextQuestion>> {
    // any body the quiz can't read is unprocessable, syntax errors included
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!("Rejected quiz body: {}", rejection.body_text());
        ApiError::Unprocessable
    })?;

    let candidates = match body.quiz_category.id {
        ALL_CATEGORIES => get_all_questions(&pool).await?,
        id => {
            get_category(&pool, id)
                .await
                .map_err(ApiError::missing_as_unprocessable)?;
            get_questions_for_category(&pool, id).await?
        }
    };

    let previous: HashSet<i64> = body.previous_questions.into_iter().collect();
    let question = pick_unseen(candidates, &previous, &mut rand::thread_rng());

    match &question {
        Some(q) => {
            let label = match body.quiz_category.id {
                ALL_CATEGORIES => "all".to_owned(),
                id => id.to_string(),
            };
            QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
            tracing::debug!("Serving quiz question {}", q.id);
        }
        None => tracing::info!(
            "No unseen questions left for category {}",
            body.quiz_category.id
        ),
    }

    Ok(Json(NextQuestion { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
