use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub struct NewQuestion<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

// sqlite's lower() only folds ASCII, so the match runs on Rust's Unicode lowercase
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    Ok(get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect())
}

pub async fn create_question(pool: &SqlitePool, new: NewQuestion<'_>) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(new.question)
    .bind(new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_question_by_id(pool, id).await?;
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{in_memory, run_migrations};

    async fn seeded() -> SqlitePool {
        let pool = in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        for (question, answer, category) in [
            ("What is the heaviest organ in the human body?", "The Liver", 1),
            ("Who discovered penicillin?", "Alexander Fleming", 1),
            ("What is the largest lake in Africa?", "Lake Victoria", 3),
            ("Is 100% the same as 1?", "Yes", 1),
            ("Which ÉCOLE trained Henri Poincaré?", "École Polytechnique", 4),
        ] {
            create_question(
                &pool,
                NewQuestion {
                    question,
                    answer,
                    category,
                    difficulty: 2,
                },
            )
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let pool = seeded().await;
        let found = search_questions(&pool, "WHO DISC").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].answer, "Alexander Fleming");
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = seeded().await;
        assert_eq!(search_questions(&pool, "_").await.unwrap().len(), 0);
        assert_eq!(search_questions(&pool, "100%").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = seeded().await;
        let found = search_questions(&pool, "école").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].answer, "École Polytechnique");
        assert_eq!(search_questions(&pool, "POINCARÉ").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn filters_by_category() {
        let pool = seeded().await;
        let science = get_questions_for_category(&pool, 1).await.unwrap();
        assert_eq!(science.len(), 3);
        assert!(science.iter().all(|q| q.category == 1));
        assert!(get_questions_for_category(&pool, 6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_question_is_row_not_found() {
        let pool = seeded().await;
        assert!(matches!(
            delete_question(&pool, 1000).await,
            Err(sqlx::Error::RowNotFound)
        ));
        delete_question(&pool, 1).await.unwrap();
        assert_eq!(get_all_questions(&pool).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let pool = seeded().await;
        let result = create_question(
            &pool,
            NewQuestion {
                question: "Orphan?",
                answer: "Yes",
                category: 42,
                difficulty: 1,
            },
        )
        .await;
        assert!(result.is_err());
    }
}
