use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{in_memory, run_migrations};

    #[tokio::test]
    async fn missing_category_is_row_not_found() {
        let pool = in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert!(matches!(
            get_category(&pool, 100).await,
            Err(sqlx::Error::RowNotFound)
        ));
    }

    #[tokio::test]
    async fn import_upserts_by_id() {
        let pool = in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        import_categories(
            &pool,
            vec![
                Category {
                    id: 1,
                    kind: "Physics".to_owned(),
                },
                Category {
                    id: 7,
                    kind: "Music".to_owned(),
                },
            ],
        )
        .await
        .unwrap();

        assert_eq!(get_category(&pool, 1).await.unwrap().kind, "Physics");
        assert_eq!(get_category(&pool, 7).await.unwrap().kind, "Music");
        assert_eq!(get_all_categories(&pool).await.unwrap().len(), 7);
    }
}
