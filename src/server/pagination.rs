use serde::Deserialize;

use super::deserializers::{deserialize_page, first_page};

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

/// One-indexed window of `QUESTIONS_PER_PAGE` items. Pages before the first
/// or past the last are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(QUESTIONS_PER_PAGE);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
