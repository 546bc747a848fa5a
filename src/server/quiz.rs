use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::db::Question;

/// Category selector that means "every category".
pub const ALL_CATEGORIES: i64 = 0;

/// Uniformly picks one question whose id was not served yet. `None` once the
/// candidates are exhausted.
pub fn pick_unseen<R>(
    candidates: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    eligible.choose(rng).cloned()
}
