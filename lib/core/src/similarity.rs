//! Similarity scoring over embeddings and ticket records.
//!
//! Scores are dimensionless similarity values, conceptually in [-1, 1].
//! A zero-norm vector makes cosine similarity undefined; that case is an
//! explicit [`Error::UndefinedSimilarity`] rather than a silent NaN,
//! because NaN would sort unpredictably during ranking.

use crate::{Embedding, Error, IssueRecord, Result};

/// Compute the cosine similarity of two equal-length embeddings.
///
/// Single pass over the components with three running accumulators
/// (sum of squares of `a`, sum of squares of `b`, sum of products).
///
/// # Errors
///
/// Returns [`Error::UndefinedSimilarity`] when either vector has zero
/// norm. Equal dimension is a provider precondition and only checked in
/// debug builds.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> Result<f32> {
    debug_assert_eq!(a.dim(), b.dim(), "embedding dimensions must match");

    let mut sum_aa = 0.0f32;
    let mut sum_bb = 0.0f32;
    let mut sum_ab = 0.0f32;
    for (x, y) in a.as_slice().iter().zip(b.as_slice().iter()) {
        sum_aa += x * x;
        sum_bb += y * y;
        sum_ab += x * y;
    }

    let denom = (sum_aa * sum_bb).sqrt();
    if denom == 0.0 {
        return Err(Error::UndefinedSimilarity);
    }
    Ok(sum_ab / denom)
}

/// Compute the similarity of two ticket records as the unweighted mean
/// of the cosine similarities of their paired field embeddings
/// (title vs title, category vs category, description vs description).
///
/// # Errors
///
/// Returns [`Error::ArityMismatch`] when the records carry a different
/// number of field embeddings, and propagates
/// [`Error::UndefinedSimilarity`] from any pair.
pub fn record_similarity(a: &IssueRecord, b: &IssueRecord) -> Result<f32> {
    let ea = a.embeddings();
    let eb = b.embeddings();
    if ea.len() != eb.len() || ea.is_empty() {
        return Err(Error::ArityMismatch {
            left: ea.len(),
            right: eb.len(),
        });
    }

    let mut total = 0.0f32;
    for (x, y) in ea.iter().zip(eb.iter()) {
        total += cosine_similarity(x, y)?;
    }
    Ok(total / ea.len() as f32)
}
