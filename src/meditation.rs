use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;

use crate::artifact::MeditationArtifact;
use crate::config::Number;
use crate::embed::TextEncoder;
use crate::vector_ops::{compute_cosine_similarity_simd, normalize_vector};

#[derive(Clone, Debug, Serialize)]
pub struct MeditationMatch {
    pub name: String,
    pub description: String,
    pub similarity: Number,
}

/// Outcome of one matcher invocation. The two advisory cases are values, not
/// errors; only encoder failures surface as `Err`.
#[derive(Debug)]
pub enum MeditationResponse {
    /// Blank input; no encoding was attempted.
    InvalidInput,
    /// Scoring produced no candidates.
    NoMatches,
    Matches(Vec<MeditationMatch>),
}

/// Encode the free-text query and score it against every stored embedding,
/// returning the `top_k` best matches by descending cosine similarity.
pub fn recommend(
    artifact: &MeditationArtifact,
    encoder: &dyn TextEncoder,
    input: &str,
    top_k: usize,
) -> Result<MeditationResponse> {
    if input.trim().is_empty() {
        return Ok(MeditationResponse::InvalidInput);
    }

    let mut query = encoder.encode(input)?;
    normalize_vector(&mut query);

    let mut matches: Vec<MeditationMatch> = (0..artifact.records.len())
        .into_par_iter()
        .filter_map(|i| {
            compute_cosine_similarity_simd(&query, artifact.embeddings.row(i)).map(|similarity| {
                MeditationMatch {
                    name: artifact.records[i].name.clone(),
                    description: artifact.records[i].description.clone(),
                    similarity,
                }
            })
        })
        .collect();

    if matches.is_empty() {
        return Ok(MeditationResponse::NoMatches);
    }

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(top_k);
    Ok(MeditationResponse::Matches(matches))
}
