use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;

use crate::artifact::{DietArtifact, DietRecord};
use crate::config::Number;

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Protein,
    Carbs,
    Fat,
}

impl SortField {
    pub fn value(&self, record: &DietRecord) -> Number {
        match self {
            SortField::Protein => record.protein_g,
            SortField::Carbs => record.carbs_g,
            SortField::Fat => record.fat_g,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Protein => "Protein(g)",
            SortField::Carbs => "Carbs(g)",
            SortField::Fat => "Fat(g)",
        }
    }
}

/// A recipe paired with its aggregate similarity. The score lives here, in a
/// per-query result value; the shared table is never written to.
#[derive(Clone, Debug, Serialize)]
pub struct RankedRecipe {
    #[serde(flatten)]
    pub recipe: DietRecord,
    pub similarity_score: Number,
}

/// Rank one cuisine's recipes: restrict the global similarity matrix to the
/// matching rows' original positions (rows and columns), sum each restricted
/// row as the aggregate similarity, then sort by [sort field descending,
/// aggregate similarity descending] and cap the result. Returns `None` when
/// no row matches the cuisine.
pub fn rank_cuisine(
    artifact: &DietArtifact,
    cuisine: &str,
    sort_by: SortField,
    limit: usize,
) -> Option<Vec<RankedRecipe>> {
    let wanted = cuisine.to_lowercase();
    let positions: Vec<usize> = artifact
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.cuisine.to_lowercase() == wanted)
        .map(|(position, _)| position)
        .collect();

    if positions.is_empty() {
        return None;
    }

    let mut ranked: Vec<RankedRecipe> = positions
        .iter()
        .map(|&row| {
            // Row sum over the restricted submatrix. The diagonal
            // self-similarity term stays in the sum.
            let similarity_score: Number = positions
                .iter()
                .map(|&col| artifact.similarity.at(row, col))
                .sum();
            RankedRecipe {
                recipe: artifact.records[row].clone(),
                similarity_score,
            }
        })
        .collect();

    // Stable sort: rows tied on both keys keep their original order.
    ranked.sort_by(|a, b| {
        sort_by
            .value(&b.recipe)
            .partial_cmp(&sort_by.value(&a.recipe))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.similarity_score
                    .partial_cmp(&a.similarity_score)
                    .unwrap_or(Ordering::Equal)
            })
    });
    ranked.truncate(limit);
    Some(ranked)
}
