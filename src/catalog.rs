use anyhow::{Context, Result};

use crate::artifact::{read_artifact, DietArtifact, ExerciseArtifact, MeditationArtifact};
use crate::config::{self, State};
use crate::embed::{TextEncoder, WordVectorEncoder};

/// Application-lifetime handle over the three loaded bundles. Built once at
/// startup and passed by reference to every query; nothing mutates it
/// afterwards. Any load or validation failure here is fatal.
pub struct Catalog {
    pub exercise: ExerciseArtifact,
    pub diet: DietArtifact,
    pub meditation: MeditationArtifact,
    encoder: WordVectorEncoder,
}

impl Catalog {
    pub fn open(state: &State) -> Result<Self> {
        config::verbose_print(&format!(
            "Loading artifacts: {}, {}, {}",
            state.exercise_path, state.diet_path, state.meditation_path
        ));

        let exercise: ExerciseArtifact = read_artifact(&state.exercise_path)
            .with_context(|| format!("Failed to load exercise bundle '{}'", state.exercise_path))?;
        let diet: DietArtifact = read_artifact(&state.diet_path)
            .with_context(|| format!("Failed to load diet bundle '{}'", state.diet_path))?;
        let meditation: MeditationArtifact = read_artifact(&state.meditation_path).with_context(
            || format!("Failed to load meditation bundle '{}'", state.meditation_path),
        )?;

        let encoder = WordVectorEncoder::new(
            meditation.embeddings.dimensions,
            &meditation.word_vectors,
        );

        config::verbose_print(&format!(
            "Loaded {} exercises, {} recipes, {} meditations",
            exercise.records.len(),
            diet.records.len(),
            meditation.records.len()
        ));

        Ok(Self {
            exercise,
            diet,
            meditation,
            encoder,
        })
    }

    pub fn encoder(&self) -> &dyn TextEncoder {
        &self.encoder
    }

    /// Distinct exercise names in first-seen row order, for the selection
    /// widget.
    pub fn exercise_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.exercise
            .records
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Distinct cuisine values, sorted.
    pub fn cuisines(&self) -> Vec<&str> {
        let mut cuisines: Vec<&str> = self
            .diet
            .records
            .iter()
            .map(|r| r.cuisine.as_str())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        cuisines.sort_unstable();
        cuisines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{
        DietRecord, EmbeddingTable, ExerciseRecord, MeditationRecord, SquareMatrix,
    };

    fn catalog() -> Catalog {
        let exercise = ExerciseArtifact {
            records: vec![
                ExerciseRecord {
                    name: "Push-up".into(),
                    target_muscle: "Chest".into(),
                    calories_per_30_min: 120.0,
                    difficulty: "Beginner".into(),
                    sets: 3,
                    reps: 15,
                    benefit: "Upper body strength".into(),
                    equipment: None,
                },
                ExerciseRecord {
                    name: "Squat".into(),
                    target_muscle: "Legs".into(),
                    calories_per_30_min: 150.0,
                    difficulty: "Beginner".into(),
                    sets: 3,
                    reps: 12,
                    benefit: "Lower body strength".into(),
                    equipment: None,
                },
                ExerciseRecord {
                    name: "Push-up".into(),
                    target_muscle: "Triceps".into(),
                    calories_per_30_min: 110.0,
                    difficulty: "Intermediate".into(),
                    sets: 4,
                    reps: 10,
                    benefit: "Arm endurance".into(),
                    equipment: Some("Mat".into()),
                },
            ],
            similarity: SquareMatrix {
                dim: 3,
                data: vec![1.0; 9],
            },
        };
        let diet = DietArtifact {
            records: vec![
                DietRecord {
                    recipe_name: "Pad Thai".into(),
                    cuisine: "Thai".into(),
                    protein_g: 18.0,
                    carbs_g: 60.0,
                    fat_g: 14.0,
                },
                DietRecord {
                    recipe_name: "Margherita".into(),
                    cuisine: "Italian".into(),
                    protein_g: 12.0,
                    carbs_g: 40.0,
                    fat_g: 9.0,
                },
            ],
            similarity: SquareMatrix {
                dim: 2,
                data: vec![1.0, 0.2, 0.2, 1.0],
            },
        };
        let meditation = MeditationArtifact {
            records: vec![MeditationRecord {
                name: "Body scan".into(),
                description: "slow attention sweep".into(),
            }],
            embeddings: EmbeddingTable {
                dimensions: 2,
                data: vec![1.0, 0.0],
            },
            word_vectors: vec![],
        };
        let encoder = WordVectorEncoder::new(2, &meditation.word_vectors);
        Catalog {
            exercise,
            diet,
            meditation,
            encoder,
        }
    }

    #[test]
    fn exercise_names_are_distinct_in_first_seen_order() {
        assert_eq!(catalog().exercise_names(), vec!["Push-up", "Squat"]);
    }

    #[test]
    fn cuisines_are_distinct_and_sorted() {
        assert_eq!(catalog().cuisines(), vec!["Italian", "Thai"]);
    }
}
