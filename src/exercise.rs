use crate::artifact::{ExerciseArtifact, ExerciseRecord};

/// Exact-match, case-sensitive lookup by exercise name. A name absent from
/// the catalog yields an empty set, never an error.
pub fn filter_by_name(artifact: &ExerciseArtifact, name: &str) -> Vec<ExerciseRecord> {
    artifact
        .records
        .iter()
        .filter(|record| record.name == name)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::SquareMatrix;

    fn sample() -> ExerciseArtifact {
        let records = vec![
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
                name: "Plank".into(),
                target_muscle: "Core".into(),
                calories_per_30_min: 90.0,
                difficulty: "Beginner".into(),
                sets: 3,
                reps: 1,
                benefit: "Core stability".into(),
                equipment: Some("Mat".into()),
            },
        ];
        let dim = records.len();
        ExerciseArtifact {
            records,
            similarity: SquareMatrix {
                dim,
                data: vec![1.0; dim * dim],
            },
        }
    }

    #[test]
    fn returns_exactly_the_matching_rows() {
        let artifact = sample();
        let results = filter_by_name(&artifact, "Push-up");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target_muscle, "Chest");
        assert_eq!(results[0].calories_per_30_min, 120.0);
        assert_eq!(results[0].equipment, None);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(filter_by_name(&sample(), "push-up").is_empty());
    }

    #[test]
    fn absent_name_yields_empty_set() {
        assert!(filter_by_name(&sample(), "Deadlift").is_empty());
    }
}
