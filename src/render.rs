use crate::artifact::ExerciseRecord;
use crate::diet::{RankedRecipe, SortField};
use crate::meditation::MeditationMatch;

/// One bordered text card per catalog row, mirroring the fields the record
/// carries.
pub fn exercise_cards(records: &[ExerciseRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str("----------------------------------------\n");
        out.push_str(&format!("{}\n", record.name));
        out.push_str(&format!("  Target muscle: {}\n", record.target_muscle));
        out.push_str(&format!(
            "  Burns: {} calories per 30 min\n",
            record.calories_per_30_min
        ));
        out.push_str(&format!("  Difficulty: {}\n", record.difficulty));
        out.push_str(&format!("  Sets: {} | Reps: {}\n", record.sets, record.reps));
        out.push_str(&format!("  Benefit: {}\n", record.benefit));
        out.push_str(&format!(
            "  Equipment: {}\n",
            record.equipment.as_deref().unwrap_or("None")
        ));
    }
    if !records.is_empty() {
        out.push_str("----------------------------------------\n");
    }
    out
}

/// Fixed-width table of ranked recipes, macro columns only.
pub fn diet_table(cuisine: &str, sort_by: SortField, ranked: &[RankedRecipe]) -> String {
    let mut out = format!(
        "Top {} {} recipes (sorted by {}):\n",
        ranked.len(),
        cuisine,
        sort_by.label()
    );
    let name_width = ranked
        .iter()
        .map(|r| r.recipe.recipe_name.len())
        .max()
        .unwrap_or(0)
        .max("Recipe".len());
    out.push_str(&format!(
        "{:<width$}  {:>10}  {:>8}  {:>7}\n",
        "Recipe",
        "Protein(g)",
        "Carbs(g)",
        "Fat(g)",
        width = name_width
    ));
    for entry in ranked {
        out.push_str(&format!(
            "{:<width$}  {:>10.1}  {:>8.1}  {:>7.1}\n",
            entry.recipe.recipe_name,
            entry.recipe.protein_g,
            entry.recipe.carbs_g,
            entry.recipe.fat_g,
            width = name_width
        ));
    }
    out
}

pub fn meditation_list(matches: &[MeditationMatch]) -> String {
    let mut out = String::new();
    for (rank, entry) in matches.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (similarity {:.3})\n",
            rank + 1,
            entry.name,
            entry.similarity
        ));
        out.push_str(&format!("   {}\n", entry.description));
    }
    out
}

/// Advisory empty-state messages go to stderr; they are not failures.
pub fn warn(message: &str) {
    eprintln!("Warning: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DietRecord;

    #[test]
    fn exercise_cards_cover_every_field() {
        let card = exercise_cards(&[ExerciseRecord {
            name: "Push-up".into(),
            target_muscle: "Chest".into(),
            calories_per_30_min: 120.0,
            difficulty: "Beginner".into(),
            sets: 3,
            reps: 15,
            benefit: "Upper body strength".into(),
            equipment: None,
        }]);
        for needle in ["Push-up", "Chest", "120", "Beginner", "Sets: 3", "Reps: 15", "None"] {
            assert!(card.contains(needle), "missing {:?} in {}", needle, card);
        }
    }

    #[test]
    fn empty_result_renders_empty() {
        assert!(exercise_cards(&[]).is_empty());
        assert!(meditation_list(&[]).is_empty());
    }

    #[test]
    fn diet_table_has_header_and_rows() {
        let table = diet_table(
            "italian",
            SortField::Protein,
            &[RankedRecipe {
                recipe: DietRecord {
                    recipe_name: "Carbonara".into(),
                    cuisine: "Italian".into(),
                    protein_g: 20.0,
                    carbs_g: 55.0,
                    fat_g: 18.0,
                },
                similarity_score: 1.8,
            }],
        );
        assert!(table.contains("sorted by Protein(g)"));
        assert!(table.contains("Carbonara"));
        assert!(table.contains("20.0"));
    }
}
