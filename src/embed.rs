use anyhow::Result;
use std::collections::HashMap;

use crate::artifact::WordVector;
use crate::config::Number;
use crate::vector_ops::normalize_vector;

/// Seam for the external embedding model: anything that can turn free text
/// into a fixed-width vector comparable against the stored embeddings.
pub trait TextEncoder {
    fn dimensions(&self) -> usize;
    fn encode(&self, text: &str) -> Result<Vec<Number>>;
}

/// Bag-of-words encoder over the word-vector table shipped inside the
/// meditation artifact: average the vectors of every known token, then
/// normalize. Unknown-only input encodes to the zero vector, which scores
/// 0 against everything.
pub struct WordVectorEncoder {
    dimensions: usize,
    words: HashMap<String, Vec<Number>>,
}

impl WordVectorEncoder {
    pub fn new(dimensions: usize, word_vectors: &[WordVector]) -> Self {
        let words = word_vectors
            .iter()
            .map(|w| (w.token.to_lowercase(), w.vector.clone()))
            .collect();
        Self { dimensions, words }
    }
}

impl TextEncoder for WordVectorEncoder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn encode(&self, text: &str) -> Result<Vec<Number>> {
        let mut sum = vec![0.0; self.dimensions];
        let mut hits = 0usize;
        for token in tokenize(text) {
            if let Some(vector) = self.words.get(&token) {
                for (acc, &value) in sum.iter_mut().zip(vector.iter()) {
                    *acc += value;
                }
                hits += 1;
            }
        }
        if hits > 0 {
            for value in sum.iter_mut() {
                *value /= hits as Number;
            }
            normalize_vector(&mut sum);
        }
        Ok(sum)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}
