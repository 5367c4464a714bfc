use anyhow::{Context, Result};
use memmap2::Mmap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::Number;

pub const ARTIFACT_MAGIC: [u8; 4] = *b"WLKT";
pub const ARTIFACT_VERSION: u32 = 1;

const DIGEST_SIZE: usize = 32;
// magic + version + kind + sha256(payload)
const HEADER_SIZE: usize = 4 + 4 + 1 + DIGEST_SIZE;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArtifactKind {
    Exercise = 1,
    Diet = 2,
    Meditation = 3,
}

impl ArtifactKind {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(ArtifactKind::Exercise),
            2 => Some(ArtifactKind::Diet),
            3 => Some(ArtifactKind::Meditation),
            _ => None,
        }
    }
}

/// A typed, self-validating artifact payload. Each implementor owns the shape
/// invariants its queries depend on; `read_artifact` refuses to hand out a
/// bundle that fails them.
pub trait Artifact: Serialize + DeserializeOwned {
    const KIND: ArtifactKind;
    fn validate(&self) -> Result<()>;
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ExerciseRecord {
    pub name: String,
    pub target_muscle: String,
    pub calories_per_30_min: Number,
    pub difficulty: String,
    pub sets: u32,
    pub reps: u32,
    pub benefit: String,
    pub equipment: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DietRecord {
    pub recipe_name: String,
    pub cuisine: String,
    pub protein_g: Number,
    pub carbs_g: Number,
    pub fat_g: Number,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct MeditationRecord {
    pub name: String,
    pub description: String,
}

/// Row-major square matrix of pairwise similarities. Row and column order
/// must match the owning record table's row order; ranking relies on the
/// positional alignment, not on any key.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct SquareMatrix {
    pub dim: usize,
    pub data: Vec<Number>,
}

impl SquareMatrix {
    pub fn at(&self, row: usize, col: usize) -> Number {
        self.data[row * self.dim + col]
    }

    fn check(&self, records: usize, what: &str) -> Result<()> {
        if self.dim != records {
            anyhow::bail!(
                "{} similarity matrix is {}x{} but the table has {} rows",
                what,
                self.dim,
                self.dim,
                records
            );
        }
        if self.data.len() != self.dim * self.dim {
            anyhow::bail!(
                "{} similarity matrix holds {} values, expected {}",
                what,
                self.data.len(),
                self.dim * self.dim
            );
        }
        Ok(())
    }
}

/// Fixed-width embedding vectors stored as one flat block; row i belongs to
/// record i of the owning table.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct EmbeddingTable {
    pub dimensions: usize,
    pub data: Vec<Number>,
}

impl EmbeddingTable {
    pub fn count(&self) -> usize {
        if self.dimensions == 0 {
            0
        } else {
            self.data.len() / self.dimensions
        }
    }

    pub fn row(&self, index: usize) -> &[Number] {
        let start = index * self.dimensions;
        &self.data[start..start + self.dimensions]
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct WordVector {
    pub token: String,
    pub vector: Vec<Number>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ExerciseArtifact {
    pub records: Vec<ExerciseRecord>,
    pub similarity: SquareMatrix,
}

impl Artifact for ExerciseArtifact {
    const KIND: ArtifactKind = ArtifactKind::Exercise;

    fn validate(&self) -> Result<()> {
        self.similarity.check(self.records.len(), "exercise")
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct DietArtifact {
    pub records: Vec<DietRecord>,
    pub similarity: SquareMatrix,
}

impl Artifact for DietArtifact {
    const KIND: ArtifactKind = ArtifactKind::Diet;

    fn validate(&self) -> Result<()> {
        self.similarity.check(self.records.len(), "diet")
    }
}

#[derive(Deserialize, Serialize)]
pub struct MeditationArtifact {
    pub records: Vec<MeditationRecord>,
    pub embeddings: EmbeddingTable,
    pub word_vectors: Vec<WordVector>,
}

impl Artifact for MeditationArtifact {
    const KIND: ArtifactKind = ArtifactKind::Meditation;

    fn validate(&self) -> Result<()> {
        if self.embeddings.dimensions == 0 {
            anyhow::bail!("meditation embeddings have zero dimensions");
        }
        if self.embeddings.data.len() % self.embeddings.dimensions != 0 {
            anyhow::bail!(
                "meditation embedding block of {} values is not a multiple of {} dimensions",
                self.embeddings.data.len(),
                self.embeddings.dimensions
            );
        }
        if self.embeddings.count() != self.records.len() {
            anyhow::bail!(
                "meditation table has {} rows but {} embeddings",
                self.records.len(),
                self.embeddings.count()
            );
        }
        for word in &self.word_vectors {
            if word.vector.len() != self.embeddings.dimensions {
                anyhow::bail!(
                    "word vector '{}' has {} dimensions, expected {}",
                    word.token,
                    word.vector.len(),
                    self.embeddings.dimensions
                );
            }
        }
        Ok(())
    }
}

/// Read and validate an artifact file: magic, version, kind, payload digest,
/// then the bundle's own shape invariants.
pub fn read_artifact<T: Artifact>(path: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open artifact file '{}'", path))?;
    let mmap = unsafe { Mmap::map(&file)? };

    if mmap.len() < HEADER_SIZE {
        anyhow::bail!("Artifact file '{}' is truncated ({} bytes)", path, mmap.len());
    }
    if mmap[..4] != ARTIFACT_MAGIC {
        anyhow::bail!("Artifact file '{}' has an unrecognized magic number", path);
    }

    let version = u32::from_le_bytes(mmap[4..8].try_into().unwrap());
    if version != ARTIFACT_VERSION {
        anyhow::bail!(
            "Artifact file '{}' is version {}, expected {}",
            path,
            version,
            ARTIFACT_VERSION
        );
    }

    let kind = ArtifactKind::from_byte(mmap[8])
        .with_context(|| format!("Artifact file '{}' has an unknown kind byte", path))?;
    if kind != T::KIND {
        anyhow::bail!(
            "Artifact file '{}' holds a {:?} bundle, expected {:?}",
            path,
            kind,
            T::KIND
        );
    }

    let payload = &mmap[HEADER_SIZE..];
    let digest = Sha256::digest(payload);
    if digest[..] != mmap[9..HEADER_SIZE] {
        anyhow::bail!("Artifact file '{}' failed its payload digest check", path);
    }

    let artifact: T = bincode::deserialize(payload)
        .with_context(|| format!("Failed to decode artifact payload from '{}'", path))?;
    artifact.validate()?;
    Ok(artifact)
}

/// Serialize an artifact with its header. Used by tests, benches, and
/// artifact preparation; the runtime never writes.
pub fn write_artifact<T: Artifact>(path: &str, artifact: &T) -> Result<()> {
    artifact.validate()?;
    let payload = bincode::serialize(artifact)?;
    let digest = Sha256::digest(&payload);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend(ARTIFACT_MAGIC);
    bytes.extend(ARTIFACT_VERSION.to_le_bytes());
    bytes.push(T::KIND as u8);
    bytes.extend(&digest[..]);
    bytes.extend(&payload);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for '{}'", path))?;
        }
    }
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to create artifact file '{}'", path))?;
    file.write_all(&bytes)
        .with_context(|| format!("Failed to write artifact file '{}'", path))?;
    Ok(())
}
