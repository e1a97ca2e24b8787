//! Deterministic fallback embedding provider.
//!
//! Term-frequency vectors bucketed by FNV-1a hash and L2-normalized. Not as
//! semantically rich as a neural provider, but always available and stable
//! across processes, which is what the golden-corpus preload needs.

use std::collections::HashMap;

use engram_core::constants::DEFAULT_EMBEDDING_DIMENSIONS;
use engram_core::errors::EngramResult;
use engram_core::traits::IEmbeddingProvider;

/// Term-hash embedding provider.
pub struct FallbackEmbedder {
    dimensions: usize,
}

impl FallbackEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Tokenize text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn term_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<String, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        let mut vec = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms carry more signal than likely stopwords.
            let weight = 1.0 + (term.len() as f32).ln();
            let bucket = Self::hash_term(term, self.dimensions);
            vec[bucket] += freq * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }

        vec
    }
}

impl Default for FallbackEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIMENSIONS)
    }
}

impl IEmbeddingProvider for FallbackEmbedder {
    fn embed(&self, text: &str) -> EngramResult<Vec<f32>> {
        Ok(self.term_vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "term-hash-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engram_core::scoring::cosine_similarity;

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = FallbackEmbedder::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn produces_correct_dimensions() {
        let p = FallbackEmbedder::new(384);
        assert_eq!(p.embed("hello recall engine").unwrap().len(), 384);
    }

    #[test]
    fn output_is_normalized() {
        let p = FallbackEmbedder::new(256);
        let v = p.embed("rust systems programming").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic() {
        let p = FallbackEmbedder::new(256);
        assert_eq!(
            p.embed("same input text").unwrap(),
            p.embed("same input text").unwrap()
        );
    }

    #[test]
    fn overlapping_texts_are_more_similar_than_disjoint_ones() {
        let p = FallbackEmbedder::new(256);
        let base = p.embed("database connection pool sizing").unwrap();
        let close = p.embed("connection pool sizing for the database").unwrap();
        let far = p.embed("quarterly marketing revenue forecast").unwrap();
        assert!(
            cosine_similarity(&base, &close) > cosine_similarity(&base, &far),
            "term overlap should dominate"
        );
    }
}
