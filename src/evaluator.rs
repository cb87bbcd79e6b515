
use crate::config::EvalParams;
use crate::document::{document_vector, DivisorPolicy};
use crate::errors::{EvalError, Result};
use crate::merge::{merge_with, normalize_rows};
use crate::similarity::{most_similar, most_similar_batch, most_similar_scored};
use crate::vocab::{Id2Word, Vocab};

use ndarray::prelude::*;
use tracing::info;


/// One evaluation session over a trained matrix: the merged vectors, the vocab
/// and its inverse, built once and only read afterwards.
pub struct Evaluator {
    w: Array2<f32>,
    vocab: Vocab,
    id2word: Id2Word,
    degenerate: Vec<usize>,
    divisor: DivisorPolicy,
}

impl Evaluator {

    // unless `params.merged` is set, w holds main then context vectors
    pub fn new(w: Array2<f32>, vocab: Vocab, params: &EvalParams) -> Result<Evaluator> {

        let (w, degenerate) = if params.merged {
            if w.nrows() != vocab.len() {
                return Err(EvalError::InvalidShape(format!("merged matrix has {} rows for {} vocab entries", w.nrows(), vocab.len())));
            }
            let mut w = w;
            let degenerate = if params.normalize { normalize_rows(&mut w, params.zero_norm)? } else { Vec::new() };
            (w, degenerate)
        } else {
            if w.nrows() != 2 * vocab.len() {
                return Err(EvalError::InvalidShape(format!("unmerged matrix has {} rows, expected {} for {} vocab entries", w.nrows(), 2 * vocab.len(), vocab.len())));
            }
            let merged = merge_with(w, params.merge, params.normalize, params.zero_norm)?;
            (merged.w, merged.degenerate)
        };

        let id2word = vocab.make_id2word();
        info!(vocab_size = vocab.len(), dim = w.ncols(), degenerate = degenerate.len(), "evaluator ready");

        Ok(Self { w, vocab, id2word, degenerate, divisor: params.divisor })
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.w
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    pub fn id2word(&self) -> &Id2Word {
        &self.id2word
    }

    pub fn degenerate_rows(&self) -> &[usize] {
        &self.degenerate
    }

    pub fn extract_vec_from_word(&self, token: &str) -> Result<ArrayView1<'_, f32>> {
        match self.vocab.id(token) {
            Some(i) => Ok(self.w.row(i)),
            None => Err(EvalError::UnknownWord(token.to_owned()))
        }
    }

    pub fn most_similar(&self, word: &str, n: usize) -> Result<Vec<String>> {
        most_similar(&self.w, &self.vocab, &self.id2word, word, n)
    }

    pub fn most_similar_scored(&self, word: &str, n: usize) -> Result<Vec<(String, f32)>> {
        most_similar_scored(&self.w, &self.vocab, &self.id2word, word, n)
    }

    pub fn most_similar_batch<S: AsRef<str> + Sync>(&self, words: &[S], n: usize) -> Vec<Result<Vec<String>>> {
        most_similar_batch(&self.w, &self.vocab, &self.id2word, words, n)
    }

    pub fn document_vector<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Array1<f32>> {
        document_vector(&self.w, &self.vocab, tokens, self.divisor)
    }

}
