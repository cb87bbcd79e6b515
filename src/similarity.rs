
use crate::errors::{EvalError, Result};
use crate::vocab::{Id2Word, Vocab};

use ndarray::prelude::*;
use rayon::prelude::*;
use tracing::debug;


pub const DEFAULT_TOP_N: usize = 15;

fn check_merged(w: &Array2<f32>, vocab: &Vocab, id2word: &Id2Word) -> Result<()> {

    // a (2 * vocab_size) matrix means main and context vectors were never merged
    if w.nrows() != vocab.len() {
        return Err(EvalError::InvalidState { rows: w.nrows(), vocab_size: vocab.len() });
    }
    if id2word.len() != vocab.len() {
        return Err(EvalError::InvalidVocab(format!("id2word has {} entries, vocab has {}", id2word.len(), vocab.len())));
    }
    Ok(())
}

/// Finds the `n` tokens most similar to `word`, best first, with their scores.
/// Scores are plain dot products, i.e. cosine similarity only when the rows of
/// `w` are unit vectors (not checked here).
pub fn most_similar_scored(w: &Array2<f32>, vocab: &Vocab, id2word: &Id2Word, word: &str, n: usize) -> Result<Vec<(String, f32)>> {

    check_merged(w, vocab, id2word)?;
    let word_id = vocab.id(word).ok_or_else(|| EvalError::UnknownWord(word.to_owned()))?;

    // multiply all vectors by token vector
    let scores = w.dot(&w.row(word_id)); // of size vocab size
    let mut indexed_scores: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();

    // sort by most similar in descending order, ties by id
    indexed_scores.sort_by(|(i, s), (j, t)| t.total_cmp(s).then(i.cmp(j)));

    // the token is most similar to itself, keep one spare entry for it
    let similar = indexed_scores
    .into_iter()
    .take(n.saturating_add(1))
    .filter(|(id, _)| *id != word_id)
    .take(n)
    .map(|(id, score)| {
        id2word
        .word(id)
        .map(|t| (t.to_owned(), score))
        .ok_or_else(|| EvalError::InvalidVocab(format!("id {} has no token", id)))
    })
    .collect::<Result<Vec<(String, f32)>>>()?;

    debug!(word, n, found = similar.len(), "most similar");
    Ok(similar)
}

pub fn most_similar(w: &Array2<f32>, vocab: &Vocab, id2word: &Id2Word, word: &str, n: usize) -> Result<Vec<String>> {
    let similar = most_similar_scored(w, vocab, id2word, word, n)?;
    Ok(similar.into_iter().map(|(t, _)| t).collect())
}

// results keep the order of `words`
pub fn most_similar_batch<S>(w: &Array2<f32>, vocab: &Vocab, id2word: &Id2Word, words: &[S], n: usize) -> Vec<Result<Vec<String>>>
where
    S: AsRef<str> + Sync,
{
    words
    .par_iter()
    .map(|word| most_similar(w, vocab, id2word, word.as_ref(), n))
    .collect()
}
