
use crate::errors::{EvalError, Result};
use crate::vocab::Vocab;

use ndarray::prelude::*;
use tracing::debug;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DivisorPolicy {
    #[default]
    TotalTokens,   // all tokens of the document, unknown ones included
    MatchedTokens, // only the tokens found in the vocab
}

impl DivisorPolicy {
    pub fn parse(name: &str) -> Result<DivisorPolicy> {
        match name {
            "total" => Ok(DivisorPolicy::TotalTokens),
            "matched" => Ok(DivisorPolicy::MatchedTokens),
            _ => Err(EvalError::InvalidConfig(format!("unrecognized divisor {}", name)))
        }
    }
}

/// Averages the rows of the tokens of a document into one (unnormalized) vector.
/// Tokens missing from the vocab are skipped, but with `TotalTokens` they still
/// count in the divisor.
pub fn document_vector<S>(w: &Array2<f32>, vocab: &Vocab, tokens: &[S], divisor: DivisorPolicy) -> Result<Array1<f32>>
where
    S: AsRef<str>,
{

    if tokens.is_empty() {
        return Err(EvalError::EmptyInput("document has no tokens"));
    }
    if w.nrows() < vocab.len() {
        return Err(EvalError::InvalidShape(format!("matrix has {} rows, fewer than the {} vocab entries", w.nrows(), vocab.len())));
    }

    let mut bag_of_centroids: Array1<f32> = Array1::zeros(w.ncols());
    let mut matched: usize = 0;
    for token in tokens {
        if let Some(id) = vocab.id(token.as_ref()) {
            bag_of_centroids += &w.row(id);
            matched += 1;
        }
    }

    let denominator = match divisor {
        DivisorPolicy::TotalTokens => tokens.len(),
        DivisorPolicy::MatchedTokens => matched,
    };
    if denominator == 0 {
        return Err(EvalError::EmptyInput("no document token is in vocab"));
    }

    debug!(tokens = tokens.len(), matched, "document vector");
    bag_of_centroids /= denominator as f32;
    Ok(bag_of_centroids)
}


#[cfg(test)]
mod tests {

    use std::collections::HashMap;
    use ndarray::{array, Array2};
    use crate::errors::EvalError;
    use crate::vocab::Vocab;
    use super::{document_vector, DivisorPolicy};

    fn setup() -> (Array2<f32>, Vocab) {
        let t2i: HashMap<String, usize> = [("sun", 0), ("moon", 1), ("star", 2)]
        .iter()
        .map(|(t, i)| (t.to_string(), *i))
        .collect();
        let w: Array2<f32> = array![[1.0, 2.0, 3.0], [3.0, -2.0, 5.0], [0.5, 0.25, 0.0]];
        (w, Vocab::from_ids(t2i).unwrap())
    }

    #[test]
    fn single_token_is_its_own_vector() {
        let (w, vocab) = setup();
        let v = document_vector(&w, &vocab, &["moon"], DivisorPolicy::TotalTokens).unwrap();
        assert_eq!(v, w.row(1));
    }

    #[test]
    fn two_tokens_are_averaged() {
        let (w, vocab) = setup();
        let v = document_vector(&w, &vocab, &["sun", "moon"], DivisorPolicy::TotalTokens).unwrap();
        assert_eq!(v, array![2.0f32, 0.0, 4.0]);
    }

    #[test]
    fn repeated_tokens_count_each_time() {
        let (w, vocab) = setup();
        let tokens = vec!["star".to_string(), "star".to_string(), "sun".to_string(), "star".to_string()];
        let v = document_vector(&w, &vocab, &tokens, DivisorPolicy::TotalTokens).unwrap();
        assert_eq!(v, array![0.625f32, 0.6875, 0.75]);
    }

    #[test]
    fn unknown_tokens_count_in_the_divisor() {
        let (w, vocab) = setup();
        let v = document_vector(&w, &vocab, &["sun", "comet"], DivisorPolicy::TotalTokens).unwrap();
        assert_eq!(v, array![0.5f32, 1.0, 1.5]);
    }

    #[test]
    fn matched_divisor_ignores_unknown_tokens() {
        let (w, vocab) = setup();
        let v = document_vector(&w, &vocab, &["sun", "comet"], DivisorPolicy::MatchedTokens).unwrap();
        assert_eq!(v, w.row(0));
    }

    #[test]
    fn all_unknown_tokens() {
        let (w, vocab) = setup();
        let v = document_vector(&w, &vocab, &["comet", "nebula"], DivisorPolicy::TotalTokens).unwrap();
        assert_eq!(v, array![0.0f32, 0.0, 0.0]);

        let res = document_vector(&w, &vocab, &["comet", "nebula"], DivisorPolicy::MatchedTokens);
        assert!(matches!(res, Err(EvalError::EmptyInput(_))));
    }

    #[test]
    fn empty_document_fails() {
        let (w, vocab) = setup();
        let empty: [&str; 0] = [];
        let res = document_vector(&w, &vocab, &empty, DivisorPolicy::TotalTokens);
        assert!(matches!(res, Err(EvalError::EmptyInput(_))));
    }

    #[test]
    fn unmerged_matrix_is_accepted() {
        let (w, vocab) = setup();
        let mut stacked: Array2<f32> = Array2::zeros((6, 3));
        stacked.slice_mut(ndarray::s![..3, ..]).assign(&w);
        let v = document_vector(&stacked, &vocab, &["star"], DivisorPolicy::TotalTokens).unwrap();
        assert_eq!(v, w.row(2));
    }
}
