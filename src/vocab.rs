
use crate::errors::{EvalError, Result};

use std::collections::HashMap;
use serde::Deserialize;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VocabEntry {
    pub id: usize,
    pub count: Option<u64>, // occurrences in the training corpus, when the trainer saved them
}

// the trainer saves `token -> id`, other tools save `token -> [id, count]`
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawEntry {
    Id(usize),
    IdCount(usize, u64),
}

impl RawEntry {
    fn into_entry(self) -> VocabEntry {
        match self {
            RawEntry::Id(id) => VocabEntry { id, count: None },
            RawEntry::IdCount(id, count) => VocabEntry { id, count: Some(count) },
        }
    }
}

/// Word to row-id mapping of a trained matrix.
///
/// Ids are a dense permutation of `0..len()`, so an id indexes a row of the
/// merged matrix directly (and rows `id` and `id + len()` of the unmerged one).
#[derive(Clone, Debug)]
pub struct Vocab {
    t2e: HashMap<String, VocabEntry>,
}

impl Vocab {

    pub fn new(t2e: HashMap<String, VocabEntry>) -> Result<Vocab> {

        // every id in 0..n must be taken exactly once
        let n = t2e.len();
        let mut seen = vec![false; n];
        for (token, entry) in &t2e {
            if entry.id >= n {
                return Err(EvalError::InvalidVocab(format!("id {} of token {} is out of range 0..{}", entry.id, token, n)));
            }
            if seen[entry.id] {
                return Err(EvalError::InvalidVocab(format!("id {} is used more than once", entry.id)));
            }
            seen[entry.id] = true;
        }

        Ok(Self { t2e })
    }

    pub fn from_ids(t2i: HashMap<String, usize>) -> Result<Vocab> {
        let t2e = t2i
        .into_iter()
        .map(|(t, id)| (t, VocabEntry { id, count: None }))
        .collect();
        Vocab::new(t2e)
    }

    pub(crate) fn from_raw(raw: HashMap<String, RawEntry>) -> Result<Vocab> {
        Vocab::new(raw.into_iter().map(|(t, e)| (t, e.into_entry())).collect())
    }

    pub fn len(&self) -> usize {
        self.t2e.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t2e.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<&VocabEntry> {
        self.t2e.get(token)
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.t2e.get(token).map(|e| e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VocabEntry)> {
        self.t2e.iter().map(|(t, e)| (t.as_str(), e))
    }

    pub fn make_id2word(&self) -> Id2Word {
        Id2Word::new(self)
    }

}

// read-only inverse of `Vocab`, built once per session
#[derive(Clone, Debug)]
pub struct Id2Word {
    i2t: Vec<String>,
}

impl Id2Word {

    pub fn new(vocab: &Vocab) -> Id2Word {
        // ids are dense, checked when the vocab was built
        let mut i2t = vec![String::new(); vocab.len()];
        for (t, e) in vocab.iter() {
            i2t[e.id] = t.to_owned();
        }
        Self { i2t }
    }

    pub fn word(&self, id: usize) -> Option<&str> {
        self.i2t.get(id).map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i2t.is_empty()
    }

}


#[cfg(test)]
mod tests {

    use std::collections::HashMap;
    use crate::errors::EvalError;
    use super::{Vocab, VocabEntry, RawEntry};

    fn t2i(tokens: &[(&str, usize)]) -> HashMap<String, usize> {
        tokens.iter().map(|(t, i)| (t.to_string(), *i)).collect()
    }

    #[test]
    fn builds_inverse_mapping() {

        let vocab = Vocab::from_ids(t2i(&[("king", 0), ("queen", 1), ("man", 2)])).unwrap();
        let id2word = vocab.make_id2word();

        assert_eq!(vocab.len(), 3);
        assert_eq!(id2word.len(), 3);
        for (token, entry) in vocab.iter() {
            assert_eq!(id2word.word(entry.id), Some(token));
        }
        assert_eq!(id2word.word(3), None);
    }

    #[test]
    fn lookup_returns_none_for_unknown_token() {
        let vocab = Vocab::from_ids(t2i(&[("sun", 0)])).unwrap();
        assert_eq!(vocab.id("sun"), Some(0));
        assert_eq!(vocab.id("moon"), None);
    }

    #[test]
    fn rejects_gaps_and_duplicates() {

        let gap = Vocab::from_ids(t2i(&[("a", 0), ("b", 2)]));
        assert!(matches!(gap, Err(EvalError::InvalidVocab(_))));

        let dup = Vocab::from_ids(t2i(&[("a", 1), ("b", 1)]));
        assert!(matches!(dup, Err(EvalError::InvalidVocab(_))));
    }

    #[test]
    fn reads_both_json_layouts() {

        let ids: HashMap<String, RawEntry> = serde_json::from_str(r#"{"a": 1, "b": 0}"#).unwrap();
        let vocab = Vocab::from_raw(ids).unwrap();
        assert_eq!(vocab.get("a"), Some(&VocabEntry { id: 1, count: None }));

        let pairs: HashMap<String, RawEntry> = serde_json::from_str(r#"{"a": [0, 12], "b": [1, 3]}"#).unwrap();
        let vocab = Vocab::from_raw(pairs).unwrap();
        assert_eq!(vocab.get("b"), Some(&VocabEntry { id: 1, count: Some(3) }));
    }
}
