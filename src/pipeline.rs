
// imports
use crate::config::EvalParams;
use crate::errors::Result;
use crate::evaluator::Evaluator;
use crate::files_handling::{read_input, read_lines};
use crate::vocab::Vocab;

use std::time::Instant;
use ndarray::Array2;
use tracing::{info, warn};

pub struct Pipeline {}

impl Pipeline {

    // runs the evaluation in 3 steps -
    // -> loading and merging the trained vecs
    // -> most similar words for every query
    // -> document vectors for every document line

    pub fn run(params: &EvalParams) -> Result<Evaluator> {

        info!("{}", params);
        let timer = Instant::now();

        let w = read_input::<Array2<f32>>(&params.vectors_file)?;
        let vocab = read_input::<Vocab>(&params.vocab_file)?;
        info!(rows = w.nrows(), dim = w.ncols(), vocab_size = vocab.len(), "loaded vecs and vocab");

        let evaluator = Evaluator::new(w, vocab, params)?;
        info!("evaluator built, took {} ms", timer.elapsed().as_millis());

        if let Some(queries_file) = &params.queries_file {
            let queries = read_lines(queries_file)?;
            Pipeline::run_similarity(&evaluator, &queries, params.top_n);
        }

        if let Some(documents_file) = &params.documents_file {
            let documents = read_lines(documents_file)?;
            Pipeline::run_documents(&evaluator, &documents);
        }

        Ok(evaluator)
    }

    fn run_similarity(evaluator: &Evaluator, queries: &[String], k: usize) {

        // finding the k most similar words to each of the queries, in parallel
        let results = evaluator.most_similar_batch(queries, k);
        for (token, result) in queries.iter().zip(results) {
            match result {
                Ok(similar) => info!("{} most similar to {}: {}", k, token, similar.join(", ")),
                Err(e) => warn!("skipping query {}: {}", token, e)
            }
        }
    }

    fn run_documents(evaluator: &Evaluator, documents: &[String]) {

        for (i, document) in documents.iter().enumerate() {
            let tokens: Vec<&str> = document.split_whitespace().collect();
            match evaluator.document_vector(&tokens) {
                Ok(v) => info!("document {}: {}", i, v),
                Err(e) => warn!("skipping document {}: {}", i, e)
            }
        }
    }

}
