use glove_eval::{Config, Pipeline};
use std::{env, process};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

// expects a single argument, the path to a json config. For example:
// {"vectors_file": "Output/vecs", "vocab_file": "Output/words", "queries_file": "Input/queries.txt"}

fn main() {

    fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

    info!("entering program...");
    let args: Vec<String> = env::args().collect();

    let params = match Config::new(&args) {
        Ok(config) => config.get_params(),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Pipeline::run(&params) {
        error!("{}", e);
        process::exit(1);
    }
}
