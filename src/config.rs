
use crate::document::DivisorPolicy;
use crate::errors::{EvalError, Result};
use crate::merge::{MergeStrategy, ZeroNorm};
use crate::similarity::DEFAULT_TOP_N;

use serde_json::Value;
use std::{fmt::Display, fs::File, io::BufReader};


#[derive(Clone, Debug)]
pub struct EvalParams {
    pub vectors_file: String,
    pub vocab_file: String,
    pub merged: bool,
    pub merge: MergeStrategy,
    pub normalize: bool,
    pub zero_norm: ZeroNorm,
    pub top_n: usize,
    pub divisor: DivisorPolicy,
    pub queries_file: Option<String>,
    pub documents_file: Option<String>,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            vectors_file: String::new(),
            vocab_file: String::new(),
            merged: false,
            merge: MergeStrategy::default(),
            normalize: true,
            zero_norm: ZeroNorm::default(),
            top_n: DEFAULT_TOP_N,
            divisor: DivisorPolicy::default(),
            queries_file: None,
            documents_file: None,
        }
    }
}

impl Display for EvalParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using evaluation params:
        vectors_file: {}
        vocab_file: {}
        merged: {}
        merge: {:?}
        normalize: {}
        zero_norm: {:?}
        top_n: {}
        divisor: {:?}
        queries_file: {:?}
        documents_file: {:?}",
        self.vectors_file, self.vocab_file, self.merged, self.merge, self.normalize, self.zero_norm,
        self.top_n, self.divisor, self.queries_file, self.documents_file)
    }
}

pub struct Config {
    params: EvalParams
}

fn required_str(json: &Value, key: &str) -> Result<String> {
    match json.get(key) {
        Some(v) => v.as_str().map(|s| s.to_owned()).ok_or_else(|| EvalError::InvalidConfig(format!("{} is not a string", key))),
        None => Err(EvalError::InvalidConfig(format!("{} was not supplied through json", key)))
    }
}

fn optional_str(json: &Value, key: &str) -> Result<Option<String>> {
    match json.get(key) {
        Some(_) => required_str(json, key).map(Some),
        None => Ok(None)
    }
}

fn optional_bool(json: &Value, key: &str, default: bool) -> Result<bool> {
    match json.get(key) {
        Some(v) => v.as_bool().ok_or_else(|| EvalError::InvalidConfig(format!("given {} is not boolean", key))),
        None => Ok(default)
    }
}

impl Config {

    pub fn get_params(&self) -> EvalParams {
        self.params.clone()
    }

    // args are the program name followed by the path to a json config file
    pub fn new(args: &[String]) -> Result<Config> {

        if args.len() != 2 {
            return Err(EvalError::InvalidConfig("input should be a path to json file only".to_string()));
        }

        // parse input json
        let f = BufReader::new(File::open(&args[1])?);
        let json: Value = serde_json::from_reader(f)?;
        Config::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config> {

        if !json.is_object() {
            return Err(EvalError::InvalidConfig("json config should be an object".to_string()));
        }

        let defaults = EvalParams::default();

        // validate input files in json
        let vectors_file = required_str(json, "vectors_file")?;
        let vocab_file = required_str(json, "vocab_file")?;

        // handle default vs input parameters
        let merged = optional_bool(json, "merged", defaults.merged)?;
        let normalize = optional_bool(json, "normalize", defaults.normalize)?;
        let merge = match optional_str(json, "merge")? {
            Some(merge) => MergeStrategy::parse(&merge)?,
            None => defaults.merge
        };
        let zero_norm = match optional_str(json, "zero_norm")? {
            Some(zero_norm) => ZeroNorm::parse(&zero_norm)?,
            None => defaults.zero_norm
        };
        let divisor = match optional_str(json, "divisor")? {
            Some(divisor) => DivisorPolicy::parse(&divisor)?,
            None => defaults.divisor
        };
        let top_n = match json.get("top_n") {
            Some(top_n) => top_n.as_u64().ok_or_else(|| EvalError::InvalidConfig("given top_n is not a non negative integer".to_string()))? as usize,
            None => defaults.top_n
        };

        let params = EvalParams {
            vectors_file,
            vocab_file,
            merged,
            merge,
            normalize,
            zero_norm,
            top_n,
            divisor,
            queries_file: optional_str(json, "queries_file")?,
            documents_file: optional_str(json, "documents_file")?,
        };

        Ok(Self { params })
    }

}
