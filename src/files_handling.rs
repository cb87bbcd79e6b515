
use crate::errors::Result;
use crate::vocab::{RawEntry, Vocab};

use ndarray::Array2;
use ndarray_npy::read_npy;
use std::{collections::HashMap, fs::File, io::{BufRead, BufReader}};


pub fn read_input<R: ReadFile>(file_path: &str) -> Result<<R as ReadFile>::Item> {
    <R as ReadFile>::read_file(file_path)
}

pub trait ReadFile {
    type Item;
    fn read_file(file_path: &str) -> Result<Self::Item>;
}

impl ReadFile for Array2<f32> {
    type Item = Self;
    fn read_file(file_path: &str) -> Result<Self::Item> {
        let in_file = file_path.to_string() + ".npy";
        let item = read_npy(in_file)?;
        Ok(item)
    }
}

impl ReadFile for Vocab {
    type Item = Self;
    fn read_file(file_path: &str) -> Result<Self::Item> {
        let in_file = file_path.to_string() + ".txt";
        let f = BufReader::new(File::open(in_file)?);
        let raw: HashMap<String, RawEntry> = serde_json::from_reader(f)?;
        Vocab::from_raw(raw)
    }
}

pub fn read_lines(file_path: &str) -> Result<Vec<String>> {

    let f = BufReader::new(File::open(file_path)?);
    let mut lines: Vec<String> = Vec::new();
    for line in f.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_owned());
        }
    }
    Ok(lines)
}


#[cfg(test)]
mod tests {

    use std::{env, fs};
    use ndarray::{array, Array2};
    use ndarray_npy::write_npy;
    use crate::errors::EvalError;
    use crate::vocab::Vocab;
    use super::{read_input, read_lines};

    fn temp_stem(name: &str) -> String {
        let dir = env::temp_dir().join(format!("glove_eval_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name).display().to_string()
    }

    #[test]
    fn loads_trained_artifacts() {

        let w: Array2<f32> = array![[1.0, 2.0], [3.0, 4.0]];
        let vecs = temp_stem("vecs");
        write_npy(vecs.clone() + ".npy", &w).unwrap();

        let words = temp_stem("words");
        fs::write(words.clone() + ".txt", r#"{"sos": 0, "eos": 1}"#).unwrap();

        assert_eq!(read_input::<Array2<f32>>(&vecs).unwrap(), w);
        let vocab = read_input::<Vocab>(&words).unwrap();
        assert_eq!(vocab.id("eos"), Some(1));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = read_input::<Vocab>(&temp_stem("does_not_exist"));
        assert!(matches!(res, Err(EvalError::Io(_))));
    }

    #[test]
    fn skips_blank_lines() {
        let path = temp_stem("queries.txt");
        fs::write(&path, "sun\n\n  moon \n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["sun", "moon"]);
    }
}
