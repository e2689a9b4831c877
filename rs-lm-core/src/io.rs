use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole corpus file into memory as a `String`.
///
/// No line splitting or normalization happens here: newlines are corpus
/// characters like any other, and the model sees the file exactly as it
/// sits on disk.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(path)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths). Subdirectories are ignored.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_corpus_keeps_newlines() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		fs::write(&path, "line one\nline two\n").unwrap();

		let corpus = read_corpus(&path).unwrap();
		assert_eq!(corpus, "line one\nline two\n");
	}

	#[test]
	fn test_read_corpus_missing_file() {
		assert!(read_corpus("no/such/file.txt").is_err());
	}

	#[test]
	fn test_list_files_filters_by_extension() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("a.txt"), "x").unwrap();
		fs::write(dir.path().join("b.txt"), "x").unwrap();
		fs::write(dir.path().join("model.bin"), "x").unwrap();

		let mut files = list_files(dir.path(), "txt").unwrap();
		files.sort();
		assert_eq!(files, ["a.txt", "b.txt"]);
	}
}
