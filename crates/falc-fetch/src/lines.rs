use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::Result;

/// Lazy lines of a possibly gzipped text file
pub type Lines = Box<dyn Iterator<Item = Result<String>> + Send>;

/// UTF-8 when valid, Latin-1 otherwise (every byte is a Latin-1 char)
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Whole file as text, decoded like [`decode`]
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes))
}

/// Lines of `path` without their line terminator. Files ending in `.gz` are
/// decompressed even when `gzipped` is false. Each line is decoded on its own.
pub fn read_lines(path: &Path, gzipped: bool) -> Result<Lines> {
    let file = File::open(path)?;
    let gzipped = gzipped || path.extension().is_some_and(|ext| ext == "gz");

    let reader: Box<dyn BufRead + Send> = if gzipped {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(Box::new(DecodedLines {
        reader,
        buf: Vec::new(),
    }))
}

struct DecodedLines {
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
}

impl Iterator for DecodedLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut line = self.buf.as_slice();
                line = line.strip_suffix(b"\n").unwrap_or(line);
                line = line.strip_suffix(b"\r").unwrap_or(line);
                Some(Ok(decode(line)))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;

    use super::*;

    fn collect(lines: Lines) -> Vec<String> {
        lines.map(|l| l.unwrap()).collect()
    }

    #[test]
    fn test_plain_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "2 300\r\nle 0.1\nde 0.2").unwrap();

        assert_eq!(
            collect(read_lines(&path, false).unwrap()),
            vec!["2 300", "le 0.1", "de 0.2"]
        );
    }

    #[test]
    fn test_gzipped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cc.fr.300.vec.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all("2 300\nété 0.1\n".as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(collect(read_lines(&path, false).unwrap()), vec!["2 300", "été 0.1"]);
    }

    #[test]
    fn test_latin1_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        // "café\nthé" in Latin-1
        fs::write(&path, b"caf\xe9\nth\xe9").unwrap();

        assert_eq!(collect(read_lines(&path, false).unwrap()), vec!["café", "thé"]);
        assert_eq!(read_file(&path).unwrap(), "café\nthé");
    }

    #[test]
    fn test_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.txt");
        fs::write(&path, "L'été dernier").unwrap();
        assert_eq!(read_file(&path).unwrap(), "L'été dernier");
    }

    #[test]
    fn test_missing_file() {
        assert!(read_lines(Path::new("/nonexistent/words.vec"), false).is_err());
        assert!(read_file(Path::new("/nonexistent/input.txt")).is_err());
    }
}
