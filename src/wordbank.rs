use crate::error::{RejectReason, WordBankError};
use crate::{debug_log, info_log};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Words used when the word list is missing or holds nothing playable.
pub const EMBEDDED_WORDBANK: &str = include_str!("resources/default_words.txt");

pub const MIN_WORD_LENGTH: usize = 2;

/// Trim and upper-case a raw entry, then check it is a playable word.
///
/// # Errors
///
/// Returns the [`RejectReason`] when the entry is shorter than
/// [`MIN_WORD_LENGTH`] letters or contains anything but letters.
pub fn normalize_word(raw: &str) -> Result<String, RejectReason> {
    let word = raw.trim().to_uppercase();
    if word.chars().count() < MIN_WORD_LENGTH {
        return Err(RejectReason::TooShort);
    }
    if !word.chars().all(char::is_alphabetic) {
        return Err(RejectReason::NotAlphabetic);
    }
    Ok(word)
}

#[must_use]
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }
    match normalize_word(line) {
        Ok(word) => Some(word),
        Err(reason) => {
            log::warn!("Skipping word list entry '{}': {reason}", line.trim());
            None
        }
    }
}

/// Read the stored words, propagating I/O failures (including a missing file).
///
/// Lines that are not valid UTF-8 are skipped like any other unusable entry.
///
/// # Errors
///
/// Returns any error from opening or reading `path`.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut words = Vec::new();
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let Ok(line) = std::str::from_utf8(&bytes) else {
            log::warn!(
                "Skipping line {} of {}: not valid UTF-8",
                index + 1,
                path.display()
            );
            continue;
        };
        if let Some(word) = parse_line(line) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Load the word bank, falling back to the embedded list so a game can
/// always be started.
#[must_use]
pub fn load_wordbank<P: AsRef<Path>>(path: P) -> Vec<String> {
    load_wordbank_with_fallback(path).0
}

/// Like [`load_wordbank`], also reporting whether the embedded list was used.
#[must_use]
pub fn load_wordbank_with_fallback<P: AsRef<Path>>(path: P) -> (Vec<String>, bool) {
    let path = path.as_ref();
    match load_wordbank_from_file(path) {
        Ok(words) if !words.is_empty() => {
            info_log!("Loaded {} words from {}", words.len(), path.display());
            return (words, false);
        }
        Ok(_) => log::warn!(
            "Word list {} has no usable words, using built-in words",
            path.display()
        ),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info_log!("No word list at {}, using built-in words", path.display());
        }
        Err(e) => log::warn!(
            "Could not read word list {}: {e}, using built-in words",
            path.display()
        ),
    }
    (load_wordbank_from_str(EMBEDDED_WORDBANK), true)
}

/// Normalize `raw` and append it as a new line of the word list.
///
/// Creates the file and its parent directories when missing. Existing
/// entries are never rewritten.
///
/// # Errors
///
/// `Rejected` for words that fail [`normalize_word`], `Unwritable` when the
/// file cannot be created or written.
pub fn append_word<P: AsRef<Path>>(path: P, raw: &str) -> Result<String, WordBankError> {
    let path = path.as_ref();
    let word = normalize_word(raw).map_err(WordBankError::Rejected)?;
    write_line(path, &word).map_err(|source| WordBankError::Unwritable {
        path: path.to_path_buf(),
        source,
    })?;
    debug_log!("Appended '{}' to {}", word, path.display());
    Ok(word)
}

fn write_line(path: &Path, word: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    // A hand-edited file may lack a trailing newline.
    let mut line = String::with_capacity(word.len() + 2);
    if file.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            line.push('\n');
        }
    }
    line.push_str(word);
    line.push('\n');
    file.write_all(line.as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hangman_wordbank_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  cat \n"), Ok("CAT".to_string()));
        assert_eq!(normalize_word("Ox"), Ok("OX".to_string()));
        assert_eq!(normalize_word("a"), Err(RejectReason::TooShort));
        assert_eq!(normalize_word("   "), Err(RejectReason::TooShort));
        assert_eq!(normalize_word("r2d2"), Err(RejectReason::NotAlphabetic));
        assert_eq!(normalize_word("ice cream"), Err(RejectReason::NotAlphabetic));
    }

    #[test]
    fn test_load_from_str_skips_blank_and_invalid() {
        let words = load_wordbank_from_str("cat\n\n  dog  \nx\n\t\nb4d\nelephant");
        assert_eq!(words, vec!["CAT", "DOG", "ELEPHANT"]);
    }

    #[test]
    fn test_load_keeps_duplicates_and_order() {
        let words = load_wordbank_from_str("zebra\napple\nzebra");
        assert_eq!(words, vec!["ZEBRA", "APPLE", "ZEBRA"]);
    }

    #[test]
    fn test_embedded_wordbank_is_usable() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        assert!(words.len() >= 3);
        assert!(words.iter().all(|w| w.chars().count() >= MIN_WORD_LENGTH));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = temp_path("missing.txt");
        let _ = fs::remove_file(&path);
        assert!(load_wordbank_from_file(&path).is_err());
        let words = load_wordbank(&path);
        assert!(!words.is_empty());
        assert_eq!(words, load_wordbank_from_str(EMBEDDED_WORDBANK));
    }

    #[test]
    fn test_load_empty_file_falls_back() {
        let path = temp_path("empty.txt");
        fs::write(&path, "\n   \n").unwrap();
        let words = load_wordbank(&path);
        assert_eq!(words, load_wordbank_from_str(EMBEDDED_WORDBANK));
        assert!(load_wordbank_with_fallback(&path).1);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_then_load() {
        let path = temp_path("append.txt");
        let _ = fs::remove_file(&path);

        assert_eq!(append_word(&path, " kiwi ").unwrap(), "KIWI");
        assert_eq!(append_word(&path, "Mango").unwrap(), "MANGO");
        assert_eq!(
            load_wordbank_with_fallback(&path),
            (vec!["KIWI".to_string(), "MANGO".to_string()], false)
        );

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "KIWI\nMANGO\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_rejects_without_touching_file() {
        let path = temp_path("reject.txt");
        fs::write(&path, "CAT\n").unwrap();

        match append_word(&path, "a") {
            Err(WordBankError::Rejected(RejectReason::TooShort)) => {}
            other => panic!("Expected TooShort rejection, got {other:?}"),
        }
        match append_word(&path, "c4t") {
            Err(WordBankError::Rejected(RejectReason::NotAlphabetic)) => {}
            other => panic!("Expected NotAlphabetic rejection, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "CAT\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let path = temp_path("no_newline.txt");
        fs::write(&path, "CAT\nDOG").unwrap();

        append_word(&path, "owl").unwrap();
        assert_eq!(load_wordbank(&path), vec!["CAT", "DOG", "OWL"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_undecodable_line_keeps_stored_words() {
        let path = temp_path("bad_utf8.txt");
        fs::write(&path, b"CAT\nDOG\n\xffBAD\n").unwrap();

        assert_eq!(
            load_wordbank_with_fallback(&path),
            (vec!["CAT".to_string(), "DOG".to_string()], false)
        );

        append_word(&path, "owl").unwrap();
        assert_eq!(load_wordbank(&path), vec!["CAT", "DOG", "OWL"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let dir = temp_path("nested_dir");
        let path = dir.join("deeper").join("words.txt");
        let _ = fs::remove_dir_all(&dir);

        append_word(&path, "fox").unwrap();
        assert_eq!(load_wordbank(&path), vec!["FOX"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_append_to_directory_is_unwritable() {
        let dir = temp_path("is_a_dir");
        fs::create_dir_all(&dir).unwrap();

        match append_word(&dir, "fox") {
            Err(WordBankError::Unwritable { path, .. }) => assert_eq!(path, dir),
            other => panic!("Expected Unwritable, got {other:?}"),
        }
        fs::remove_dir_all(&dir).unwrap();
    }
}
