use crate::error::{Result, ValidationError};
use crate::info_log;
use rand::Rng;
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/countries.txt");

/// The candidate secrets for a game.
///
/// Never empty and never holds a blank word; callers only get copies or
/// shared borrows of the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Validate and collect lines. Each line is stripped of surrounding
    /// whitespace but otherwise kept as written.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            let word = line.as_ref().trim();
            if word.is_empty() {
                return Err(ValidationError::new(format!(
                    "Country file contains a blank or whitespace-only line (line {}).",
                    index + 1
                )));
            }
            words.push(word.to_string());
        }

        if words.is_empty() {
            return Err(ValidationError::new("Country file has no entries."));
        }

        Ok(Self { words })
    }

    pub fn load_from_str(data: &str) -> Result<Self> {
        Self::from_lines(data.lines())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            ValidationError::io(
                format!("Failed to read countries file: {}", path.display()),
                e,
            )
        })?;
        let bank = Self::load_from_str(&data)?;
        info_log!("Loaded {} words from {}", bank.len(), path.display());
        Ok(bank)
    }

    /// The list compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::load_from_str(EMBEDDED_WORDBANK)
    }

    /// A fresh copy of every word; mutating it never affects the bank.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.words.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Uniform pick over the whole bank.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let index = rng.gen_range(0..self.words.len());
        &self.words[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_load_from_str_preserves_case_and_order() {
        let bank = WordBank::load_from_str("Peru\nCHAD\ncanada").unwrap();
        assert_eq!(bank.all(), vec!["Peru", "CHAD", "canada"]);
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.get(1), Some("CHAD"));
        assert_eq!(bank.get(3), None);
    }

    #[test]
    fn test_load_trims_surrounding_whitespace() {
        let bank = WordBank::load_from_str("  PERU  \r\nCHAD\t").unwrap();
        assert_eq!(bank.all(), vec!["PERU", "CHAD"]);
    }

    #[test]
    fn test_empty_source_rejected() {
        let err = WordBank::load_from_str("").unwrap_err();
        assert_eq!(err.message(), "Country file has no entries.");
    }

    #[test]
    fn test_blank_line_rejected() {
        let err = WordBank::load_from_str("PERU\n   \nCHAD").unwrap_err();
        assert!(err.message().contains("blank"));
        assert!(err.message().contains("line 2"));
    }

    #[test]
    fn test_from_lines_accepts_owned_strings() {
        let lines = vec!["PERU".to_string(), "CHAD".to_string()];
        let bank = WordBank::from_lines(lines).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_all_returns_independent_copy() {
        let bank = WordBank::load_from_str("PERU\nCHAD").unwrap();
        let mut copy = bank.all();
        copy.clear();
        copy.push("NOWHERE".to_string());
        assert_eq!(bank.all(), vec!["PERU", "CHAD"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Peru").unwrap();
        writeln!(file, "Chad").unwrap();
        let bank = WordBank::load_from_file(file.path()).unwrap();
        assert_eq!(bank.all(), vec!["Peru", "Chad"]);
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordBank::load_from_file(dir.path().join("missing.txt")).unwrap_err();
        assert!(err.message().starts_with("Failed to read countries file"));
    }

    #[test]
    fn test_embedded_list_is_valid() {
        let bank = WordBank::embedded().unwrap();
        assert!(!bank.is_empty());
        assert!(bank.all().iter().all(|w| !w.trim().is_empty()));
    }

    #[test]
    fn test_pick_random_covers_bank() {
        let bank = WordBank::load_from_str("PERU\nCHAD\nCUBA").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let picked: HashSet<String> = (0..200)
            .map(|_| bank.pick_random(&mut rng).to_string())
            .collect();
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_pick_random_single_word() {
        let bank = WordBank::load_from_str("FIJI").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(bank.pick_random(&mut rng), "FIJI");
    }
}
