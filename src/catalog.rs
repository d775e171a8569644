use std::collections::BTreeMap;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static SNIPPET_DIR: Dir = include_dir!("src/snippets");

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum Language {
    Python,
    #[value(name = "javascript")]
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Python, Language::JavaScript];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum Level {
    #[serde(rename = "Iniciante")]
    #[strum(serialize = "Iniciante")]
    Beginner,
    #[serde(rename = "Intermediário")]
    #[strum(serialize = "Intermediário")]
    Intermediate,
}

impl Level {
    pub fn toggle(self) -> Self {
        match self {
            Level::Beginner => Level::Intermediate,
            Level::Intermediate => Level::Beginner,
        }
    }
}

/// A catalogue entry: a snippet to study or type, plus where to read more about it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Topic {
    pub name: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("snippet file {0} is not valid UTF-8")]
    NotUtf8(String),
    #[error("unable to parse snippet file {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct LanguageFile {
    language: Language,
    levels: BTreeMap<Level, Vec<Topic>>,
}

/// Topics grouped by language and level.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<(Language, Level), Vec<Topic>>,
}

impl Catalog {
    /// Loads the snippet files embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for file in SNIPPET_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
        {
            let name = file.path().display().to_string();
            let contents = file
                .contents_utf8()
                .ok_or_else(|| CatalogError::NotUtf8(name.clone()))?;
            catalog
                .merge_json(contents)
                .map_err(|source| CatalogError::Parse { file: name, source })?;
        }

        Ok(catalog)
    }

    /// Parses a single language file.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut catalog = Catalog::default();
        catalog.merge_json(json)?;
        Ok(catalog)
    }

    fn merge_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let file: LanguageFile = serde_json::from_str(json)?;
        for (level, topics) in file.levels {
            self.entries
                .entry((file.language, level))
                .or_default()
                .extend(topics);
        }
        Ok(())
    }

    pub fn topics(&self, language: Language, level: Level) -> &[Topic] {
        self.entries
            .get(&(language, level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn topic(&self, language: Language, level: Level, idx: usize) -> Option<&Topic> {
        self.topics(language, level).get(idx)
    }

    /// Picks the index of a random topic, if the group has any.
    pub fn random_topic<R: Rng + ?Sized>(
        &self,
        language: Language,
        level: Level,
        rng: &mut R,
    ) -> Option<usize> {
        match self.topics(language, level).len() {
            0 => None,
            n => Some(rng.gen_range(0..n)),
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> {
        let mut languages: Vec<Language> = self.entries.keys().map(|(l, _)| *l).collect();
        languages.dedup();
        languages.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
