use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize};
use shared::{
    domain::{BinCategory, ItemId, RecyclingEntry, SortableItem},
    error::DomainError,
};
use thiserror::Error;
use tracing::{info, warn};

mod builtin;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read data file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse data file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid keyword entry #{index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: DomainError,
    },
    #[error("duplicate keyword '{0}'")]
    DuplicateKeyword(String),
    #[error("item #{index} has an empty description")]
    EmptyDescription { index: usize },
    #[error("the [[entries]] section is present but empty")]
    NoEntries,
    #[error("the [[items]] section is present but empty")]
    NoItems,
}

/// One `[[items]]` row of a data file. Ids are assigned on load, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub icon: String,
    #[serde(deserialize_with = "category_from_str")]
    pub category: BinCategory,
    pub description: String,
}

fn category_from_str<'de, D>(deserializer: D) -> Result<BinCategory, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// On-disk layout. A missing section keeps the built-in one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<RecyclingEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemSpec>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    Builtin,
    Inline,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<RecyclingEntry>,
    items: Vec<SortableItem>,
    source: KnowledgeSource,
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self::assemble(builtin::entries(), builtin::items(), KnowledgeSource::Builtin)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, KnowledgeError> {
        let data: DataFile = toml::from_str(raw)?;
        Self::from_data(data, KnowledgeSource::Inline)
    }

    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let raw = fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data: DataFile = toml::from_str(&raw)?;
        let knowledge = Self::from_data(data, KnowledgeSource::File(path.to_path_buf()))?;
        info!(
            path = %path.display(),
            entries = knowledge.entries.len(),
            items = knowledge.items.len(),
            "loaded recycling data file"
        );
        Ok(knowledge)
    }

    /// Loads `path` when given; any failure is logged and the built-in data is used instead.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::load(path) {
            Ok(knowledge) => knowledge,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "falling back to built-in recycling data"
                );
                Self::builtin()
            }
        }
    }

    fn from_data(data: DataFile, source: KnowledgeSource) -> Result<Self, KnowledgeError> {
        let entries = match data.entries {
            Some(entries) => validate_entries(entries)?,
            None => builtin::entries(),
        };
        let items = match data.items {
            Some(items) => validate_items(items)?,
            None => builtin::items(),
        };
        Ok(Self::assemble(entries, items, source))
    }

    fn assemble(entries: Vec<RecyclingEntry>, items: Vec<ItemSpec>, source: KnowledgeSource) -> Self {
        let items = items
            .into_iter()
            .zip(1..)
            .map(|(row, id)| SortableItem {
                item_id: ItemId(id),
                icon: row.icon,
                category: row.category,
                description: row.description,
            })
            .collect();

        Self {
            entries,
            items,
            source,
        }
    }

    /// Keyword entries in declared order.
    pub fn entries(&self) -> &[RecyclingEntry] {
        &self.entries
    }

    pub fn items(&self) -> &[SortableItem] {
        &self.items
    }

    pub fn source(&self) -> &KnowledgeSource {
        &self.source
    }

    pub fn to_data_file(&self) -> DataFile {
        DataFile {
            entries: Some(self.entries.clone()),
            items: Some(
                self.items
                    .iter()
                    .map(|item| ItemSpec {
                        icon: item.icon.clone(),
                        category: item.category,
                        description: item.description.clone(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(&self.to_data_file())?)
    }
}

pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn validate_entries(entries: Vec<RecyclingEntry>) -> Result<Vec<RecyclingEntry>, KnowledgeError> {
    if entries.is_empty() {
        return Err(KnowledgeError::NoEntries);
    }

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let keyword = normalize_keyword(&entry.keyword);
        if keyword.is_empty() {
            return Err(KnowledgeError::InvalidEntry {
                index,
                source: DomainError::EmptyKeyword,
            });
        }
        let instruction = entry.instruction.trim();
        if instruction.is_empty() {
            return Err(KnowledgeError::InvalidEntry {
                index,
                source: DomainError::EmptyInstruction(keyword),
            });
        }
        if !seen.insert(keyword.clone()) {
            return Err(KnowledgeError::DuplicateKeyword(keyword));
        }
        validated.push(RecyclingEntry::new(keyword, instruction));
    }
    Ok(validated)
}

fn validate_items(items: Vec<ItemSpec>) -> Result<Vec<ItemSpec>, KnowledgeError> {
    if items.is_empty() {
        return Err(KnowledgeError::NoItems);
    }

    for (index, item) in items.iter().enumerate() {
        if item.description.trim().is_empty() {
            return Err(KnowledgeError::EmptyDescription { index });
        }
    }
    Ok(items)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
