use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(ItemId, i64);
id_newtype!(MessageId, Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinCategory {
    Plastic,
    Paper,
    Glass,
    Metal,
    Compost,
}

impl BinCategory {
    pub const ALL: [BinCategory; 5] = [
        BinCategory::Plastic,
        BinCategory::Paper,
        BinCategory::Glass,
        BinCategory::Metal,
        BinCategory::Compost,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BinCategory::Plastic => "Plastic Bin",
            BinCategory::Paper => "Paper Bin",
            BinCategory::Glass => "Glass Bin",
            BinCategory::Metal => "Metal Bin",
            BinCategory::Compost => "Compost Bin",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            BinCategory::Plastic => "plastic",
            BinCategory::Paper => "paper",
            BinCategory::Glass => "glass",
            BinCategory::Metal => "metal",
            BinCategory::Compost => "compost",
        }
    }
}

impl fmt::Display for BinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts `plastic`, `Plastic Bin`, `plastic_bin` and `plastic-bin`.
impl FromStr for BinCategory {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lower = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let name = lower
            .strip_suffix(" bin")
            .unwrap_or(lower.as_str())
            .trim();

        BinCategory::ALL
            .into_iter()
            .find(|category| category.short_name() == name)
            .ok_or_else(|| DomainError::UnknownCategory(raw.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecyclingEntry {
    pub keyword: String,
    pub instruction: String,
}

impl RecyclingEntry {
    pub fn new(keyword: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            instruction: instruction.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableItem {
    pub item_id: ItemId,
    pub icon: String,
    pub category: BinCategory,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_spellings() {
        assert_eq!("plastic".parse::<BinCategory>().unwrap(), BinCategory::Plastic);
        assert_eq!("Paper Bin".parse::<BinCategory>().unwrap(), BinCategory::Paper);
        assert_eq!(" glass_bin ".parse::<BinCategory>().unwrap(), BinCategory::Glass);
        assert_eq!("METAL-BIN".parse::<BinCategory>().unwrap(), BinCategory::Metal);
        assert_eq!("compost".parse::<BinCategory>().unwrap(), BinCategory::Compost);
    }

    #[test]
    fn rejects_unknown_category() {
        let err = "landfill".parse::<BinCategory>().expect_err("should fail");
        assert!(matches!(err, DomainError::UnknownCategory(name) if name == "landfill"));
    }

    #[test]
    fn category_round_trips_through_its_label() {
        for category in BinCategory::ALL {
            assert_eq!(category.label().parse::<BinCategory>().unwrap(), category);
        }
    }
}
