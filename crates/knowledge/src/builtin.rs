//! Knowledge shipped with the binary, used when no data file is configured
//! or the configured one cannot be loaded.

use shared::domain::{BinCategory, RecyclingEntry};

use crate::ItemSpec;

const ENTRIES: &[(&str, &str)] = &[
    ("plastic bottle", "Recycle in the Plastic Bin (rinse first!)."),
    ("newspaper", "Recycle in the Paper Bin."),
    ("glass bottle", "Recycle in the Glass Bin."),
    ("soda can", "Recycle in the Metal Bin."),
    ("can", "Recycle in the Metal Bin."),
    ("pizza box", "Recycle in the Compost Bin (if greasy)."),
];

const ITEMS: &[(&str, BinCategory, &str)] = &[
    ("🥤", BinCategory::Plastic, "Plastic Bottle"),
    ("🧴", BinCategory::Plastic, "Lotion Bottle"),
    ("🍶", BinCategory::Plastic, "Water Bottle"),
    ("🛍", BinCategory::Plastic, "Plastic Bag"),
    ("📏", BinCategory::Plastic, "Plastic Ruler"),
    ("🎤", BinCategory::Plastic, "Plastic Microphone Toy"),
    ("📰", BinCategory::Paper, "Newspaper"),
    ("📦", BinCategory::Paper, "Cardboard Box"),
    ("✉️", BinCategory::Paper, "Envelope"),
    ("📜", BinCategory::Paper, "Paper Scroll"),
    ("📕", BinCategory::Paper, "Book"),
    ("📄", BinCategory::Paper, "Loose Paper Sheet"),
    ("🍾", BinCategory::Glass, "Glass Bottle"),
    ("🏺", BinCategory::Glass, "Glass Jar"),
    ("🥛", BinCategory::Glass, "Glass Cup"),
    ("🥂", BinCategory::Glass, "Wine Glass"),
    ("🫙", BinCategory::Glass, "Mason Jar"),
    ("🍯", BinCategory::Glass, "Honey Jar"),
    ("🥫", BinCategory::Metal, "Aluminum Can"),
    ("🔩", BinCategory::Metal, "Bolt"),
    ("⚙️", BinCategory::Metal, "Gear"),
    ("🔧", BinCategory::Metal, "Wrench"),
    ("🔗", BinCategory::Metal, "Metal Chain"),
    ("🗝", BinCategory::Metal, "Metal Key"),
    ("🥄", BinCategory::Metal, "Metal Spoon"),
    ("🛎", BinCategory::Metal, "Small Bell"),
    ("🍎", BinCategory::Compost, "Apple Core"),
    ("🍌", BinCategory::Compost, "Banana Peel"),
    ("🥬", BinCategory::Compost, "Lettuce"),
    ("🥕", BinCategory::Compost, "Carrot"),
    ("🍄", BinCategory::Compost, "Mushroom"),
    ("🌽", BinCategory::Compost, "Corn Cob"),
    ("🥑", BinCategory::Compost, "Avocado Pit"),
];

pub(crate) fn entries() -> Vec<RecyclingEntry> {
    ENTRIES
        .iter()
        .map(|(keyword, instruction)| RecyclingEntry::new(*keyword, *instruction))
        .collect()
}

pub(crate) fn items() -> Vec<ItemSpec> {
    ITEMS
        .iter()
        .map(|(icon, category, description)| ItemSpec {
            icon: (*icon).to_string(),
            category: *category,
            description: (*description).to_string(),
        })
        .collect()
}
