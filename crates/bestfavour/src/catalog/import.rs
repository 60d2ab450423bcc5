use super::domain::{Listing, ListingId};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

const TAG_SEPARATOR: char = '|';

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read listing catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing catalog CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads listings from a CSV export.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Listing>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut listings = Vec::new();
        for row in csv_reader.deserialize::<ListingRow>() {
            listings.push(row?.into_listing());
        }

        tracing::info!(count = listings.len(), "imported listing catalog");
        Ok(listings)
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: u32,
    title: String,
    provider: String,
    rating: f32,
    #[serde(default)]
    reviews: u32,
    price: f64,
    #[serde(default)]
    price_unit: String,
    #[serde(default)]
    location: String,
    distance: f64,
    #[serde(default)]
    availability: String,
    #[serde(default, deserialize_with = "split_tags")]
    tags: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        Listing {
            id: ListingId(self.id),
            title: self.title,
            provider: self.provider,
            rating: self.rating,
            reviews: self.reviews,
            price: self.price,
            price_unit: self.price_unit,
            location: self.location,
            distance: self.distance,
            availability: self.availability,
            tags: self.tags,
            description: self.description,
            image: self.image,
        }
    }
}

fn split_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| {
            value
                .split(TAG_SEPARATOR)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}
