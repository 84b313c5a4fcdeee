use gloo_net::http::Request;
use log::{info, warn};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Text,
    Voice,
    Video,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Text, ServiceKind::Voice, ServiceKind::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Text => "text",
            ServiceKind::Voice => "voice",
            ServiceKind::Video => "video",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::Text => "Texto",
            ServiceKind::Voice => "Voz",
            ServiceKind::Video => "Vídeo",
        }
    }

    /// Label of the price tier; voice and video sessions always include text chat.
    pub fn tier_label(self) -> &'static str {
        match self {
            ServiceKind::Text => "Texto",
            ServiceKind::Voice => "Texto + Voz",
            ServiceKind::Video => "Texto + Vídeo",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ServiceKind::Text => "💬",
            ServiceKind::Voice => "🎤",
            ServiceKind::Video => "🎥",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(alias = "emoji", default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// `"{icon} {name}"`, or an empty string when `id` is not in the catalog.
    pub fn label(&self, id: &str) -> String {
        self.get(id)
            .map(|entry| format!("{} {}", entry.icon, entry.name))
            .unwrap_or_default()
    }

    pub fn icon(&self, id: &str) -> &str {
        self.get(id).map(|entry| entry.icon.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceSchedule {
    #[serde(deserialize_with = "null_as_zero")]
    pub text: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub voice: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub video: f64,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl PriceSchedule {
    /// Price of a tier, `None` when the service is not offered.
    pub fn price_for(&self, kind: ServiceKind) -> Option<f64> {
        let value = match kind {
            ServiceKind::Text => self.text,
            ServiceKind::Voice => self.voice,
            ServiceKind::Video => self.video,
        };
        (value > 0.0).then_some(value)
    }

    pub fn offered(&self) -> impl Iterator<Item = (ServiceKind, f64)> + '_ {
        ServiceKind::ALL
            .into_iter()
            .filter_map(move |kind| self.price_for(kind).map(|price| (kind, price)))
    }

    pub fn starting_price(&self) -> Option<f64> {
        self.offered().map(|(_, price)| price).reduce(f64::min)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub price_range: PriceSchedule,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default, alias = "personality")]
    pub personalities: Vec<String>,
    #[serde(default)]
    pub services: Vec<ServiceKind>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub genres: Catalog,
    #[serde(default)]
    pub platforms: Catalog,
    #[serde(default)]
    pub personalities: Catalog,
    #[serde(default)]
    pub companions: Vec<CompanionRecord>,
}

impl Dataset {
    /// Catalog references that point at no catalog entry, as
    /// `(companion id, catalog name, missing id)`.
    pub fn dangling_references(&self) -> Vec<(String, &'static str, String)> {
        let mut dangling = Vec::new();
        for companion in &self.companions {
            let groups = [
                ("genres", &self.genres, &companion.genres),
                ("platforms", &self.platforms, &companion.platforms),
                ("personalities", &self.personalities, &companion.personalities),
            ];
            for (catalog_name, catalog, ids) in groups {
                for id in ids.iter().filter(|id| !catalog.contains(id)) {
                    dangling.push((companion.id.clone(), catalog_name, id.clone()));
                }
            }
        }
        dangling
    }
}

#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    Network(String),
    Parse(String),
}

impl DataError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::NotFound(url) => write!(f, "Dataset not found at {}", url),
            DataError::Network(message) => write!(f, "Network error: {}", message),
            DataError::Parse(message) => write!(f, "Invalid dataset: {}", message),
        }
    }
}

impl std::error::Error for DataError {}

pub async fn fetch_dataset(url: &str) -> Result<Dataset, DataError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(DataError::network)?;

    if response.status() == 404 {
        return Err(DataError::NotFound(url.to_owned()));
    }

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            url
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    parse_dataset(&text)
}

pub fn parse_dataset(text: &str) -> Result<Dataset, DataError> {
    let mut dataset: Dataset = serde_json::from_str(text).map_err(DataError::parse)?;

    let mut seen = HashSet::new();
    for (index, companion) in dataset.companions.iter().enumerate() {
        if companion.id.trim().is_empty() {
            return Err(DataError::Parse(format!(
                "Companion {} has an empty id",
                index
            )));
        }
        if !seen.insert(companion.id.as_str()) {
            return Err(DataError::Parse(format!(
                "Duplicate companion id '{}'",
                companion.id
            )));
        }
    }

    for companion in &mut dataset.companions {
        let groups = [
            ("genres", &mut companion.genres),
            ("platforms", &mut companion.platforms),
            ("personalities", &mut companion.personalities),
        ];
        for (catalog, ids) in groups {
            for repeated in dedup_in_order(ids) {
                warn!(
                    "Companion '{}' lists {} entry '{}' more than once",
                    companion.id, catalog, repeated
                );
            }
        }
    }

    for (companion_id, catalog, missing) in dataset.dangling_references() {
        warn!(
            "Companion '{}' references unknown {} entry '{}'",
            companion_id, catalog, missing
        );
    }

    info!("Loaded {} companions", dataset.companions.len());
    Ok(dataset)
}

/// Keeps the first occurrence of every id; returns the dropped repeats.
fn dedup_in_order(ids: &mut Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    ids.retain(|id| {
        if seen.insert(id.clone()) {
            true
        } else {
            repeated.push(id.clone());
            false
        }
    });
    repeated
}

/// `R$ 15` for whole amounts, `R$ 15,50` otherwise.
pub fn format_price(currency: &str, value: f64) -> String {
    let amount = if value.fract().abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value).replace('.', ",")
    };
    format!("{} {}", currency, amount)
}
