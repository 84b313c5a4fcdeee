use crate::data::{CompanionRecord, ServiceKind};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub genres: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
    pub personalities: BTreeSet<String>,
    pub services: BTreeSet<ServiceKind>,
    pub online_only: bool,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of chips selected in the filters panel. Search text and the
    /// online toggle live outside the panel and are not counted.
    pub fn active_selection_count(&self) -> usize {
        self.genres.len() + self.platforms.len() + self.personalities.len() + self.services.len()
    }

    pub fn matches(&self, record: &CompanionRecord) -> bool {
        matches_search(&self.search_text, record)
            && matches_any(&self.genres, &record.genres)
            && matches_any(&self.platforms, &record.platforms)
            && matches_any(&self.personalities, &record.personalities)
            && matches_any(&self.services, &record.services)
            && matches_online(self.online_only, record)
    }
}

/// Records satisfying `criteria`, in dataset order.
pub fn filter_companions<'a>(
    records: &'a [CompanionRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a CompanionRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

pub fn matches_search(search_text: &str, record: &CompanionRecord) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    record.name.to_lowercase().contains(&needle) || record.bio.to_lowercase().contains(&needle)
}

/// True when nothing is selected or `values` shares at least one element with `selected`.
pub fn matches_any<T: Ord>(selected: &BTreeSet<T>, values: &[T]) -> bool {
    selected.is_empty() || values.iter().any(|value| selected.contains(value))
}

pub fn matches_online(online_only: bool, record: &CompanionRecord) -> bool {
    !online_only || record.is_online
}

/// Returns a copy of `set` with `item` removed if present, added otherwise.
pub fn toggle<T: Ord + Clone>(set: &BTreeSet<T>, item: T) -> BTreeSet<T> {
    let mut next = set.clone();
    if !next.remove(&item) {
        next.insert(item);
    }
    next
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::data::{CompanionRecord, PriceSchedule, ServiceKind};

    pub fn companion(id: &str, name: &str) -> CompanionRecord {
        CompanionRecord {
            id: id.to_string(),
            name: name.to_string(),
            bio: String::new(),
            avatar: String::new(),
            rating: 4.5,
            total_sessions: 0,
            is_online: false,
            is_verified: false,
            price_range: PriceSchedule::default(),
            genres: Vec::new(),
            platforms: Vec::new(),
            personalities: Vec::new(),
            services: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn yui_and_rin() -> Vec<CompanionRecord> {
        let mut yui = companion("a", "Yui");
        yui.is_online = true;
        yui.genres = vec!["shonen".to_string()];
        let mut rin = companion("b", "Rin");
        rin.genres = vec!["romance".to_string()];
        vec![yui, rin]
    }

    /// A record that passes every predicate of [`full_criteria`].
    pub fn full_match() -> CompanionRecord {
        let mut record = companion("full", "Akari");
        record.bio = "Maratona de isekai".to_string();
        record.is_online = true;
        record.genres = vec!["isekai".to_string()];
        record.platforms = vec!["crunchyroll".to_string()];
        record.personalities = vec!["calma".to_string()];
        record.services = vec![ServiceKind::Text, ServiceKind::Video];
        record
    }

    pub fn full_criteria() -> super::FilterCriteria {
        super::FilterCriteria {
            search_text: "MARATONA".to_string(),
            genres: ["isekai", "mecha"].iter().map(|s| s.to_string()).collect(),
            platforms: ["crunchyroll"].iter().map(|s| s.to_string()).collect(),
            personalities: ["calma"].iter().map(|s| s.to_string()).collect(),
            services: [ServiceKind::Video].into_iter().collect(),
            online_only: true,
        }
    }
}
