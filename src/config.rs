use log::warn;
use web_sys::window;

const DATASET_URL_META: &str = "companion-dataset-url";
const CURRENCY_META: &str = "companion-currency";
const CARD_GENRES_META: &str = "companion-card-genres";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset_url: String,
    pub currency_symbol: String,
    /// Genre icons shown on an explore card.
    pub card_genre_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_url: "/assets/companions.json".to_string(),
            currency_symbol: "R$".to_string(),
            card_genre_limit: 3,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `<meta name=".." content="..">` tags of the host page.
    pub fn from_document() -> Self {
        Self::default().with_overrides(meta_content)
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = non_blank(lookup(DATASET_URL_META)) {
            self.dataset_url = url;
        }
        if let Some(symbol) = non_blank(lookup(CURRENCY_META)) {
            self.currency_symbol = symbol;
        }
        if let Some(raw) = non_blank(lookup(CARD_GENRES_META)) {
            match raw.parse::<usize>() {
                Ok(limit) => self.card_genre_limit = limit,
                Err(err) => warn!(
                    "Ignoring {} = '{}': {}; keeping {}",
                    CARD_GENRES_META, raw, err, self.card_genre_limit
                ),
            }
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn meta_content(name: &str) -> Option<String> {
    let document = window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name='{}']", name))
        .ok()
        .flatten()?;
    element.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_meta_tags() {
        let config = AppConfig::default().with_overrides(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.dataset_url, "/assets/companions.json");
    }

    #[test]
    fn meta_tags_override_defaults() {
        let config = AppConfig::default().with_overrides(lookup(&[
            (DATASET_URL_META, " /data/alt.json "),
            (CURRENCY_META, "US$"),
            (CARD_GENRES_META, "5"),
        ]));
        assert_eq!(config.dataset_url, "/data/alt.json");
        assert_eq!(config.currency_symbol, "US$");
        assert_eq!(config.card_genre_limit, 5);
    }

    #[test]
    fn bad_or_blank_values_fall_back() {
        let config = AppConfig::default().with_overrides(lookup(&[
            (CURRENCY_META, "   "),
            (CARD_GENRES_META, "many"),
        ]));
        assert_eq!(config, AppConfig::default());
    }
}
