//! Media placeholders inside slide content and their reconciliation.
//!
//! A placeholder is any JSON object carrying `__image_prompt__` or
//! `__icon_query__`; the provisioned URL sits next to it in `__image_url__` or
//! `__icon_url__`. Placeholders are matched across revisions by kind + prompt.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;

use crate::models::asset::{AssetChanges, AssetKind, NewAsset};

const IMAGE_PROMPT_KEY: &str = "__image_prompt__";
const IMAGE_URL_KEY: &str = "__image_url__";
const ICON_QUERY_KEY: &str = "__icon_query__";
const ICON_URL_KEY: &str = "__icon_url__";

#[derive(Debug, thiserror::Error)]
#[error("Failed to provision {kind} for '{prompt}': {reason}")]
pub struct AssetError {
    pub kind: &'static str,
    pub prompt: String,
    pub reason: String,
}

/// Turns a placeholder prompt into a media URL.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn provision(&self, kind: AssetKind, prompt: &str) -> Result<String, AssetError>;
}

/// Hands out fixed placeholder URLs.
pub struct PlaceholderAssetProvider {
    pub image_url: String,
    pub icon_url: String,
}

#[async_trait]
impl AssetProvider for PlaceholderAssetProvider {
    async fn provision(&self, kind: AssetKind, _prompt: &str) -> Result<String, AssetError> {
        Ok(match kind {
            AssetKind::Image => self.image_url.clone(),
            AssetKind::Icon => self.icon_url.clone(),
        })
    }
}

fn keys(kind: AssetKind) -> (&'static str, &'static str) {
    match kind {
        AssetKind::Image => (IMAGE_PROMPT_KEY, IMAGE_URL_KEY),
        AssetKind::Icon => (ICON_QUERY_KEY, ICON_URL_KEY),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: AssetKind,
    pub prompt: String,
    pub url: Option<String>,
}

/// Every placeholder in `content`, depth first, in document order.
pub fn collect_placeholders(content: &Value) -> Vec<Placeholder> {
    let mut found = Vec::new();
    collect_into(content, &mut found);
    found
}

fn collect_into(value: &Value, found: &mut Vec<Placeholder>) {
    match value {
        Value::Object(map) => {
            for kind in [AssetKind::Image, AssetKind::Icon] {
                let (prompt_key, url_key) = keys(kind);
                if let Some(prompt) = map.get(prompt_key).and_then(Value::as_str) {
                    found.push(Placeholder {
                        kind,
                        prompt: prompt.to_string(),
                        url: map.get(url_key).and_then(Value::as_str).map(str::to_string),
                    });
                }
            }
            for child in map.values() {
                collect_into(child, found);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_into(item, found)),
        _ => {}
    }
}

fn fill_urls(value: &mut Value, resolved: &HashMap<(AssetKind, String), String>) {
    match value {
        Value::Object(map) => {
            for kind in [AssetKind::Image, AssetKind::Icon] {
                let (prompt_key, url_key) = keys(kind);
                let prompt = map.get(prompt_key).and_then(Value::as_str).map(str::to_string);
                if let Some(url) = prompt.and_then(|p| resolved.get(&(kind, p))) {
                    map.insert(url_key.to_string(), Value::String(url.clone()));
                }
            }
            for child in map.values_mut() {
                fill_urls(child, resolved);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|item| fill_urls(item, resolved)),
        _ => {}
    }
}

/// Diff the placeholders of `old` against `new`, provision the ones that are
/// new, and write every resolved URL into `new`.
///
/// Placeholders kept from `old` reuse its URL. A kept placeholder that never
/// got a URL has no asset behind it, so it is provisioned like a new one.
/// Placeholders only in `old` are reported in [`AssetChanges::removed`].
pub async fn reconcile_assets(
    provider: &dyn AssetProvider,
    old: &Value,
    new: &mut Value,
) -> Result<AssetChanges, AssetError> {
    let old_placeholders = collect_placeholders(old);
    let new_placeholders = collect_placeholders(new);

    let known: HashMap<(AssetKind, String), String> = old_placeholders
        .iter()
        .filter_map(|p| p.url.clone().map(|url| ((p.kind, p.prompt.clone()), url)))
        .collect();

    let mut changes = AssetChanges::default();
    let mut resolved: HashMap<(AssetKind, String), String> = HashMap::new();

    for p in &new_placeholders {
        let key = (p.kind, p.prompt.clone());
        if resolved.contains_key(&key) {
            continue;
        }
        let url = match known.get(&key) {
            Some(url) => url.clone(),
            None => {
                let url = provider.provision(p.kind, &p.prompt).await?;
                changes.created.push(NewAsset {
                    kind: p.kind,
                    prompt: p.prompt.clone(),
                    url: url.clone(),
                });
                url
            }
        };
        resolved.insert(key, url);
    }

    let mut seen_removed = HashSet::new();
    for p in old_placeholders {
        let key = (p.kind, p.prompt);
        if !resolved.contains_key(&key) && seen_removed.insert(key.clone()) {
            changes.removed.push(key);
        }
    }

    fill_urls(new, &resolved);
    Ok(changes)
}
