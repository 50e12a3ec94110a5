// ── Full-text search over catalog records ──
//
// Forward (prefix) tokenized inverted index. Every token is posted under
// each of its prefixes, so "udm" finds "UDMPRO" and "dream m" finds
// "Dream Machine". Records are stored alongside the postings so a hit can
// always be mapped back to a device id.

use std::collections::{BTreeSet, HashMap};

use strum::{Display, EnumIter, IntoEnumIterator};
use uidb_api::Device;

/// Which device attribute a piece of indexed text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SearchField {
    ProductName,
    Shortnames,
    LineName,
}

/// The stored half of the index: a device id and its searchable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub id: String,
    pub fields: Vec<(SearchField, String)>,
}

impl SearchRecord {
    /// Collect the searchable text of a device.
    pub fn from_device(device: &Device) -> Self {
        let mut fields = Vec::with_capacity(device.shortnames.len() + 2);
        fields.push((SearchField::ProductName, device.product.name.clone()));
        fields.extend(
            device
                .shortnames
                .iter()
                .map(|s| (SearchField::Shortnames, s.clone())),
        );
        fields.push((SearchField::LineName, device.line.name.clone()));
        Self {
            id: device.id.clone(),
            fields,
        }
    }
}

/// A text index the query engine can search without knowing its structure.
pub trait TextIndex {
    /// Add (or replace, by id) a record.
    fn add(&mut self, record: SearchRecord);

    /// Ids of all records matching `term`, each exactly once, in insertion
    /// order. An unmatched or untokenizable term yields an empty list.
    fn search(&self, term: &str) -> Vec<String>;
}

/// Split text into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every non-empty prefix of `token`, on char boundaries.
fn prefixes(token: &str) -> impl Iterator<Item = &str> {
    token
        .char_indices()
        .map(move |(i, c)| &token[..i + c.len_utf8()])
}

type Postings = HashMap<String, BTreeSet<usize>>;

/// Inverted index keyed by token prefix, one posting table per field.
///
/// A record matches a field when every query token is a prefix of some
/// token in that field; it matches the query when any field matches.
#[derive(Debug, Default, Clone)]
pub struct PrefixIndex {
    /// Slot per `add` call. Replaced records leave a `None` behind so slot
    /// numbers in the postings stay valid.
    records: Vec<Option<SearchRecord>>,
    slots: HashMap<String, usize>,
    postings: HashMap<SearchField, Postings>,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The stored record for an id.
    pub fn record(&self, id: &str) -> Option<&SearchRecord> {
        let slot = *self.slots.get(id)?;
        self.records.get(slot)?.as_ref()
    }

    /// Slots whose `field` text contains a prefix match for every token.
    fn field_hits(&self, field: SearchField, tokens: &[String]) -> BTreeSet<usize> {
        let Some(postings) = self.postings.get(&field) else {
            return BTreeSet::new();
        };

        let mut acc: Option<BTreeSet<usize>> = None;
        for token in tokens {
            let Some(slots) = postings.get(token) else {
                return BTreeSet::new();
            };
            acc = Some(match acc {
                None => slots.clone(),
                Some(prev) => prev.intersection(slots).copied().collect(),
            });
        }
        acc.unwrap_or_default()
    }
}

impl TextIndex for PrefixIndex {
    fn add(&mut self, record: SearchRecord) {
        let slot = self.records.len();
        if let Some(old) = self.slots.insert(record.id.clone(), slot) {
            if let Some(stale) = self.records.get_mut(old) {
                *stale = None;
            }
        }

        for (field, text) in &record.fields {
            let postings = self.postings.entry(*field).or_default();
            for token in tokenize(text) {
                for prefix in prefixes(&token) {
                    postings.entry(prefix.to_owned()).or_default().insert(slot);
                }
            }
        }

        self.records.push(Some(record));
    }

    fn search(&self, term: &str) -> Vec<String> {
        let tokens = tokenize(term);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut hits = BTreeSet::new();
        for field in SearchField::iter() {
            hits.extend(self.field_hits(field, &tokens));
        }

        hits.into_iter()
            .filter_map(|slot| self.records.get(slot)?.as_ref())
            .map(|record| record.id.clone())
            .collect()
    }
}
