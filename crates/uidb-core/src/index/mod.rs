// ── Device index ──
//
// Derived from the loaded device list and rebuilt from scratch whenever it
// changes: an id -> device map for O(1) lookups plus the text index used by
// the query engine.

mod text;

use std::collections::HashMap;
use std::sync::Arc;

use uidb_api::Device;

pub use text::{PrefixIndex, SearchField, SearchRecord, TextIndex, tokenize};

/// Lookup and search structures over one catalog snapshot.
#[derive(Debug, Clone)]
pub struct DeviceIndex<I = PrefixIndex> {
    by_id: HashMap<String, Arc<Device>>,
    search: I,
}

impl DeviceIndex<PrefixIndex> {
    /// Build the index with the default prefix text index.
    pub fn build(devices: &[Arc<Device>]) -> Self {
        Self::build_with(devices, PrefixIndex::new())
    }
}

impl<I: TextIndex> DeviceIndex<I> {
    /// Build the index on top of a caller-supplied (empty) text index.
    ///
    /// Single pass over `devices`; when two records share an id the later
    /// one wins in both the map and the text index.
    pub fn build_with(devices: &[Arc<Device>], mut search: I) -> Self {
        let mut by_id = HashMap::with_capacity(devices.len());
        for device in devices {
            search.add(SearchRecord::from_device(device));
            by_id.insert(device.id.clone(), Arc::clone(device));
        }
        Self { by_id, search }
    }

    /// Look a device up by id.
    pub fn lookup(&self, id: &str) -> Option<Arc<Device>> {
        self.by_id.get(id).cloned()
    }

    /// Ids matching a free-text term, deduplicated.
    pub fn search(&self, term: &str) -> Vec<String> {
        self.search.search(term)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device(id: &str, name: &str, shortnames: &[&str], line_id: &str) -> Arc<Device> {
        Arc::new(
            serde_json::from_value(json!({
                "id": id,
                "line": { "id": line_id, "name": line_id.replace('-', " ") },
                "product": { "name": name, "abbrev": "" },
                "shortnames": shortnames,
            }))
            .unwrap(),
        )
    }

    #[test]
    fn every_device_is_reachable_by_id() {
        let devices = vec![
            device("a", "Dream Machine", &["UDM"], "unifi-network"),
            device("b", "G4 Bullet", &[], "unifi-protect"),
            device("c", "Access Hub", &["UAHUB"], "unifi-access"),
        ];
        let index = DeviceIndex::build(&devices);
        for d in &devices {
            assert_eq!(index.lookup(&d.id).as_ref(), Some(d));
        }
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn last_duplicate_id_wins() {
        let devices = vec![
            device("a", "First", &[], "unifi-network"),
            device("a", "Second", &[], "unifi-network"),
        ];
        let index = DeviceIndex::build(&devices);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("a").unwrap().product.name, "Second");
        assert!(index.search("first").is_empty());
        assert_eq!(index.search("second"), vec!["a"]);
    }

    #[test]
    fn unknown_id_is_none() {
        let index = DeviceIndex::build(&[device("a", "Dream Machine", &[], "x")]);
        assert!(index.lookup("missing").is_none());
    }

    #[test]
    fn searches_all_three_fields() {
        let devices = vec![
            device("a", "Dream Machine", &["UDMPRO"], "unifi-network"),
            device("b", "G4 Bullet", &[], "unifi-protect"),
        ];
        let index = DeviceIndex::build(&devices);
        assert_eq!(index.search("dream"), vec!["a"]);
        assert_eq!(index.search("udmp"), vec!["a"]);
        assert_eq!(index.search("protect"), vec!["b"]);
    }
}
