// Catalog feed types
//
// Models for the public UniFi device database (`public.json`). The feed is
// loosely versioned, so everything beyond `id` is optional or defaulted and
// unknown fields are kept in `extra` maps instead of being dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Response ─────────────────────────────────────────────────────────

/// Top-level payload served by the catalog feed.
///
/// ```json
/// { "version": "...", "devices": [ { "id": "...", ... } ] }
/// ```
///
/// `devices` is required: a JSON error object served with a 200 must not
/// decode as an empty catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub devices: Vec<Device>,
    #[serde(default)]
    pub version: String,
}

// ── Device ───────────────────────────────────────────────────────────

/// A single catalog entry (one SKU).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub line: Line,
    #[serde(default)]
    pub product: Product,
    #[serde(default)]
    pub shortnames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbrev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Images>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unifi: Option<UnifiAttributes>,
    /// Catch-all for fields the catalog core does not interpret
    /// (`sku`, `sysid`, `guids`, `compliance`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// Hash of the default product image, if the feed has one.
    pub fn image_hash(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.default.as_deref())
            .filter(|h| !h.is_empty())
    }

    /// SKU as reported by the feed.
    pub fn sku(&self) -> Option<String> {
        self.extra_scalar("sku")
    }

    /// System id as reported by the feed.
    pub fn sysid(&self) -> Option<String> {
        self.extra_scalar("sysid")
    }

    /// Render a passthrough field as text when it is a string or number.
    pub fn extra_scalar(&self, key: &str) -> Option<String> {
        match self.extra.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn network(&self) -> Option<&NetworkAttributes> {
        self.unifi.as_ref()?.network.as_ref()
    }
}

/// Product line (family) a device belongs to. `id` is the stable filter key,
/// `name` is for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbrev: String,
}

/// Image hashes keyed by variant. Only `default` is used for thumbnails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

// ── Technical attributes ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkAttributes>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_ports: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethernet_max_speed_megabits_per_second: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Power>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Power {
    /// PoE budget in watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_device_uses_defaults() {
        let device: Device = serde_json::from_value(json!({ "id": "abc" })).unwrap();
        assert_eq!(device.id, "abc");
        assert!(device.shortnames.is_empty());
        assert_eq!(device.line, Line::default());
        assert!(device.image_hash().is_none());
    }

    #[test]
    fn unknown_fields_pass_through() {
        let raw = json!({
            "id": "abc",
            "sku": "UDM-Pro",
            "sysid": 59936,
            "guids": ["x"],
            "shortnames": ["UDMPRO"],
            "line": { "id": "unifi-network", "name": "UniFi" },
            "product": { "name": "Dream Machine Pro", "abbrev": "UDM-Pro" }
        });
        let device: Device = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(device.sku().as_deref(), Some("UDM-Pro"));
        assert_eq!(device.sysid().as_deref(), Some("59936"));
        assert_eq!(serde_json::to_value(&device).unwrap(), raw);
    }

    #[test]
    fn network_attributes_are_camel_case() {
        let device: Device = serde_json::from_value(json!({
            "id": "abc",
            "unifi": { "network": {
                "numberOfPorts": 8,
                "ethernetMaxSpeedMegabitsPerSecond": 2500,
                "power": { "capacity": 60.0 }
            }}
        }))
        .unwrap();
        let net = device.network().unwrap();
        assert_eq!(net.number_of_ports, Some(8));
        assert_eq!(net.ethernet_max_speed_megabits_per_second, Some(2500));
        let capacity = net.power.as_ref().and_then(|p| p.capacity).unwrap();
        assert!((capacity - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn catalog_without_devices_is_rejected() {
        assert!(serde_json::from_value::<CatalogResponse>(json!({ "error": "maintenance" })).is_err());
        assert!(serde_json::from_value::<CatalogResponse>(json!({})).is_err());

        let empty: CatalogResponse = serde_json::from_value(json!({ "devices": [] })).unwrap();
        assert!(empty.devices.is_empty());
        assert_eq!(empty.version, "");
    }

    #[test]
    fn empty_image_hash_means_no_image() {
        let device: Device =
            serde_json::from_value(json!({ "id": "abc", "images": { "default": "" } })).unwrap();
        assert!(device.image_hash().is_none());
    }
}
