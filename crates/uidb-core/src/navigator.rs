// ── Sequential navigation ──
//
// Previous/next over the full, load-ordered catalog. Navigation ignores the
// current search and line filter on purpose: the detail view walks the whole
// catalog.

use std::sync::Arc;

use uidb_api::Device;

/// Devices adjacent to the one being viewed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighbors {
    pub previous: Option<Arc<Device>>,
    pub next: Option<Arc<Device>>,
}

impl Neighbors {
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

/// Neighbors of `current_id` within `devices`.
///
/// An id that is not present yields no neighbors at all; the caller shows a
/// "not found" state instead of navigating. With duplicate ids the first
/// occurrence is used.
pub fn neighbors(devices: &[Arc<Device>], current_id: &str) -> Neighbors {
    let Some(pos) = devices.iter().position(|d| d.id == current_id) else {
        return Neighbors::default();
    };

    Neighbors {
        previous: pos.checked_sub(1).and_then(|i| devices.get(i)).cloned(),
        next: devices.get(pos + 1).cloned(),
    }
}
