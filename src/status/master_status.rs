use super::part_status::{MasterStatusItem, PartStatus};
use crate::host::{PartId, VesselId};
use crate::{error, event};
use std::collections::HashMap;
use strum_macros::Display;

/// Outcome of writing one part row into the table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum PartUpsert {
    /// The vessel had no row yet and was created with this part.
    NewVessel,
    Appended,
    Replaced,
    /// Several rows shared the part id; the first was replaced and this many extras dropped.
    Coalesced(usize),
}

/// Transient view of every tracked vessel's parts, keyed by vessel id.
///
/// Derived from live telemetry only and never persisted.
#[derive(Debug, Default)]
pub struct MasterStatus {
    items: HashMap<VesselId, MasterStatusItem>,
}

impl MasterStatus {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, id: VesselId) -> Option<&MasterStatusItem> { self.items.get(&id) }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &MasterStatusItem> { self.items.values() }
    pub fn vessel_ids(&self) -> Vec<VesselId> { self.items.keys().copied().collect() }

    pub fn part(&self, vessel: VesselId, part: PartId) -> Option<&PartStatus> {
        self.items.get(&vessel)?.all_parts_status.iter().find(|p| p.part_id == part)
    }

    /// Inserts or replaces the row of `status.part_id` on `vessel_id`.
    ///
    /// Replacement is decided by part id only and keeps the row's position. A row's highlight
    /// flag survives replacement. Duplicate rows are collapsed into the first one.
    pub fn update_part(&mut self, vessel_id: VesselId, vessel_name: &str, mut status: PartStatus) -> PartUpsert {
        let Some(item) = self.items.get_mut(&vessel_id) else {
            event!("Adding new vessel {vessel_name} and part {} to master status", status.part_name);
            self.items.insert(
                vessel_id,
                MasterStatusItem {
                    vessel_id,
                    vessel_name: vessel_name.to_string(),
                    all_parts_status: vec![status],
                },
            );
            return PartUpsert::NewVessel;
        };

        let parts = &mut item.all_parts_status;
        let part_id = status.part_id;
        let matches = parts.iter().filter(|p| p.part_id == part_id).count();
        let Some(first) = parts.iter().position(|p| p.part_id == part_id) else {
            event!("Adding new part {} to master status", status.part_name);
            parts.push(status);
            return PartUpsert::Appended;
        };

        status.highlight_part = parts[first].highlight_part;
        parts[first] = status;
        if matches == 1 {
            return PartUpsert::Replaced;
        }

        error!("Found {matches} matching parts with id {part_id} in master status of {vessel_name}!");
        let mut seen = false;
        parts.retain(|p| {
            if p.part_id != part_id {
                return true;
            }
            let keep = !seen;
            seen = true;
            keep
        });
        PartUpsert::Coalesced(matches - 1)
    }

    /// Toggles the UI highlight of a part row. Returns `false` if there is no such row.
    pub fn set_highlight(&mut self, vessel: VesselId, part: PartId, highlight: bool) -> bool {
        let row = self
            .items
            .get_mut(&vessel)
            .and_then(|item| item.all_parts_status.iter_mut().find(|p| p.part_id == part));
        match row {
            Some(p) => {
                p.highlight_part = highlight;
                true
            }
            None => false,
        }
    }

    pub(crate) fn retain_vessels<F: FnMut(&MasterStatusItem) -> bool>(&mut self, mut keep: F) {
        self.items.retain(|_, item| keep(item));
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut MasterStatusItem> { self.items.values_mut() }

    #[cfg(test)]
    pub(crate) fn push_raw(&mut self, vessel_id: VesselId, status: PartStatus) {
        if let Some(item) = self.items.get_mut(&vessel_id) {
            item.all_parts_status.push(status);
        }
    }
}
