use std::collections::{BTreeMap, HashMap};

use super::{AnnotationError, AnnotationResult, EntryField, EntryId, TimelineEntry};
use crate::assets::{AssetId, ImageAsset, ImageBlob};
use crate::editor::tools::Stroke;
use crate::timecode;

/// Sole owner of entries, assets and strokes for one editing session.
///
/// Assets are never removed: entries only hold their ids, and several
/// entries may point at the same asset.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    entries: Vec<TimelineEntry>,
    assets: BTreeMap<AssetId, ImageAsset>,
    strokes: HashMap<AssetId, Vec<Stroke>>,
    next_entry_id: u64,
    next_asset_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            next_entry_id: 1,
            next_asset_id: 1,
            ..Self::default()
        }
    }

    fn allocate_entry_id(&mut self) -> EntryId {
        let id = EntryId::from_raw(self.next_entry_id.max(1));
        self.next_entry_id = id.raw().saturating_add(1);
        id
    }

    fn allocate_asset_id(&mut self) -> AssetId {
        let id = AssetId::from_raw(self.next_asset_id.max(1));
        self.next_asset_id = id.raw().saturating_add(1);
        id
    }

    fn entry_mut(&mut self, id: EntryId) -> AnnotationResult<&mut TimelineEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(AnnotationError::EntryNotFound(id))
    }

    pub fn add_entry(&mut self) -> EntryId {
        let id = self.allocate_entry_id();
        self.entries.push(TimelineEntry::new(id));
        tracing::debug!(entry = %id, "timeline entry added");
        id
    }

    /// Removes the entry. Its image asset and strokes stay in the store.
    pub fn remove_entry(&mut self, id: EntryId) -> Option<TimelineEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(index);
        tracing::debug!(entry = %id, "timeline entry removed");
        Some(removed)
    }

    pub fn update_field(&mut self, id: EntryId, field: EntryField) -> AnnotationResult<()> {
        let name = field.name();
        self.entry_mut(id)?.apply(field);
        tracing::trace!(entry = %id, field = name, "timeline entry field updated");
        Ok(())
    }

    /// Points the entry at `asset_id` and makes sure a stroke collection exists for it.
    pub fn attach_image(&mut self, id: EntryId, asset_id: AssetId) -> AnnotationResult<()> {
        self.entry_mut(id)?.image = Some(asset_id);
        self.strokes.entry(asset_id).or_default();
        Ok(())
    }

    /// Registers an uploaded blob with a fresh, empty stroke collection.
    pub fn insert_asset(&mut self, blob: ImageBlob) -> AssetId {
        let id = self.allocate_asset_id();
        tracing::debug!(asset = %id, bytes = blob.len(), "image asset registered");
        self.assets.insert(id, ImageAsset::new(id, blob));
        self.strokes.insert(id, Vec::new());
        id
    }

    /// Completes an upload for an entry: new asset, attached, with no strokes.
    /// Any previously attached asset stays in the arena.
    pub fn upload_image(&mut self, id: EntryId, blob: ImageBlob) -> AnnotationResult<AssetId> {
        self.entry_mut(id)?;
        let asset_id = self.insert_asset(blob);
        self.attach_image(id, asset_id)?;
        Ok(asset_id)
    }

    pub fn entry(&self, id: EntryId) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn asset(&self, id: AssetId) -> Option<&ImageAsset> {
        self.assets.get(&id)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Entries sorted by parsed time, ties and malformed times in insertion order.
    pub fn list_ordered(&self) -> Vec<&TimelineEntry> {
        let mut keyed = self
            .entries
            .iter()
            .map(|entry| (entry.time.seconds(), entry))
            .collect::<Vec<_>>();
        keyed.sort_by(|a, b| timecode::compare_seconds(a.0, b.0));
        keyed.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Ordered entries whose image reference resolves to a stored asset.
    pub fn list_with_images(&self) -> Vec<&TimelineEntry> {
        self.list_ordered()
            .into_iter()
            .filter(|entry| {
                entry
                    .image
                    .is_some_and(|asset_id| self.assets.contains_key(&asset_id))
            })
            .collect()
    }

    pub fn has_stroke_collection(&self, asset_id: AssetId) -> bool {
        self.strokes.contains_key(&asset_id)
    }

    pub fn strokes(&self, asset_id: AssetId) -> &[Stroke] {
        self.strokes
            .get(&asset_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Direct access to an asset's collection for edits made outside a
    /// gesture. `None` when the asset has no collection.
    pub fn strokes_mut(&mut self, asset_id: AssetId) -> Option<&mut Vec<Stroke>> {
        self.strokes.get_mut(&asset_id)
    }

    pub(crate) fn stroke_mut(&mut self, asset_id: AssetId, index: usize) -> Option<&mut Stroke> {
        self.strokes_mut(asset_id)?.get_mut(index)
    }

    /// Appends a stroke and returns its index within the asset's collection.
    pub(crate) fn push_stroke(&mut self, asset_id: AssetId, stroke: Stroke) -> usize {
        let collection = self.strokes.entry(asset_id).or_default();
        collection.push(stroke);
        collection.len() - 1
    }

    /// Empties the asset's stroke collection. Returns `false` when the asset
    /// has no collection at all.
    pub fn clear_strokes(&mut self, asset_id: AssetId) -> bool {
        match self.strokes.get_mut(&asset_id) {
            Some(collection) => {
                let cleared = collection.len();
                collection.clear();
                tracing::debug!(asset = %asset_id, cleared, "stroke collection cleared");
                true
            }
            None => false,
        }
    }
}
