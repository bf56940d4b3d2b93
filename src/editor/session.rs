use super::tools::{
    GestureOutcome, PaletteColor, StrokeRecorder, StrokeStyle, ToolError, PALETTE,
};
use crate::annotation::{
    AnnotationError, AnnotationResult, AnnotationStore, EntryField, EntryId,
    TimelineEntry,
};
use crate::assets::{AssetId, ImageBlob};
use crate::canvas::{render_asset, CompositeError, CompositeResult, CoordinateMapper, RasterSurface};
use crate::config::BoardConfig;
use crate::geometry::{Color, DisplayRect, ImagePoint, SurfaceSize};
use crate::input::{PointerEvent, PointerPhase, TouchPoint};

/// Native-size render of one entry's image with its strokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPreview {
    pub entry_id: EntryId,
    pub asset_id: AssetId,
    /// `None` when the image could not be decoded.
    pub surface: Option<RasterSurface>,
}

/// Host-facing controller tying the annotation store to the drawing tools.
///
/// The host forwards pointer events and layout changes, then asks for a fresh
/// composite whenever [`EditorSession::revision`] moves.
#[derive(Debug)]
pub struct EditorSession {
    store: AnnotationStore,
    recorder: StrokeRecorder,
    style: StrokeStyle,
    draw_mode: bool,
    draw_color: Color,
    selected_image: Option<AssetId>,
    native_size: Option<SurfaceSize>,
    display_rect: Option<DisplayRect>,
    editing_entry: Option<EntryId>,
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::with_config(BoardConfig::default())
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            store: AnnotationStore::new(),
            recorder: StrokeRecorder::new(),
            style: config.stroke_style,
            draw_mode: false,
            draw_color: config.default_color,
            selected_image: None,
            native_size: None,
            display_rect: None,
            editing_entry: None,
            revision: 0,
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // Timeline

    /// Adds an entry and puts it straight into edit mode.
    pub fn add_entry(&mut self) -> EntryId {
        let id = self.store.add_entry();
        self.editing_entry = Some(id);
        id
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Option<TimelineEntry> {
        if self.editing_entry == Some(id) {
            self.editing_entry = None;
        }
        let removed = self.store.remove_entry(id);
        if removed.is_some() {
            self.bump_revision();
        }
        removed
    }

    /// Time edits reorder previews, so a successful update moves the revision.
    pub fn update_field(&mut self, id: EntryId, field: EntryField) -> AnnotationResult<()> {
        self.store.update_field(id, field)?;
        self.bump_revision();
        Ok(())
    }

    pub fn upload_image(&mut self, id: EntryId, blob: ImageBlob) -> AnnotationResult<AssetId> {
        let asset_id = self.store.upload_image(id, blob)?;
        self.bump_revision();
        Ok(asset_id)
    }

    pub fn attach_image(&mut self, id: EntryId, asset_id: AssetId) -> AnnotationResult<()> {
        self.store.attach_image(id, asset_id)?;
        self.bump_revision();
        Ok(())
    }

    pub fn list_ordered(&self) -> Vec<&TimelineEntry> {
        self.store.list_ordered()
    }

    pub fn list_with_images(&self) -> Vec<&TimelineEntry> {
        self.store.list_with_images()
    }

    pub fn editing_entry(&self) -> Option<EntryId> {
        self.editing_entry
    }

    pub fn begin_editing(&mut self, id: EntryId) -> bool {
        if self.store.entry(id).is_none() {
            return false;
        }
        self.editing_entry = Some(id);
        true
    }

    pub fn finish_editing(&mut self) {
        self.editing_entry = None;
    }

    // Image editor

    pub fn selected_image(&self) -> Option<AssetId> {
        self.selected_image
    }

    /// Selects `asset_id` for drawing. Draw mode always starts off.
    pub fn open_image_editor(&mut self, asset_id: AssetId) -> AnnotationResult<()> {
        let asset = self
            .store
            .asset(asset_id)
            .ok_or(AnnotationError::AssetNotFound(asset_id))?;
        self.native_size = match asset.blob.dimensions() {
            Ok(size) => Some(size),
            Err(err) => {
                tracing::warn!(asset = %asset_id, ?err, "image dimensions unavailable; drawing disabled");
                None
            }
        };
        self.recorder.cancel(&mut self.store);
        self.selected_image = Some(asset_id);
        self.draw_mode = false;
        self.display_rect = None;
        self.bump_revision();
        tracing::debug!(asset = %asset_id, size = ?self.native_size, "image editor opened");
        Ok(())
    }

    pub fn close_image_editor(&mut self) {
        self.recorder.cancel(&mut self.store);
        let was_open = self.selected_image.take().is_some();
        self.native_size = None;
        self.display_rect = None;
        self.draw_mode = false;
        if was_open {
            self.bump_revision();
        }
    }

    pub fn native_size(&self) -> Option<SurfaceSize> {
        self.native_size
    }

    /// Records where the host currently shows the selected image.
    pub fn set_display_rect(&mut self, rect: DisplayRect) {
        self.display_rect = Some(rect);
    }

    pub fn mapper(&self) -> Option<CoordinateMapper> {
        Some(CoordinateMapper::new(self.display_rect?, self.native_size?))
    }

    pub fn draw_mode(&self) -> bool {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, enabled: bool) {
        if self.draw_mode != enabled {
            tracing::debug!(enabled, "draw mode changed");
        }
        self.draw_mode = enabled;
    }

    pub fn toggle_draw_mode(&mut self) -> bool {
        self.set_draw_mode(!self.draw_mode);
        self.draw_mode
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Applies to strokes started afterwards.
    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    pub fn palette(&self) -> &'static [PaletteColor] {
        &PALETTE
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.style.set_line_width(line_width);
        self.bump_revision();
    }

    pub fn is_drawing(&self) -> bool {
        self.recorder.is_drawing()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        let outcome = match event.phase {
            PointerPhase::Start => self.pointer_start(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::End => self.recorder.finish(&mut self.store, event.pointer),
        };
        if outcome.changes_pixels() {
            self.bump_revision();
        }
        outcome
    }

    /// Routes a touch-end, given the lifted touches and those still down.
    /// Returns the last outcome that was not `Ignored`.
    pub fn handle_touch_end(
        &mut self,
        changed: &[TouchPoint],
        remaining: &[TouchPoint],
    ) -> GestureOutcome {
        PointerEvent::touch_ends(changed, remaining)
            .into_iter()
            .map(|event| self.handle_pointer(event))
            .fold(GestureOutcome::Ignored, |seen, outcome| match outcome {
                GestureOutcome::Ignored => seen,
                outcome => outcome,
            })
    }

    fn pointer_start(&mut self, event: PointerEvent) -> GestureOutcome {
        if !self.draw_mode {
            return GestureOutcome::Ignored;
        }
        let Some(asset_id) = self.selected_image else {
            return GestureOutcome::Ignored;
        };
        let Some(start) = self.map_event(event) else {
            return GestureOutcome::Ignored;
        };
        self.recorder
            .begin(&mut self.store, asset_id, self.draw_color, start, event.pointer)
    }

    fn pointer_move(&mut self, event: PointerEvent) -> GestureOutcome {
        if !self.draw_mode {
            return GestureOutcome::Ignored;
        }
        let Some(point) = self.map_event(event) else {
            return GestureOutcome::Ignored;
        };
        match self.recorder.extend(&mut self.store, point, event.pointer) {
            Ok(outcome) => outcome,
            Err(ToolError::NoActiveStroke) => {
                tracing::trace!("pointer move without an active stroke");
                GestureOutcome::Ignored
            }
            Err(err) => {
                tracing::warn!(%err, "stroke extension failed");
                GestureOutcome::Ignored
            }
        }
    }

    fn map_event(&self, event: PointerEvent) -> Option<ImagePoint> {
        self.mapper()?.map(event.position?)
    }

    /// Removes every stroke on the selected image and stops any gesture on it.
    pub fn clear_drawings(&mut self) -> bool {
        let Some(asset_id) = self.selected_image else {
            return false;
        };
        self.recorder.cancel_for_asset(asset_id);
        let cleared = self.store.clear_strokes(asset_id);
        if cleared {
            tracing::debug!(asset = %asset_id, "drawings cleared");
            self.bump_revision();
        }
        cleared
    }

    /// Full redraw of the selected image, or `None` when nothing is selected.
    pub fn composite(&self) -> CompositeResult<Option<RasterSurface>> {
        let Some(asset_id) = self.selected_image else {
            return Ok(None);
        };
        self.render(asset_id).map(Some)
    }

    fn render(&self, asset_id: AssetId) -> CompositeResult<RasterSurface> {
        let asset = self
            .store
            .asset(asset_id)
            .ok_or(CompositeError::AssetNotFound(asset_id))?;
        render_asset(asset, self.store.strokes(asset_id), self.style)
    }

    /// One preview per entry with an image, in timeline order.
    pub fn render_previews(&self) -> Vec<EntryPreview> {
        self.store
            .list_with_images()
            .into_iter()
            .filter_map(|entry| {
                let asset_id = entry.image?;
                let surface = match self.render(asset_id) {
                    Ok(surface) => Some(surface),
                    Err(err) => {
                        tracing::warn!(entry = %entry.id, %err, "preview render failed");
                        None
                    }
                };
                Some(EntryPreview {
                    entry_id: entry.id,
                    asset_id,
                    surface,
                })
            })
            .collect()
    }
}
