use super::{Stroke, ToolError};
use crate::annotation::AnnotationStore;
use crate::assets::AssetId;
use crate::geometry::{Color, ImagePoint};
use crate::input::{same_pointer, PointerId};
use crate::state::{GestureEvent, GestureMachine, GestureState};

/// Names the stroke a gesture is writing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeHandle {
    pub asset_id: AssetId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Started(StrokeHandle),
    Extended,
    Finished,
    Cancelled,
    Ignored,
}

impl GestureOutcome {
    /// Whether stroke data changed in a way that affects rendered pixels.
    pub const fn changes_pixels(self) -> bool {
        matches!(self, Self::Started(_) | Self::Extended)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveStroke {
    handle: StrokeHandle,
    pointer: Option<PointerId>,
}

/// Captures one pointer gesture at a time into a stroke of the target image.
///
/// The recorder holds an explicit handle to the stroke it is extending, set
/// on start and dropped on end, cancel or clear.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    machine: GestureMachine,
    active: Option<ActiveStroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    pub fn is_drawing(&self) -> bool {
        self.machine.state() == GestureState::Drawing
    }

    pub fn active_handle(&self) -> Option<StrokeHandle> {
        self.active.map(|active| active.handle)
    }

    pub fn active_asset(&self) -> Option<AssetId> {
        self.active.map(|active| active.handle.asset_id)
    }

    /// Opens a new stroke on `asset_id`. A start while another gesture is
    /// active (a second pointer) is ignored.
    pub fn begin(
        &mut self,
        store: &mut AnnotationStore,
        asset_id: AssetId,
        color: Color,
        start: ImagePoint,
        pointer: Option<PointerId>,
    ) -> GestureOutcome {
        if !self.machine.can_transition(GestureEvent::Start) {
            tracing::debug!(
                ?pointer,
                machine = %self.machine,
                "gesture start ignored while another stroke is active"
            );
            return GestureOutcome::Ignored;
        }
        if let Err(err) = self.machine.transition(GestureEvent::Start) {
            tracing::warn!(%err, "gesture start rejected");
            return GestureOutcome::Ignored;
        }

        let index = store.push_stroke(asset_id, Stroke::new(color, start));
        let handle = StrokeHandle { asset_id, index };
        self.active = Some(ActiveStroke { handle, pointer });
        tracing::debug!(asset = %asset_id, index, %color, "stroke started");
        GestureOutcome::Started(handle)
    }

    /// Appends a point to the active stroke.
    pub fn extend(
        &mut self,
        store: &mut AnnotationStore,
        point: ImagePoint,
        pointer: Option<PointerId>,
    ) -> Result<GestureOutcome, ToolError> {
        let active = self.active.ok_or(ToolError::NoActiveStroke)?;
        if !same_pointer(pointer, active.pointer) {
            return Ok(GestureOutcome::Ignored);
        }
        self.machine
            .transition(GestureEvent::Move)
            .map_err(|_| ToolError::NoActiveStroke)?;

        let Some(stroke) = store.stroke_mut(active.handle.asset_id, active.handle.index) else {
            self.abandon();
            return Err(ToolError::StrokeNotFound(active.handle));
        };
        if !stroke.append_point(point) {
            self.abandon();
            return Err(ToolError::StrokeFinalized(active.handle));
        }
        Ok(GestureOutcome::Extended)
    }

    /// Ends the gesture regardless of draw mode. Ends from a pointer other
    /// than the active one are ignored.
    pub fn finish(
        &mut self,
        store: &mut AnnotationStore,
        pointer: Option<PointerId>,
    ) -> GestureOutcome {
        let Some(active) = self.active else {
            let _ = self.machine.transition(GestureEvent::End);
            return GestureOutcome::Ignored;
        };
        if !same_pointer(pointer, active.pointer) {
            return GestureOutcome::Ignored;
        }

        if let Some(stroke) = store.stroke_mut(active.handle.asset_id, active.handle.index) {
            stroke.finalize();
        }
        let _ = self.machine.transition(GestureEvent::End);
        self.active = None;
        tracing::debug!(
            asset = %active.handle.asset_id,
            index = active.handle.index,
            transition = ?self.machine.last_transition(),
            "stroke finished"
        );
        GestureOutcome::Finished
    }

    /// Force-terminates the active gesture if it targets `asset_id`. Used when
    /// the asset's strokes are cleared mid-gesture; later moves of the same
    /// gesture are then ignored and no stroke is recreated.
    pub fn cancel_for_asset(&mut self, asset_id: AssetId) -> GestureOutcome {
        match self.active {
            Some(active) if active.handle.asset_id == asset_id => {
                self.abandon();
                tracing::debug!(asset = %asset_id, "active stroke cancelled");
                GestureOutcome::Cancelled
            }
            _ => GestureOutcome::Ignored,
        }
    }

    /// Ends any active gesture, keeping what was drawn so far.
    pub fn cancel(&mut self, store: &mut AnnotationStore) -> GestureOutcome {
        let Some(active) = self.active else {
            return GestureOutcome::Ignored;
        };
        if let Some(stroke) = store.stroke_mut(active.handle.asset_id, active.handle.index) {
            stroke.finalize();
        }
        self.abandon();
        GestureOutcome::Cancelled
    }

    fn abandon(&mut self) {
        let _ = self.machine.transition(GestureEvent::Cancel);
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures::solid_blob;

    fn session() -> (AnnotationStore, AssetId) {
        let mut store = AnnotationStore::new();
        let asset_id = store.insert_asset(solid_blob(50, 50));
        (store, asset_id)
    }

    fn point(x: f64, y: f64) -> ImagePoint {
        ImagePoint::new(x, y)
    }

    #[test]
    fn start_plus_n_moves_records_n_plus_one_points_in_order() {
        let (mut store, asset_id) = session();
        let mut recorder = StrokeRecorder::new();

        let outcome = recorder.begin(&mut store, asset_id, Color::RED, point(0.0, 0.0), None);
        assert!(matches!(outcome, GestureOutcome::Started(_)));
        for step in 1..=4 {
            let outcome = recorder
                .extend(&mut store, point(f64::from(step), 0.5), None)
                .expect("stroke should be active");
            assert_eq!(outcome, GestureOutcome::Extended);
        }
        assert_eq!(recorder.finish(&mut store, None), GestureOutcome::Finished);

        let strokes = store.strokes(asset_id);
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].color, Color::RED);
        assert_eq!(
            strokes[0].points,
            vec![
                point(0.0, 0.0),
                point(1.0, 0.5),
                point(2.0, 0.5),
                point(3.0, 0.5),
                point(4.0, 0.5),
            ]
        );
        assert!(strokes[0].finalized);
        assert!(!recorder.is_drawing());
    }

    #[test]
    fn sequential_gestures_produce_independent_strokes_in_order() {
        let (mut store, asset_id) = session();
        let mut recorder = StrokeRecorder::new();
        let blue = Color::new(0, 0, 255);

        recorder.begin(&mut store, asset_id, Color::RED, point(1.0, 1.0), None);
        recorder
            .extend(&mut store, point(2.0, 2.0), None)
            .expect("first stroke active");
        recorder.finish(&mut store, None);

        recorder.begin(&mut store, asset_id, blue, point(9.0, 9.0), None);
        recorder
            .extend(&mut store, point(8.0, 8.0), None)
            .expect("second stroke active");
        recorder.finish(&mut store, None);

        let strokes = store.strokes(asset_id);
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points, vec![point(1.0, 1.0), point(2.0, 2.0)]);
        assert_eq!(strokes[1].color, blue);
        assert_eq!(strokes[1].points, vec![point(9.0, 9.0), point(8.0, 8.0)]);
    }

    #[test]
    fn move_without_active_stroke_reports_no_active_stroke() {
        let (mut store, _) = session();
        let mut recorder = StrokeRecorder::new();

        let err = recorder
            .extend(&mut store, point(1.0, 1.0), None)
            .expect_err("idle recorder should refuse moves");
        assert_eq!(err, ToolError::NoActiveStroke);
        assert_eq!(recorder.state(), GestureState::Idle);
    }

    #[test]
    fn second_pointer_start_and_moves_are_ignored() {
        let (mut store, asset_id) = session();
        let mut recorder = StrokeRecorder::new();
        let finger = Some(PointerId::Touch(1));
        let other = Some(PointerId::Touch(2));

        recorder.begin(&mut store, asset_id, Color::RED, point(0.0, 0.0), finger);
        assert_eq!(
            recorder.begin(&mut store, asset_id, Color::RED, point(5.0, 5.0), other),
            GestureOutcome::Ignored
        );
        assert_eq!(
            recorder
                .extend(&mut store, point(5.0, 5.0), other)
                .expect("mismatched pointer is not an error"),
            GestureOutcome::Ignored
        );
        assert_eq!(recorder.finish(&mut store, other), GestureOutcome::Ignored);
        assert!(recorder.is_drawing());

        assert_eq!(recorder.finish(&mut store, finger), GestureOutcome::Finished);
        assert_eq!(store.strokes(asset_id).len(), 1);
        assert_eq!(store.strokes(asset_id)[0].points.len(), 1);
    }

    #[test]
    fn clear_mid_gesture_cancels_and_following_moves_are_ignored() {
        let (mut store, asset_id) = session();
        let mut recorder = StrokeRecorder::new();

        recorder.begin(&mut store, asset_id, Color::RED, point(0.0, 0.0), None);
        recorder
            .extend(&mut store, point(1.0, 0.0), None)
            .expect("stroke active");

        store.clear_strokes(asset_id);
        assert_eq!(
            recorder.cancel_for_asset(asset_id),
            GestureOutcome::Cancelled
        );

        assert_eq!(
            recorder.extend(&mut store, point(2.0, 0.0), None),
            Err(ToolError::NoActiveStroke)
        );
        assert_eq!(recorder.finish(&mut store, None), GestureOutcome::Ignored);
        assert!(store.strokes(asset_id).is_empty());
        assert_eq!(recorder.state(), GestureState::Idle);
    }

    #[test]
    fn cancel_for_other_asset_leaves_gesture_running() {
        let (mut store, asset_id) = session();
        let other = store.insert_asset(solid_blob(4, 4));
        let mut recorder = StrokeRecorder::new();

        recorder.begin(&mut store, asset_id, Color::RED, point(0.0, 0.0), None);
        assert_eq!(recorder.cancel_for_asset(other), GestureOutcome::Ignored);
        assert_eq!(recorder.active_asset(), Some(asset_id));
    }

    #[test]
    fn vanished_stroke_is_reported_and_recorder_resets() {
        let (mut store, asset_id) = session();
        let mut recorder = StrokeRecorder::new();

        let handle = match recorder.begin(&mut store, asset_id, Color::RED, point(0.0, 0.0), None) {
            GestureOutcome::Started(handle) => handle,
            other => panic!("unexpected outcome {other:?}"),
        };
        // Clearing without notifying the recorder leaves a dangling handle.
        store.clear_strokes(asset_id);

        let err = recorder
            .extend(&mut store, point(1.0, 1.0), None)
            .expect_err("dangling handle must not append");
        assert_eq!(err, ToolError::StrokeNotFound(handle));
        assert!(!recorder.is_drawing());
        assert!(store.strokes(asset_id).is_empty());
    }

    #[test]
    fn cancel_keeps_partial_stroke_and_finalizes_it() {
        let (mut store, asset_id) = session();
        let mut recorder = StrokeRecorder::new();

        recorder.begin(&mut store, asset_id, Color::RED, point(0.0, 0.0), None);
        recorder
            .extend(&mut store, point(3.0, 3.0), None)
            .expect("stroke active");
        assert_eq!(recorder.cancel(&mut store), GestureOutcome::Cancelled);

        let strokes = store.strokes(asset_id);
        assert_eq!(strokes.len(), 1);
        assert!(strokes[0].finalized);
        assert_eq!(recorder.cancel(&mut store), GestureOutcome::Ignored);
    }

    #[test]
    fn only_start_and_extend_change_pixels() {
        let handle = StrokeHandle {
            asset_id: AssetId::from_raw(1),
            index: 0,
        };
        assert!(GestureOutcome::Started(handle).changes_pixels());
        assert!(GestureOutcome::Extended.changes_pixels());
        assert!(!GestureOutcome::Finished.changes_pixels());
        assert!(!GestureOutcome::Cancelled.changes_pixels());
        assert!(!GestureOutcome::Ignored.changes_pixels());
    }
}
