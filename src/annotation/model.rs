use crate::assets::AssetId;
use crate::timecode::TimeCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry_{}", self.0)
    }
}

/// One gimmick on the encounter timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: EntryId,
    pub time: TimeCode,
    pub label: String,
    pub note: String,
    /// Weak reference into the asset arena; never owns the asset.
    pub image: Option<AssetId>,
}

impl TimelineEntry {
    pub(crate) fn new(id: EntryId) -> Self {
        Self {
            id,
            time: TimeCode::default(),
            label: String::new(),
            note: String::new(),
            image: None,
        }
    }

    pub fn apply(&mut self, field: EntryField) {
        match field {
            EntryField::Time(time) => self.time = time,
            EntryField::Label(label) => self.label = label,
            EntryField::Note(note) => self.note = note,
        }
    }
}

/// A single editable text field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryField {
    Time(TimeCode),
    Label(String),
    Note(String),
}

impl EntryField {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Time(_) => "time",
            Self::Label(_) => "label",
            Self::Note(_) => "note",
        }
    }
}
