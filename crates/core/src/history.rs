//! Change tracking and linear undo/redo over whole-document snapshots.
//!
//! The bottom of the undo stack is the document as loaded and is never
//! popped. Clean/dirty is decided by structural equality between the live
//! document and that original, so undoing back to it is clean again no
//! matter how many edits were made in between.

use crate::document::ThemeFamily;
use crate::edit::try_update;
use crate::error::EditorError;
use crate::path::ColorPath;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

/// One entry in the edit history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSnapshot {
    pub document: ThemeFamily,
    pub timestamp: DateTime<Utc>,
}

impl ChangeSnapshot {
    fn now(document: ThemeFamily) -> Self {
        Self {
            document,
            timestamp: Utc::now(),
        }
    }
}

/// Whether the live document differs from the loaded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditState {
    Clean,
    Dirty,
}

/// Owns the current document version and its undo/redo history.
///
/// Every [`ChangeTracker::commit`] is one atomic history entry; debouncing
/// keystrokes into settled edits is the caller's job.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    undo: Vec<ChangeSnapshot>,
    redo: Vec<ChangeSnapshot>,
    state: EditState,
}

impl ChangeTracker {
    /// Starts a session with `original` as the loaded document.
    pub fn new(original: ThemeFamily) -> Self {
        Self {
            undo: vec![ChangeSnapshot::now(original)],
            redo: Vec::new(),
            state: EditState::Clean,
        }
    }

    /// The live document.
    pub fn current(&self) -> &ThemeFamily {
        &self.top().document
    }

    /// The document as loaded.
    pub fn original(&self) -> &ThemeFamily {
        &self.undo[0].document
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == EditState::Dirty
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of edits that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo.len() - 1
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// The undo stack, original first.
    pub fn snapshots(&self) -> &[ChangeSnapshot] {
        &self.undo
    }

    /// Records `document` as the new current version and discards redo.
    pub fn commit(&mut self, document: ThemeFamily) {
        self.undo.push(ChangeSnapshot::now(document));
        self.redo.clear();
        self.refresh();
        trace!(depth = self.undo_depth(), state = ?self.state, "committed edit");
    }

    /// Applies one color edit to the current document and commits it.
    ///
    /// On failure the history is untouched.
    pub fn apply_color(
        &mut self,
        theme_index: usize,
        path: &ColorPath,
        new_hex: &str,
    ) -> Result<(), EditorError> {
        let next = try_update(self.current(), theme_index, path, new_hex)?;
        self.commit(next);
        Ok(())
    }

    /// Steps back one edit. Returns `false` at the original.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        if let Some(top) = self.undo.pop() {
            self.redo.push(top);
        }
        self.refresh();
        trace!(depth = self.undo_depth(), state = ?self.state, "undo");
        true
    }

    /// Re-applies the last undone edit. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(next);
        self.refresh();
        trace!(depth = self.undo_depth(), state = ?self.state, "redo");
        true
    }

    /// Starts over with a newly loaded document, dropping all history.
    pub fn reset(&mut self, original: ThemeFamily) {
        *self = Self::new(original);
    }

    fn top(&self) -> &ChangeSnapshot {
        // undo always holds at least the original
        &self.undo[self.undo.len() - 1]
    }

    fn refresh(&mut self) {
        self.state = if self.current() == self.original() {
            EditState::Clean
        } else {
            EditState::Dirty
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Appearance, Theme};
    use crate::edit::update;
    use serde_json::json;

    fn d0() -> ThemeFamily {
        ThemeFamily {
            schema: None,
            name: "Tracker".into(),
            author: "Tracker Authors".into(),
            themes: vec![Theme {
                name: "Tracker Light".into(),
                appearance: Appearance::Light,
                style: json!({ "background": "#FFFFFF", "text": "#000000" }),
            }],
        }
    }

    fn background() -> ColorPath {
        ColorPath::new().key("background")
    }

    #[test]
    fn new_tracker_is_clean_with_no_history() {
        let t = ChangeTracker::new(d0());
        assert_eq!(t.state(), EditState::Clean);
        assert!(!t.can_undo());
        assert!(!t.can_redo());
        assert_eq!(t.current(), &d0());
    }

    #[test]
    fn edit_undo_redo_cycle() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#EEEEEE").unwrap();
        let edited = t.current().clone();
        assert!(t.is_dirty());

        assert!(t.undo());
        assert_eq!(t.state(), EditState::Clean);
        assert_eq!(t.current(), &d0());

        assert!(t.redo());
        assert!(t.is_dirty());
        assert_eq!(t.current(), &edited);
    }

    #[test]
    fn editing_back_to_original_value_is_clean() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#000000").unwrap();
        assert!(t.is_dirty());
        t.apply_color(0, &background(), "#ffffff").unwrap();
        assert_eq!(t.state(), EditState::Clean);
        assert_eq!(t.undo_depth(), 2);
    }

    #[test]
    fn commit_clears_redo() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#111111").unwrap();
        t.apply_color(0, &background(), "#222222").unwrap();
        t.undo();
        assert!(t.can_redo());
        t.apply_color(0, &background(), "#333333").unwrap();
        assert!(!t.can_redo());
        assert!(!t.redo());
        assert_eq!(t.current().themes[0].style["background"], "#333333");
    }

    #[test]
    fn undo_at_original_is_a_no_op() {
        let mut t = ChangeTracker::new(d0());
        assert!(!t.undo());
        assert_eq!(t.snapshots().len(), 1);
        assert_eq!(t.current(), &d0());
    }

    #[test]
    fn redo_when_empty_is_a_no_op() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#111111").unwrap();
        assert!(!t.redo());
        assert_eq!(t.undo_depth(), 1);
    }

    #[test]
    fn original_is_never_popped() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#111111").unwrap();
        for _ in 0..5 {
            t.undo();
        }
        assert_eq!(t.snapshots().len(), 1);
        assert_eq!(t.original(), &d0());
        assert_eq!(t.redo_depth(), 1);
    }

    #[test]
    fn every_commit_is_one_history_entry() {
        let mut t = ChangeTracker::new(d0());
        let same = t.current().clone();
        t.commit(same.clone());
        t.commit(same);
        assert_eq!(t.undo_depth(), 2);
        assert_eq!(t.state(), EditState::Clean);
    }

    #[test]
    fn failed_apply_leaves_history_untouched() {
        let mut t = ChangeTracker::new(d0());
        let stale = ColorPath::new().key("players").index(0).key("cursor");
        assert!(t.apply_color(0, &stale, "#123456").is_err());
        assert!(t.apply_color(0, &background(), "not a color").is_err());
        assert!(t.apply_color(3, &background(), "#123456").is_err());
        assert_eq!(t.undo_depth(), 0);
        assert_eq!(t.state(), EditState::Clean);
    }

    #[test]
    fn commit_accepts_externally_built_documents() {
        let mut t = ChangeTracker::new(d0());
        let next = update(t.current(), 0, &ColorPath::new().key("text"), "#333333");
        t.commit(next);
        assert!(t.is_dirty());
        assert_eq!(t.current().themes[0].style["text"], "#333333");
    }

    #[test]
    fn reset_starts_a_fresh_session() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#111111").unwrap();
        t.undo();
        let mut reloaded = d0();
        reloaded.name = "Reloaded".into();
        t.reset(reloaded.clone());
        assert_eq!(t.original(), &reloaded);
        assert!(!t.can_undo());
        assert!(!t.can_redo());
        assert_eq!(t.state(), EditState::Clean);
    }

    #[test]
    fn snapshots_are_timestamped_in_order() {
        let mut t = ChangeTracker::new(d0());
        t.apply_color(0, &background(), "#111111").unwrap();
        let snaps = t.snapshots();
        assert!(snaps[0].timestamp <= snaps[1].timestamp);
    }

    #[test]
    fn oklch_field_edit_flows_into_history() {
        use crate::color::{parse, to_hex, to_oklch, Color};
        use crate::config::ExtractionRules;
        use crate::extract::extract_theme_colors;
        use crate::numeric::{Modifiers, NumericField, Quantity};

        let mut doc = d0();
        doc.themes[0].style["background"] = json!("#3366CC");
        let mut t = ChangeTracker::new(doc);

        let entries = extract_theme_colors(t.current(), 0, &ExtractionRules::default()).unwrap();
        let entry = &entries[0];
        let color = parse(&entry.value).unwrap();
        let lch = to_oklch(color);

        let mut hue = NumericField::new(Quantity::OklchHue, lch.h);
        hue.increment(Modifiers::SHIFT);
        let edited = Color::from_oklch(lch.l, lch.c, hue.value(), color.rounded_alpha());
        let hex = to_hex(edited, false);

        t.apply_color(0, &entry.path, &hex).unwrap();
        assert!(t.is_dirty());
        let written = t.current().themes[0].style["background"].as_str().unwrap();
        assert_eq!(written, hex);
        assert_eq!(written.len(), 7);
        assert_eq!(written, written.to_uppercase());

        t.undo();
        assert_eq!(t.state(), EditState::Clean);
    }

    #[test]
    fn trackers_are_independent() {
        let mut a = ChangeTracker::new(d0());
        let b = ChangeTracker::new(d0());
        a.apply_color(0, &background(), "#111111").unwrap();
        assert!(a.is_dirty());
        assert!(!b.is_dirty());
    }
}
