use crate::model::Track;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Track>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(entries: Vec<Track>, index: i64) -> Self {
        let cursor = if entries.is_empty() || index < 0 {
            None
        } else {
            let last = entries.len() - 1;
            Some(usize::try_from(index).map_or(last, |idx| idx.min(last)))
        };

        // A non-empty history with a cursor of -1 is only reachable through
        // hand-edited state; keep it, stepping forward still works.
        Self { entries, cursor }
    }

    pub fn entries(&self) -> &[Track] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor_index(&self) -> i64 {
        self.cursor.map_or(-1, |idx| idx as i64)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Track> {
        self.entries.get(self.cursor?)
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.is_some_and(|idx| idx > 0)
    }

    pub fn has_next(&self) -> bool {
        self.cursor_index() < self.entries.len() as i64 - 1
    }

    pub fn push(&mut self, track: Track) {
        let keep = self.cursor.map_or(0, |idx| idx + 1);
        self.entries.truncate(keep);
        self.entries.push(track);
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn step_back(&mut self) -> Option<&Track> {
        if !self.has_previous() {
            return None;
        }
        let idx = self.cursor? - 1;
        self.cursor = Some(idx);
        self.entries.get(idx)
    }

    pub fn step_forward(&mut self) -> Option<&Track> {
        if !self.has_next() {
            return None;
        }
        let idx = self.cursor.map_or(0, |idx| idx + 1);
        self.cursor = Some(idx);
        self.entries.get(idx)
    }
}
