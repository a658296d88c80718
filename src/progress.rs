use crate::logger;
use crate::models::Section;

/// Which sections the learner has finished this session. Completion is
/// permanent until the process restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    completed: [bool; Section::COUNT],
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a section complete. Returns true only the first time, which is
    /// what should start a celebration.
    pub fn report_section_complete(&mut self, section: Section) -> bool {
        let slot = &mut self.completed[section.index()];
        if *slot {
            return false;
        }
        *slot = true;
        logger::log(&format!("Section {:?} newly completed", section));
        true
    }

    pub fn is_complete(&self, section: Section) -> bool {
        self.completed[section.index()]
    }

    /// (completed sections, total sections)
    pub fn completion_fraction(&self) -> (usize, usize) {
        (
            self.completed.iter().filter(|done| **done).count(),
            Section::COUNT,
        )
    }
}
