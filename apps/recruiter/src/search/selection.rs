use crate::models::candidate::CandidateId;

/// Candidates picked from the current result page.
///
/// Membership is toggled, never counted. Insertion order is kept so the
/// shortlist is persisted in the order the recruiter picked candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<CandidateId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: CandidateId) -> bool {
        match self.ids.iter().position(|&existing| existing == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set = SelectionSet::new();
        set.toggle(3);
        let before = set.clone();

        assert!(set.toggle(7));
        assert!(set.contains(7));
        assert!(!set.toggle(7));
        assert_eq!(set, before);
    }

    #[test]
    fn test_toggle_on_empty_then_untoggle_is_empty() {
        let mut set = SelectionSet::new();
        set.toggle(0);
        set.toggle(0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_selection_keeps_pick_order() {
        let mut set = SelectionSet::new();
        set.toggle(5);
        set.toggle(1);
        set.toggle(9);
        set.toggle(1);
        assert_eq!(set.ids(), &[5, 9]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_clear_empties_set() {
        let mut set = SelectionSet::new();
        set.toggle(1);
        set.toggle(2);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));
    }
}
