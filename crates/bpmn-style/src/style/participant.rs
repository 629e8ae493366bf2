//! Participants of choreography activities.

use std::ops::Deref;

use log::trace;

use crate::error::StyleError;

/// Band height of a single-instance participant.
pub const PARTICIPANT_SIZE: f64 = 20.0;
/// Band height of a multi-instance participant, which shows a marker row
/// below its name.
pub const MULTI_INSTANCE_PARTICIPANT_SIZE: f64 = 32.0;

/// A participant band of a choreography.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participant {
    multi_instance: bool,
    mod_count: u64,
}

impl Participant {
    pub fn new(multi_instance: bool) -> Self {
        Self {
            multi_instance,
            mod_count: 0,
        }
    }

    pub fn multi_instance(&self) -> bool {
        self.multi_instance
    }

    pub fn set_multi_instance(&mut self, multi_instance: bool) {
        if self.multi_instance != multi_instance {
            self.multi_instance = multi_instance;
            self.mod_count += 1;
        }
    }

    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Height of the participant's band.
    pub fn size(&self) -> f64 {
        if self.multi_instance {
            MULTI_INSTANCE_PARTICIPANT_SIZE
        } else {
            PARTICIPANT_SIZE
        }
    }
}

/// Ordered participants on one side of a choreography. The first
/// participant is the outermost band.
///
/// The aggregate [`mod_count`](ParticipantList::mod_count) covers structural
/// edits and every participant's own changes, and never decreases.
///
/// # Examples
///
/// ```
/// # use bpmn_style::style::{Participant, ParticipantList};
/// let mut list = ParticipantList::new();
/// list.push(Participant::new(false));
/// list.push(Participant::new(true));
/// assert_eq!(list.total_size(), 52.0);
///
/// let before = list.mod_count();
/// list.get_mut(0).unwrap().set_multi_instance(true);
/// assert!(list.mod_count() > before);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantList {
    participants: Vec<Participant>,
    structural_mod_count: u64,
}

impl ParticipantList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// Edit access to one participant; changes made through it are
    /// reflected in the aggregate counter.
    pub fn get_mut(&mut self, index: usize) -> Option<ParticipantMut<'_>> {
        self.participants
            .get_mut(index)
            .map(|participant| ParticipantMut { participant })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Appends an innermost participant.
    pub fn push(&mut self, participant: Participant) {
        self.participants.push(participant);
        self.structural_mod_count += 1;
    }

    /// Inserts a participant at `index`, shifting later ones inward.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ParticipantIndex`] if `index > len`.
    pub fn insert(&mut self, index: usize, participant: Participant) -> Result<(), StyleError> {
        if index > self.participants.len() {
            return Err(StyleError::ParticipantIndex {
                index,
                len: self.participants.len(),
            });
        }
        self.participants.insert(index, participant);
        self.structural_mod_count += 1;
        Ok(())
    }

    /// Removes the participant at `index`.
    ///
    /// The removed participant's own count is folded into the structural
    /// counter, so the aggregate still grows.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ParticipantIndex`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<Participant, StyleError> {
        if index >= self.participants.len() {
            return Err(StyleError::ParticipantIndex {
                index,
                len: self.participants.len(),
            });
        }
        let removed = self.participants.remove(index);
        self.structural_mod_count += removed.mod_count + 1;
        trace!(index, remaining = self.participants.len(); "Removed participant");
        Ok(removed)
    }

    /// Structural edits plus the sum of every participant's count.
    pub fn mod_count(&self) -> u64 {
        self.structural_mod_count
            + self
                .participants
                .iter()
                .map(Participant::mod_count)
                .sum::<u64>()
    }

    /// Sum of all band heights.
    pub fn total_size(&self) -> f64 {
        self.participants.iter().map(Participant::size).sum()
    }

    /// Offset of the band at `index` from the stack edge.
    pub fn offset_of(&self, index: usize) -> Option<f64> {
        if index >= self.participants.len() {
            return None;
        }
        Some(self.participants[..index].iter().map(Participant::size).sum())
    }
}

/// Edit handle to a participant inside a [`ParticipantList`].
///
/// Only counted edits are possible; the participant cannot be swapped out
/// from under the list's aggregate counter.
#[derive(Debug)]
pub struct ParticipantMut<'a> {
    participant: &'a mut Participant,
}

impl ParticipantMut<'_> {
    pub fn set_multi_instance(&mut self, multi_instance: bool) {
        self.participant.set_multi_instance(multi_instance);
    }
}

impl Deref for ParticipantMut<'_> {
    type Target = Participant;

    fn deref(&self) -> &Participant {
        &*self.participant
    }
}

/// Edit handle to a participant list owned by a style.
///
/// Exposes the counted edits of [`ParticipantList`] without allowing the
/// list itself to be replaced; use
/// [`ChoreographyStyle::set_participants`](super::ChoreographyStyle::set_participants)
/// for that.
#[derive(Debug)]
pub struct ParticipantListMut<'a> {
    list: &'a mut ParticipantList,
}

impl<'a> ParticipantListMut<'a> {
    pub(crate) fn new(list: &'a mut ParticipantList) -> Self {
        Self { list }
    }

    pub fn push(&mut self, participant: Participant) {
        self.list.push(participant);
    }

    /// # Errors
    ///
    /// Returns [`StyleError::ParticipantIndex`] if `index > len`.
    pub fn insert(&mut self, index: usize, participant: Participant) -> Result<(), StyleError> {
        self.list.insert(index, participant)
    }

    /// # Errors
    ///
    /// Returns [`StyleError::ParticipantIndex`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<Participant, StyleError> {
        self.list.remove(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<ParticipantMut<'_>> {
        self.list.get_mut(index)
    }
}

impl Deref for ParticipantListMut<'_> {
    type Target = ParticipantList;

    fn deref(&self) -> &ParticipantList {
        &*self.list
    }
}

impl FromIterator<Participant> for ParticipantList {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        let participants: Vec<Participant> = iter.into_iter().collect();
        Self {
            structural_mod_count: participants.len() as u64,
            participants,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Edit {
        Push(bool),
        Insert(usize, bool),
        Remove(usize),
        Toggle(usize),
    }

    fn edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            any::<bool>().prop_map(Edit::Push),
            (0usize..6, any::<bool>()).prop_map(|(index, multi)| Edit::Insert(index, multi)),
            (0usize..6).prop_map(Edit::Remove),
            (0usize..6).prop_map(Edit::Toggle),
        ]
    }

    /// The aggregate never decreases, and grows whenever the list or one of
    /// its participants actually changed.
    fn check_aggregate_monotonic(edits: Vec<Edit>) -> Result<(), TestCaseError> {
        let mut list = ParticipantList::new();
        for edit in edits {
            let before = list.mod_count();
            let snapshot = list.participants.clone();
            match edit {
                Edit::Push(multi) => list.push(Participant::new(multi)),
                Edit::Insert(index, multi) => {
                    let _ = list.insert(index, Participant::new(multi));
                }
                Edit::Remove(index) => {
                    let _ = list.remove(index);
                }
                Edit::Toggle(index) => {
                    if let Some(mut participant) = list.get_mut(index) {
                        let multi = participant.multi_instance();
                        participant.set_multi_instance(!multi);
                    }
                }
            }
            let after = list.mod_count();
            prop_assert!(after >= before);
            if list.participants != snapshot {
                prop_assert!(after > before);
            }
        }
        Ok(())
    }

    /// Total band height does not depend on participant order.
    fn check_total_is_order_independent(flags: Vec<bool>) -> Result<(), TestCaseError> {
        let forward: ParticipantList = flags.iter().copied().map(Participant::new).collect();
        let backward: ParticipantList = flags.iter().rev().copied().map(Participant::new).collect();
        let expected: f64 = flags
            .iter()
            .map(|multi| {
                if *multi {
                    MULTI_INSTANCE_PARTICIPANT_SIZE
                } else {
                    PARTICIPANT_SIZE
                }
            })
            .sum();
        prop_assert_eq!(forward.total_size(), expected);
        prop_assert_eq!(backward.total_size(), expected);
        Ok(())
    }

    proptest! {
        #[test]
        fn aggregate_monotonic(edits in prop::collection::vec(edit(), 0..30)) {
            check_aggregate_monotonic(edits)?;
        }

        #[test]
        fn total_is_order_independent(flags in prop::collection::vec(any::<bool>(), 0..8)) {
            check_total_is_order_independent(flags)?;
        }
    }
}
