use crate::contact::{Contact, Position};
use crate::device_state::DeviceState;
use crate::utils::{Slots, CAPACITY};

pub fn ready_contact(contacts: &Slots<Option<Contact>>, slot: usize) -> Option<&Contact> {
    contacts
        .get(slot)
        .and_then(|contact| contact.as_ref())
        .filter(|contact| contact.is_ready())
}

/// Copy of the contact table and device state at the end of a frame.
///
/// Snapshots are handed from the ingestion thread to the sink, which
/// therefore never sees a table in the middle of an update.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Snapshot {
    contacts: Slots<Option<Contact>>,
    device_state: DeviceState,
}

impl Default for Snapshot {
    fn default() -> Snapshot {
        Snapshot::new([None; CAPACITY], DeviceState::new())
    }
}

impl Snapshot {
    pub fn new(contacts: Slots<Option<Contact>>, device_state: DeviceState) -> Snapshot {
        Snapshot {
            contacts,
            device_state,
        }
    }

    /// The contact in the given slot, ready or not.
    pub fn contact(&self, slot: usize) -> Option<Contact> {
        self.contacts.get(slot).and_then(|contact| *contact)
    }

    pub fn get_position(&self, slot: usize) -> Option<Position> {
        ready_contact(&self.contacts, slot).map(Contact::get_position)
    }

    pub fn get_surface(&self, slot: usize) -> Option<i32> {
        ready_contact(&self.contacts, slot).map(Contact::get_surface)
    }

    pub fn occupied_count(&self) -> usize {
        self.contacts.iter().filter(|contact| contact.is_some()).count()
    }

    pub fn device_state(&self) -> DeviceState {
        self.device_state
    }

    /// `(x, y, surface)` of every ready contact, in slot order.
    pub fn ready_triples(&self) -> Vec<(i32, i32, i32)> {
        (0..CAPACITY)
            .filter_map(|slot| ready_contact(&self.contacts, slot))
            .map(|contact| {
                let position = contact.get_position();
                (position.x, position.y, contact.get_surface())
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::slots::{OverflowPolicy, SlotManager};

    fn snapshot_after<F: FnOnce(&mut SlotManager)>(f: F) -> Snapshot {
        let mut slot_manager = SlotManager::new(OverflowPolicy::Reject);
        f(&mut slot_manager);
        slot_manager.snapshot()
    }

    #[test]
    fn defaults_to_an_empty_table() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.occupied_count(), 0);
        assert!(snapshot.ready_triples().is_empty());
        assert_eq!(snapshot.device_state(), DeviceState::new());
    }

    #[test]
    fn agrees_with_the_slot_manager() {
        let mut slot_manager = SlotManager::new(OverflowPolicy::Reject);
        slot_manager.on_tracking_id(3).unwrap();
        slot_manager.on_position_x(1).unwrap();
        slot_manager.on_position_y(2).unwrap();
        slot_manager.on_surface(3).unwrap();
        slot_manager.on_tracking_id(4).unwrap();
        slot_manager.on_click(1);
        let snapshot = slot_manager.snapshot();
        for slot in 0..CAPACITY {
            assert_eq!(snapshot.get_position(slot), slot_manager.get_position(slot));
            assert_eq!(snapshot.get_surface(slot), slot_manager.get_surface(slot));
        }
        assert_eq!(snapshot.occupied_count(), slot_manager.occupied_count());
        assert_eq!(snapshot.device_state(), slot_manager.device_state());
    }

    #[test]
    fn is_not_affected_by_later_updates() {
        let mut slot_manager = SlotManager::new(OverflowPolicy::Reject);
        slot_manager.on_tracking_id(3).unwrap();
        let snapshot = slot_manager.snapshot();
        slot_manager.on_tracking_id(4).unwrap();
        assert_eq!(snapshot.occupied_count(), 1);
    }

    mod ready_triples {
        use super::*;

        #[test]
        fn skips_contacts_that_are_not_ready() {
            let snapshot = snapshot_after(|slot_manager| {
                slot_manager.on_tracking_id(1).unwrap();
                slot_manager.on_position_x(10).unwrap();
                slot_manager.on_tracking_id(2).unwrap();
                slot_manager.on_position_x(20).unwrap();
                slot_manager.on_position_y(30).unwrap();
                slot_manager.on_surface(40).unwrap();
            });
            assert_eq!(snapshot.ready_triples(), vec![(20, 30, 40)]);
        }

        #[test]
        fn lists_contacts_in_slot_order() {
            let snapshot = snapshot_after(|slot_manager| {
                for id in &[9, 4] {
                    slot_manager.on_tracking_id(*id).unwrap();
                    slot_manager.on_position_x(*id).unwrap();
                    slot_manager.on_position_y(*id * 2).unwrap();
                }
            });
            assert_eq!(snapshot.ready_triples(), vec![(9, 18, 0), (4, 8, 0)]);
        }
    }
}
