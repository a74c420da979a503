use crate::codes::LIFT;
use crate::contact::{Contact, Position};
use crate::device_state::DeviceState;
use crate::snapshot::{ready_contact, Snapshot};
use crate::utils::{Slots, CAPACITY};
use std::fmt;

custom_derive! {
    #[derive(Debug, Clone, Copy, PartialEq, IterVariants(OverflowPolicyVariants))]
    pub enum OverflowPolicy {
        Reject,
        EvictOldest,
    }
}

impl Default for OverflowPolicy {
    fn default() -> OverflowPolicy {
        OverflowPolicy::Reject
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SlotError {
    NotFound { id: i32 },
    CapacityExceeded { id: i32 },
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotError::NotFound { id } => write!(f, "no contact with id {}", id),
            SlotError::CapacityExceeded { id } => write!(
                f,
                "no free slot for id {} ({} contacts active)",
                id, CAPACITY
            ),
        }
    }
}

impl std::error::Error for SlotError {}

/// Keeps track of the active contacts in a fixed table.
///
/// Contacts are stored in the order they appeared, without holes: removing
/// one shifts all later contacts one slot to the left. Per-contact events
/// apply to the contact of the id selected by the last tracking id event.
#[derive(Debug)]
pub struct SlotManager {
    contacts: Slots<Option<Contact>>,
    count: usize,
    current_id: i32,
    policy: OverflowPolicy,
    device_state: DeviceState,
}

impl SlotManager {
    pub fn new(policy: OverflowPolicy) -> SlotManager {
        SlotManager {
            contacts: [None; CAPACITY],
            count: 0,
            current_id: 0,
            policy,
            device_state: DeviceState::new(),
        }
    }

    pub fn on_tracking_id(&mut self, id: i32) -> Result<(), SlotError> {
        self.current_id = id;
        if self.index_of(id).is_none() {
            self.allocate(id)?;
        }
        Ok(())
    }

    pub fn on_lift_or_count(&mut self, value: i32) -> Result<(), SlotError> {
        if value == LIFT {
            self.remove(self.current_id)
        } else {
            self.device_state.add_press();
            Ok(())
        }
    }

    pub fn on_position_x(&mut self, value: i32) -> Result<(), SlotError> {
        self.bound_contact()?.set_x(value);
        Ok(())
    }

    pub fn on_position_y(&mut self, value: i32) -> Result<(), SlotError> {
        self.bound_contact()?.set_y(value);
        Ok(())
    }

    pub fn on_surface(&mut self, value: i32) -> Result<(), SlotError> {
        self.bound_contact()?.set_surface(value);
        Ok(())
    }

    pub fn on_force(&mut self, value: i32) -> Result<(), SlotError> {
        self.bound_contact()?.set_force(value);
        Ok(())
    }

    pub fn on_click(&mut self, value: i32) {
        self.device_state.set_click(value);
    }

    pub fn on_global_force(&mut self, value: i32) {
        self.device_state.set_global_force(value);
    }

    pub fn get_position(&self, slot: usize) -> Option<Position> {
        ready_contact(&self.contacts, slot).map(Contact::get_position)
    }

    pub fn get_surface(&self, slot: usize) -> Option<i32> {
        ready_contact(&self.contacts, slot).map(Contact::get_surface)
    }

    pub fn occupied_count(&self) -> usize {
        self.count
    }

    pub fn device_state(&self) -> DeviceState {
        self.device_state
    }

    pub fn current_id(&self) -> i32 {
        self.current_id
    }

    /// Tracking ids of the active contacts, in slot order.
    pub fn ids(&self) -> Vec<i32> {
        self.contacts
            .iter()
            .take(self.count)
            .flatten()
            .map(Contact::id)
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.contacts, self.device_state)
    }

    fn index_of(&self, id: i32) -> Option<usize> {
        self.contacts[..self.count]
            .iter()
            .position(|contact| contact.map(|contact| contact.id()) == Some(id))
    }

    fn allocate(&mut self, id: i32) -> Result<usize, SlotError> {
        if self.count == CAPACITY {
            match self.policy {
                OverflowPolicy::Reject => return Err(SlotError::CapacityExceeded { id }),
                OverflowPolicy::EvictOldest => {
                    let oldest = self.contacts[0]
                        .map(|contact| contact.id())
                        .ok_or(SlotError::CapacityExceeded { id })?;
                    log::debug!("evicting contact {} for contact {}", oldest, id);
                    self.remove(oldest)?;
                }
            }
        }
        let index = self.count;
        self.contacts[index] = Some(Contact::create(id));
        self.count += 1;
        self.device_state.add_touching();
        Ok(index)
    }

    fn remove(&mut self, id: i32) -> Result<(), SlotError> {
        let mut index = self.index_of(id).ok_or(SlotError::NotFound { id })?;
        while index + 1 < CAPACITY && self.contacts[index + 1].is_some() {
            self.contacts[index] = self.contacts[index + 1];
            index += 1;
        }
        self.contacts[index] = None;
        self.count -= 1;
        self.device_state.remove_touching();
        Ok(())
    }

    /// The contact of the current id. The trackpad reuses the id of a lifted
    /// finger for the next touch without sending the id again, so a missing
    /// contact is created here.
    fn bound_contact(&mut self) -> Result<&mut Contact, SlotError> {
        let id = self.current_id;
        let index = match self.index_of(id) {
            Some(index) => index,
            None => self.allocate(id)?,
        };
        self.contacts[index]
            .as_mut()
            .ok_or(SlotError::NotFound { id })
    }
}
