use crate::codes::{classify, Field, LIFT};
use crate::evdev::RawEvent;
use crate::slots::{OverflowPolicy, SlotManager};
use crate::snapshot::Snapshot;
use crate::stats::Stats;
use crate::ErrorString;
use skipchannel::Sender;

/// The only writer of the contact table. Feeds events into a
/// `SlotManager` and publishes a snapshot after every frame.
pub struct Ingestion {
    slot_manager: SlotManager,
    sender: Sender<Snapshot>,
    stats: Stats,
}

impl Ingestion {
    pub fn new(policy: OverflowPolicy, sender: Sender<Snapshot>, stats: Stats) -> Ingestion {
        Ingestion {
            slot_manager: SlotManager::new(policy),
            sender,
            stats,
        }
    }

    pub fn apply(&mut self, event: RawEvent) {
        let value = event.value;
        let slot_manager = &mut self.slot_manager;
        let result = match classify(event.code) {
            Field::TrackingId => {
                log::debug!("got tracking id: {}", value);
                slot_manager.on_tracking_id(value)
            }
            Field::LiftOrPressCount => {
                if value == LIFT {
                    log::debug!("contact {} lifted", slot_manager.current_id());
                } else {
                    log::debug!("new touch");
                }
                slot_manager.on_lift_or_count(value)
            }
            Field::PositionX => {
                log::debug!("got x: {}", value);
                slot_manager.on_position_x(value)
            }
            Field::PositionY => {
                log::debug!("got y: {}", value);
                slot_manager.on_position_y(value)
            }
            Field::Surface => {
                log::debug!("contact surface: {}", value);
                slot_manager.on_surface(value)
            }
            Field::Click => {
                log::debug!("clicked: {}", value);
                slot_manager.on_click(value);
                Ok(())
            }
            Field::GlobalForce => {
                log::debug!("force: {}", value);
                slot_manager.on_global_force(value);
                Ok(())
            }
            Field::Unrecognized => Ok(()),
        };
        if let Err(error) = result {
            log::debug!("skipping {:?}: {}", event, error);
            self.stats.log_slot_error(&error);
        }
    }

    pub fn apply_frame(&mut self, frame: Vec<RawEvent>) {
        for event in frame {
            self.apply(event);
        }
        self.sender.send(self.slot_manager.snapshot());
    }

    /// Consumes frames until the source ends or fails.
    pub fn run<I>(&mut self, frames: I) -> Result<(), ErrorString>
    where
        I: Iterator<Item = Result<Vec<RawEvent>, ErrorString>>,
    {
        for frame in frames {
            self.apply_frame(frame?);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn slot_manager(&self) -> &SlotManager {
        &self.slot_manager
    }
}
