/// Trackpad wide state, not tied to a single contact.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct DeviceState {
    pub clicked: bool,
    pub global_force: i32,
    pub touching_count: usize,
    /// Number of touches since startup. Never decreases.
    pub total_press_count: u64,
}

impl DeviceState {
    pub fn new() -> DeviceState {
        DeviceState::default()
    }

    pub fn set_click(&mut self, value: i32) {
        match value {
            0 => self.clicked = false,
            1 => self.clicked = true,
            _ => {}
        }
    }

    pub fn set_global_force(&mut self, value: i32) {
        if value >= 0 {
            self.global_force = value;
        }
    }

    pub fn add_touching(&mut self) {
        self.touching_count += 1;
    }

    pub fn remove_touching(&mut self) {
        self.touching_count = self.touching_count.saturating_sub(1);
    }

    pub fn add_press(&mut self) {
        self.total_press_count += 1;
    }
}
