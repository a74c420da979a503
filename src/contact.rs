#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// One finger on the trackpad, from its tracking id event until its lift.
///
/// A contact only becomes ready once it received both an x and a y
/// coordinate, before that its position is meaningless.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Contact {
    id: i32,
    position: Position,
    surface: i32,
    force: i32,
    has_x: bool,
    has_y: bool,
}

impl Contact {
    pub fn create(id: i32) -> Contact {
        Contact {
            id,
            position: Position { x: 0, y: 0 },
            surface: 0,
            force: 0,
            has_x: false,
            has_y: false,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn set_x(&mut self, x: i32) {
        self.position.x = x;
        self.has_x = true;
    }

    pub fn set_y(&mut self, y: i32) {
        self.position.y = y;
        self.has_y = true;
    }

    /// Negative values mean "unknown" and are dropped.
    pub fn set_surface(&mut self, value: i32) {
        if value >= 0 {
            self.surface = value;
        }
    }

    /// Negative values mean "unknown" and are dropped.
    pub fn set_force(&mut self, value: i32) {
        if value >= 0 {
            self.force = value;
        }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_surface(&self) -> i32 {
        self.surface
    }

    pub fn get_force(&self) -> i32 {
        self.force
    }

    pub fn is_ready(&self) -> bool {
        self.has_x && self.has_y
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_out_with_defaults() {
        let contact = Contact::create(7);
        assert_eq!(contact.id(), 7);
        assert_eq!(contact.get_position(), Position { x: 0, y: 0 });
        assert_eq!(contact.get_surface(), 0);
        assert_eq!(contact.get_force(), 0);
        assert!(!contact.is_ready());
    }

    mod readiness {
        use super::*;

        #[test]
        fn is_not_ready_after_x_only() {
            let mut contact = Contact::create(0);
            contact.set_x(23);
            assert!(!contact.is_ready());
        }

        #[test]
        fn is_not_ready_after_y_only() {
            let mut contact = Contact::create(0);
            contact.set_y(42);
            assert!(!contact.is_ready());
        }

        #[test]
        fn is_ready_after_x_and_y() {
            let mut contact = Contact::create(0);
            contact.set_x(23);
            contact.set_y(42);
            assert!(contact.is_ready());
            assert_eq!(contact.get_position(), Position { x: 23, y: 42 });
        }

        #[test]
        fn stays_ready_on_further_updates() {
            let mut contact = Contact::create(0);
            contact.set_x(23);
            contact.set_y(42);
            contact.set_x(51);
            assert!(contact.is_ready());
            assert_eq!(contact.get_position(), Position { x: 51, y: 42 });
        }
    }

    #[test]
    fn ignores_negative_surfaces() {
        let mut contact = Contact::create(0);
        contact.set_surface(50);
        contact.set_surface(-1);
        assert_eq!(contact.get_surface(), 50);
    }

    #[test]
    fn ignores_negative_forces() {
        let mut contact = Contact::create(0);
        contact.set_force(12);
        contact.set_force(-3);
        assert_eq!(contact.get_force(), 12);
    }

    #[test]
    fn accepts_zero_as_surface_and_force() {
        let mut contact = Contact::create(0);
        contact.set_surface(50);
        contact.set_force(12);
        contact.set_surface(0);
        contact.set_force(0);
        assert_eq!((contact.get_surface(), contact.get_force()), (0, 0));
    }
}
