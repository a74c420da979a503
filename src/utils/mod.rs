pub mod periodic_worker;

/// Maximum number of simultaneous contacts.
pub const CAPACITY: usize = 5;

pub type Slots<T> = [T; CAPACITY];
