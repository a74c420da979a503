use crate::stats::Stats;
use crate::AddMessage;
use crate::ErrorString;
use ::evdev_rs::util::event_code_to_int;
use ::evdev_rs::{Device, DeviceWrapper, GrabMode, ReadFlag, ReadStatus};
use ::std::fs::File;
use ::std::io;

pub const EV_SYN: u16 = 0x00;
pub const SYN_REPORT: u16 = 0x00;
pub const SYN_DROPPED: u16 = 0x03;

/// An input event reduced to its raw numbers.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct RawEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> RawEvent {
        RawEvent {
            event_type,
            code,
            value,
        }
    }

    fn is_syn_report(&self) -> bool {
        self.event_type == EV_SYN && self.code == SYN_REPORT
    }

    fn is_syn_dropped(&self) -> bool {
        self.event_type == EV_SYN && self.code == SYN_DROPPED
    }
}

fn open(path: &str) -> Result<Device, ErrorString> {
    let file = File::open(path).add_message(format!("file not found: {}", path))?;
    Device::new_from_file(file).add_message(format!("evdev: can't initialize {}", path))
}

/// Looks through `/dev/input/event*` for a device with the given name.
pub fn find_device(name: &str) -> Result<String, ErrorString> {
    let mut index = 0;
    loop {
        let path = format!("/dev/input/event{}", index);
        let device = open(&path).add_message(format!("no input device named {:?}", name))?;
        if device.name() == Some(name) {
            log::debug!("found {:?} at {}", name, path);
            return Ok(path);
        }
        index += 1;
    }
}

fn is_transient(error: &io::Error) -> bool {
    match error.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => true,
        _ => false,
    }
}

/// Repeats `read` while it fails with `EAGAIN` or `EINTR`.
fn retry_transient<T, F>(mut read: F) -> io::Result<T>
where
    F: FnMut() -> io::Result<T>,
{
    loop {
        match read() {
            Err(ref error) if is_transient(error) => {
                log::debug!("evdev: retrying read: {}", error);
            }
            result => return result,
        }
    }
}

pub struct InputEventSource {
    device: Device,
}

impl InputEventSource {
    pub fn new(path: &str) -> Result<InputEventSource, ErrorString> {
        let mut device = open(path)?;
        device
            .grab(GrabMode::Grab)
            .add_message(format!("grabbing {} failed", path))?;
        Ok(InputEventSource { device })
    }
}

impl Iterator for InputEventSource {
    type Item = io::Result<RawEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        let device = &self.device;
        let result = retry_transient(|| device.next_event(ReadFlag::NORMAL | ReadFlag::BLOCKING));
        Some(result.map(|(status, event)| {
            if status == ReadStatus::Sync {
                log::debug!("evdev: ReadStatus == Sync");
            }
            let (event_type, code) = event_code_to_int(&event.event_code);
            RawEvent::new(event_type as u16, code as u16, event.value)
        }))
    }
}

/// Groups events into the frames the kernel terminates with `SYN_REPORT`.
///
/// After a `SYN_DROPPED` the frame in progress and everything up to and
/// including the next `SYN_REPORT` is discarded.
pub struct FrameSource {
    input_event_source: Box<dyn Iterator<Item = io::Result<RawEvent>>>,
    stats: Stats,
}

impl FrameSource {
    pub fn new(
        input_event_source: impl Iterator<Item = io::Result<RawEvent>> + 'static,
        stats: Stats,
    ) -> FrameSource {
        FrameSource {
            input_event_source: Box::new(input_event_source),
            stats,
        }
    }
}

impl Iterator for FrameSource {
    type Item = Result<Vec<RawEvent>, ErrorString>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut result = vec![];
        let mut dropping = false;
        loop {
            match self.input_event_source.next() {
                None => {
                    if result.is_empty() {
                        return None;
                    } else {
                        break;
                    }
                }
                Some(Err(error)) => {
                    return Some(Err(ErrorString(format!("evdev: reading failed: {}", error))))
                }
                Some(Ok(event)) => {
                    if event.is_syn_dropped() {
                        log::warn!("FrameSource: dropped events");
                        self.stats.log_dropped();
                        result.clear();
                        dropping = true;
                    } else if event.is_syn_report() {
                        if dropping {
                            dropping = false;
                        } else {
                            break;
                        }
                    } else if !dropping {
                        result.push(event);
                    }
                }
            }
        }
        Some(Ok(result))
    }
}
