#[macro_use]
extern crate custom_derive;
#[macro_use]
extern crate enum_derive;
#[cfg(test)]
#[macro_use]
extern crate galvanic_test;

mod battery;
mod cli;
mod codes;
mod contact;
mod device_state;
mod evdev;
mod ingest;
mod sink;
mod slots;
mod snapshot;
mod stats;
mod utils;

use evdev::{FrameSource, InputEventSource};
use ingest::Ingestion;
use log::LevelFilter;
use sink::Broadcaster;
use skipchannel::skipchannel;
use stats::Stats;
use std::fmt;
use std::time::Duration;

pub struct ErrorString(pub String);

impl fmt::Debug for ErrorString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ErrorString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ErrorString {
    fn from(string: String) -> ErrorString {
        ErrorString(string)
    }
}

impl From<&str> for ErrorString {
    fn from(string: &str) -> ErrorString {
        ErrorString(string.to_string())
    }
}

impl From<std::io::Error> for ErrorString {
    fn from(error: std::io::Error) -> ErrorString {
        ErrorString(error.to_string())
    }
}

pub trait AddMessage<T> {
    fn add_message(self, message: String) -> Result<T, ErrorString>;
}

impl<T, E: fmt::Debug> AddMessage<T> for Result<T, E> {
    fn add_message(self, message: String) -> Result<T, ErrorString> {
        self.map_err(|e| ErrorString(format!("{}: {:?}", message, e)))
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
}

fn main() -> Result<(), ErrorString> {
    let args = cli::parse(clap::App::new("trackpad-relay"))?;
    init_logging(args.debug);
    let stats = Stats::new();
    let _stats_worker = stats.spawn();
    let battery_model = args.battery_model.clone();
    let battery_warning = args.battery_warning;
    std::thread::spawn(move || battery::log_battery(&battery_model, battery_warning));
    let path = match args.device {
        Some(path) => path,
        None => evdev::find_device(&args.name)?,
    };
    let input_event_source = InputEventSource::new(&path)?;
    log::info!("reading touches from {}", path);
    let (broadcaster, address) = Broadcaster::bind(&args.address)?;
    log::info!("broadcasting on {}", address);
    let (sender, receiver) = skipchannel();
    let _sink = sink::spawn_sink(
        receiver,
        broadcaster,
        Duration::from_millis(args.interval),
    );
    let mut ingestion = Ingestion::new(args.on_overflow, sender, stats.clone());
    let result = ingestion.run(FrameSource::new(input_event_source, stats));
    if let Err(error) = &result {
        log::error!("{}", error);
    }
    result
}
