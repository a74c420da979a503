use crate::slots::OverflowPolicy;
use crate::ErrorString;
use clap::{App, Arg};
use std::ffi::OsString;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_DEVICE_NAME: &str = "Apple Inc. Magic Trackpad 2";

#[derive(Debug, Clone)]
pub struct Args {
    pub device: Option<String>,
    pub name: String,
    pub address: String,
    pub interval: u64,
    pub on_overflow: OverflowPolicy,
    pub battery_model: String,
    pub battery_warning: f64,
    pub debug: bool,
}

pub fn parse<'a, 'b>(app: App<'a, 'b>) -> Result<Args, ErrorString> {
    parse_from(app, std::env::args_os())
}

pub fn parse_from<'a, 'b, I, T>(app: App<'a, 'b>, args: I) -> Result<Args, ErrorString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let overflow_help = format!(
        "what to do with contacts beyond the fifth, possible values: {:?}, (default: {:?})",
        OverflowPolicy::iter_variants().collect::<Vec<OverflowPolicy>>(),
        OverflowPolicy::default()
    );
    let name_help = format!(
        "name of the input device to look for (default: {:?})",
        DEFAULT_DEVICE_NAME
    );
    let matches = app
        .version("0.1.0")
        .author("Sönke Hahn <soenkehahn@gmail.com>")
        .about("relays the contacts on a multitouch trackpad to network clients")
        .arg(
            Arg::with_name("device")
                .long("device")
                .value_name("PATH")
                .help("reads from this event file instead of looking the trackpad up by name")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("name")
                .long("name")
                .value_name("NAME")
                .help(&name_help)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("address")
                .long("address")
                .value_name("ADDRESS")
                .help("address to broadcast on (default: 0.0.0.0:8000)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("interval")
                .long("interval")
                .value_name("MILLISECONDS")
                .help("time between two broadcasts (default: 10)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("on-overflow")
                .long("on-overflow")
                .value_name("POLICY")
                .help(&overflow_help)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("battery-model")
                .long("battery-model")
                .value_name("MODEL")
                .help("UPower model name of the trackpad (default: the device name)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("battery-warning")
                .long("battery-warning")
                .value_name("PERCENT")
                .help("warns at startup if the battery is at or below this level (default: 10)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("logs every event received from the trackpad (default: false)")
                .takes_value(false),
        )
        .get_matches_from(args);
    let device = matches.value_of("device").map(String::from);
    let name = matches
        .value_of("name")
        .unwrap_or(DEFAULT_DEVICE_NAME)
        .to_string();
    let address = matches.value_of("address").unwrap_or("0.0.0.0:8000").to_string();
    let interval: u64 = parse_with_default(matches.value_of("interval"), 10)?;
    let on_overflow = parse_overflow_policy(matches.value_of("on-overflow"))?;
    let battery_model = matches
        .value_of("battery-model")
        .map(String::from)
        .unwrap_or_else(|| name.clone());
    let battery_warning: f64 = parse_with_default(matches.value_of("battery-warning"), 10.0)?;
    let debug = matches.is_present("debug");
    Ok(Args {
        device,
        name,
        address,
        interval,
        on_overflow,
        battery_model,
        battery_warning,
        debug,
    })
}

fn parse_with_default<N>(input: Option<&str>, default: N) -> Result<N, ErrorString>
where
    N: FromStr,
    <N as FromStr>::Err: Display,
{
    match input {
        None => Ok(default),
        Some(string) => string
            .parse()
            .map_err(|e| ErrorString::from(format!("{}: {}", string, e))),
    }
}

fn parse_overflow_policy(input: Option<&str>) -> Result<OverflowPolicy, ErrorString> {
    match input {
        None => Ok(OverflowPolicy::default()),
        Some("Reject") => Ok(OverflowPolicy::Reject),
        Some("EvictOldest") => Ok(OverflowPolicy::EvictOldest),
        Some(policy) => Err(ErrorString(format!(
            "unknown overflow policy: {}, possible values: {:?}",
            policy,
            OverflowPolicy::iter_variants().collect::<Vec<OverflowPolicy>>()
        ))),
    }
}
