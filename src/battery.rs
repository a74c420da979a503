//! Battery level of the trackpad, as reported by UPower.

use crate::{AddMessage, ErrorString};
use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::OwnedObjectPath;

const UPOWER: &str = "org.freedesktop.UPower";
const UPOWER_PATH: &str = "/org/freedesktop/UPower";
const UPOWER_DEVICE: &str = "org.freedesktop.UPower.Device";

#[derive(Debug, PartialEq)]
pub enum BatteryReport {
    Fine(String),
    Low(String),
}

pub fn report(percentage: f64, warning_threshold: f64) -> BatteryReport {
    if percentage <= warning_threshold {
        BatteryReport::Low(format!(
            "battery at {:.0}%, a recharge is needed",
            percentage
        ))
    } else {
        BatteryReport::Fine(format!("battery at {:.0}%", percentage))
    }
}

/// Percentage of the first UPower device whose model matches `model`.
pub fn query_percentage(model: &str) -> Result<Option<f64>, ErrorString> {
    let connection =
        Connection::system().add_message("cannot connect to the system bus".to_string())?;
    let upower = Proxy::new(&connection, UPOWER, UPOWER_PATH, UPOWER)
        .add_message("cannot reach UPower".to_string())?;
    let devices: Vec<OwnedObjectPath> = upower
        .call("EnumerateDevices", &())
        .add_message("EnumerateDevices failed".to_string())?;
    for device in devices {
        let properties = Proxy::new(&connection, UPOWER, device.as_str(), UPOWER_DEVICE)
            .add_message(format!("cannot reach {}", device.as_str()))?;
        let device_model: String = properties
            .get_property("Model")
            .add_message(format!("reading Model of {} failed", device.as_str()))?;
        log::debug!("UPower device {}: {:?}", device.as_str(), device_model);
        if device_model == model {
            let percentage: f64 = properties
                .get_property("Percentage")
                .add_message(format!("reading Percentage of {} failed", device.as_str()))?;
            return Ok(Some(percentage));
        }
    }
    Ok(None)
}

/// Logs the battery level at startup. Failures are logged and ignored.
pub fn log_battery(model: &str, warning_threshold: f64) {
    match query_percentage(model) {
        Ok(Some(percentage)) => match report(percentage, warning_threshold) {
            BatteryReport::Fine(message) => log::info!("{}", message),
            BatteryReport::Low(message) => log::warn!("{}", message),
        },
        Ok(None) => log::info!("no battery information for {:?}", model),
        Err(error) => log::warn!("cannot query the battery level: {}", error),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reports_fine_levels() {
        assert_eq!(
            report(64.0, 10.0),
            BatteryReport::Fine("battery at 64%".to_string())
        );
    }

    #[test]
    fn warns_at_the_threshold() {
        assert_eq!(
            report(10.0, 10.0),
            BatteryReport::Low("battery at 10%, a recharge is needed".to_string())
        );
    }

    #[test]
    fn warns_below_the_threshold() {
        match report(3.0, 20.0) {
            BatteryReport::Low(message) => assert!(message.starts_with("battery at 3%")),
            other => panic!("expected a warning, got: {:?}", other),
        }
    }

    #[test]
    fn rounds_percentages() {
        assert_eq!(
            report(57.6, 10.0),
            BatteryReport::Fine("battery at 58%".to_string())
        );
    }
}
