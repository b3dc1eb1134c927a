//! Scanned-network types and RSSI-derived metrics.

use serde::{Deserialize, Serialize};

/// A single access point observed during a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub ssid: String,
    pub bssid: String,
    /// Hardware vendor resolved from the BSSID's OUI prefix, or "Unknown".
    pub vendor: String,
    /// Received signal strength in dBm.
    pub rssi: i32,
    pub channel: u32,
    /// Frequency band label: "2.4", "5", "6", or a raw MHz fallback.
    pub band: String,
    /// Security suites, e.g. "WPA2" or "WPA2 / WPA". "Open" when unsecured.
    pub security: String,
    /// Link quality as a percentage derived from RSSI.
    pub quality: u8,
    /// Estimated distance to the access point in meters (FSPL model).
    pub distance: f64,
}

impl NetworkInfo {
    pub fn is_open(&self) -> bool {
        self.security.contains("Open")
    }
}

/// The connection the host is currently associated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConnection {
    pub ssid: String,
    pub bssid: String,
    /// Link quality percentage as reported by the OS tool.
    pub signal: u8,
    /// Which OS path produced the reading, e.g. "Linux (iwconfig)".
    pub platform: String,
}

/// Convert RSSI to a link-quality percentage.
///
/// Linear between -100 dBm (0%) and -50 dBm (100%).
pub fn quality_from_rssi(rssi: i32) -> u8 {
    if rssi <= -100 {
        0
    } else if rssi >= -50 {
        100
    } else {
        (2 * (rssi + 100)) as u8
    }
}

/// Estimate distance to the transmitter in meters from RSSI and frequency,
/// using the free-space path loss model. Returns 0.0 on nonsensical input.
pub fn distance_from_rssi(rssi: i32, freq_mhz: u32) -> f64 {
    if freq_mhz == 0 {
        return 0.0;
    }
    let exp = (27.55 - 20.0 * (freq_mhz as f64).log10() + (rssi as f64).abs()) / 20.0;
    let meters = 10f64.powf(exp);
    (meters * 100.0).round() / 100.0
}

/// Derive the Wi-Fi channel number and band label from a center frequency.
///
/// Accepts MHz; values that look like kHz (>10000) are scaled down first.
pub fn channel_and_band(freq: u32) -> (u32, String) {
    let freq_mhz = if freq > 10_000 { freq / 1000 } else { freq };

    match freq_mhz {
        2412..=2484 => {
            let channel = if freq_mhz == 2484 {
                14
            } else {
                (freq_mhz - 2407) / 5
            };
            (channel, "2.4".to_string())
        }
        5180..=5825 => ((freq_mhz - 5000) / 5, "5".to_string()),
        5925..=7125 => ((freq_mhz - 5930) / 5, "6".to_string()),
        _ => (0, format!("{} MHz", freq_mhz)),
    }
}
