//! Notification trigger rules.
//!
//! Pure analysis over fresh scan/speedtest data; the handlers push whatever
//! these return into the notification store.

use std::collections::HashMap;

use wifi_common::NetworkInfo;

use crate::store::{NotificationCategory, NotificationSeverity, SpeedtestResult};

/// Networks on the same channel above this count trip a congestion warning.
const CONGESTION_THRESHOLD: usize = 5;

/// Download speeds below this many Mbit/s are critical.
const LOW_DOWNLOAD_MBPS: f64 = 5.0;

/// Pings above this many milliseconds trip a latency warning.
const HIGH_PING_MS: f64 = 100.0;

/// A notification waiting to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub category: NotificationCategory,
    pub event: &'static str,
    pub description: String,
    pub severity: NotificationSeverity,
}

/// Analyze scan results for security and congestion problems.
pub fn check_scan_results(networks: &[NetworkInfo]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    // Open (unsecured) networks nearby
    let open: Vec<&NetworkInfo> = networks.iter().filter(|n| n.is_open()).collect();
    if !open.is_empty() {
        let names: Vec<&str> = open
            .iter()
            .take(3)
            .map(|n| {
                if n.ssid.is_empty() {
                    "Hidden"
                } else {
                    n.ssid.as_str()
                }
            })
            .collect();
        alerts.push(Alert {
            category: NotificationCategory::Security,
            event: "Unsecured Network Detected",
            description: format!(
                "Detected {} open networks nearby: {}. Keep your devices secure.",
                open.len(),
                names.join(", ")
            ),
            severity: NotificationSeverity::Warning,
        });
    }

    // Channel congestion
    let mut per_channel: HashMap<u32, usize> = HashMap::new();
    for n in networks {
        *per_channel.entry(n.channel).or_default() += 1;
    }
    let mut congested: Vec<(u32, usize)> = per_channel
        .into_iter()
        .filter(|&(ch, count)| ch != 0 && count > CONGESTION_THRESHOLD)
        .collect();
    congested.sort_unstable();
    for (channel, count) in congested {
        alerts.push(Alert {
            category: NotificationCategory::Wifi,
            event: "Channel Congestion",
            description: format!(
                "Channel {} is very crowded ({} networks). Consider switching.",
                channel, count
            ),
            severity: NotificationSeverity::Warning,
        });
    }

    alerts
}

/// Analyze a speed-test result for throughput and latency problems.
pub fn check_speedtest_result(result: &SpeedtestResult) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if result.download < LOW_DOWNLOAD_MBPS {
        alerts.push(Alert {
            category: NotificationCategory::Internet,
            event: "Low Internet Speed",
            description: format!(
                "Download speed dropped to {} Mbps. Check your ISP connection.",
                result.download
            ),
            severity: NotificationSeverity::Critical,
        });
    }

    if result.ping > HIGH_PING_MS {
        alerts.push(Alert {
            category: NotificationCategory::Internet,
            event: "High Latency Detected",
            description: format!(
                "Ping is {} ms. This may affect online gaming and calls.",
                result.ping
            ),
            severity: NotificationSeverity::Warning,
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wifi_common::network::{distance_from_rssi, quality_from_rssi};

    fn network(ssid: &str, bssid: &str, channel: u32, security: &str) -> NetworkInfo {
        NetworkInfo {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            vendor: "Unknown".to_string(),
            rssi: -60,
            channel,
            band: "2.4".to_string(),
            security: security.to_string(),
            quality: quality_from_rssi(-60),
            distance: distance_from_rssi(-60, 2437),
        }
    }

    #[test]
    fn test_open_network_alert() {
        let networks = vec![
            network("Safe", "aa:00", 1, "WPA2"),
            network("Cafe", "aa:01", 6, "Open"),
            network("", "aa:02", 11, "Open"),
        ];

        let alerts = check_scan_results(&networks);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, NotificationCategory::Security);
        assert!(alerts[0].description.contains("2 open networks"));
        assert!(alerts[0].description.contains("Hidden"));
    }

    #[test]
    fn test_congestion_alert_over_threshold() {
        let mut networks: Vec<NetworkInfo> = (0..6)
            .map(|i| network(&format!("N{}", i), &format!("aa:{:02x}", i), 6, "WPA2"))
            .collect();
        networks.push(network("Other", "bb:00", 11, "WPA2"));

        let alerts = check_scan_results(&networks);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event, "Channel Congestion");
        assert!(alerts[0].description.contains("Channel 6"));
        assert!(alerts[0].description.contains("6 networks"));
    }

    #[test]
    fn test_unknown_channel_never_congested() {
        let networks: Vec<NetworkInfo> = (0..10)
            .map(|i| network(&format!("N{}", i), &format!("aa:{:02x}", i), 0, "WPA2"))
            .collect();
        assert!(check_scan_results(&networks).is_empty());
    }

    fn speedtest(download: f64, ping: f64) -> SpeedtestResult {
        SpeedtestResult {
            timestamp: Utc::now(),
            download,
            upload: 10.0,
            ping,
            server: "Example ISP".to_string(),
        }
    }

    #[test]
    fn test_low_speed_is_critical() {
        let alerts = check_speedtest_result(&speedtest(2.5, 20.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, NotificationSeverity::Critical);
    }

    #[test]
    fn test_high_ping_is_warning() {
        let alerts = check_speedtest_result(&speedtest(80.0, 150.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, NotificationSeverity::Warning);
    }

    #[test]
    fn test_healthy_result_no_alerts() {
        assert!(check_speedtest_result(&speedtest(95.0, 12.0)).is_empty());
    }
}
