//! OS Wi-Fi scanning and current-connection lookup.
//!
//! Thin wrappers over platform tools: `netsh` on Windows, `nmcli` and
//! `iwconfig` on Linux. Output parsing is kept in pure functions so it is
//! testable without the tools installed; a missing tool degrades to an empty
//! result with a logged warning rather than an error.

use mac_oui::Oui;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use wifi_common::network::{channel_and_band, distance_from_rssi, quality_from_rssi};
use wifi_common::{CurrentConnection, NetworkInfo, WifiResult};

/// Scan for nearby networks, deduplicated by BSSID and sorted by RSSI
/// descending.
pub async fn scan_networks() -> WifiResult<Vec<NetworkInfo>> {
    let raw = run_scan_tool().await;

    let mut networks = match raw {
        Some(output) => parse_scan_output(&output),
        None => {
            warn!("no Wi-Fi scan tool available; returning empty scan");
            Vec::new()
        }
    };

    dedup_by_bssid(&mut networks);
    networks.sort_by(|a, b| b.rssi.cmp(&a.rssi));
    debug!(count = networks.len(), "scan complete");

    Ok(networks)
}

/// Look up the connection the host is currently associated with.
pub async fn current_connection() -> WifiResult<Option<CurrentConnection>> {
    Ok(query_current().await)
}

fn dedup_by_bssid(networks: &mut Vec<NetworkInfo>) {
    let mut seen = std::collections::HashSet::new();
    networks.retain(|n| seen.insert(n.bssid.clone()));
}

/// Embedded IEEE OUI registry, loaded once. A load failure downgrades every
/// vendor to "Unknown" instead of failing scans.
static OUI_DB: Lazy<Option<Oui>> = Lazy::new(|| match Oui::default() {
    Ok(db) => Some(db),
    Err(e) => {
        warn!(error = %e, "OUI database unavailable; vendors reported as Unknown");
        None
    }
});

/// Resolve the hardware vendor from a BSSID's OUI prefix.
pub fn vendor_for(bssid: &str) -> String {
    OUI_DB
        .as_ref()
        .and_then(|db| db.lookup_by_mac(bssid).ok().flatten())
        .map(|entry| entry.company_name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

// ============================================================================
// Windows (netsh)
// ============================================================================

#[cfg(target_os = "windows")]
async fn run_scan_tool() -> Option<String> {
    let output = Command::new("netsh")
        .args(["wlan", "show", "networks", "mode=bssid"])
        .output()
        .await
        .ok()?;
    Some(decode_console(&output.stdout))
}

#[cfg(target_os = "windows")]
fn parse_scan_output(output: &str) -> Vec<NetworkInfo> {
    parse_netsh_networks(output)
}

#[cfg(target_os = "windows")]
async fn query_current() -> Option<CurrentConnection> {
    let output = Command::new("netsh")
        .args(["wlan", "show", "interfaces"])
        .output()
        .await
        .ok()?;
    parse_netsh_interfaces(&decode_console(&output.stdout))
}

// ============================================================================
// Linux (nmcli / iwconfig)
// ============================================================================

#[cfg(not(target_os = "windows"))]
async fn run_scan_tool() -> Option<String> {
    let output = Command::new("nmcli")
        .args(["-t", "-f", "SSID,BSSID,SIGNAL,FREQ,SECURITY", "device", "wifi", "list"])
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        warn!("nmcli scan exited with {}", output.status);
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(not(target_os = "windows"))]
fn parse_scan_output(output: &str) -> Vec<NetworkInfo> {
    parse_nmcli_scan(output)
}

#[cfg(not(target_os = "windows"))]
async fn query_current() -> Option<CurrentConnection> {
    if let Ok(output) = Command::new("iwconfig").output().await {
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if let Some(conn) = parse_iwconfig(&text) {
            return Some(conn);
        }
    }

    // Fallback: active connection name via nmcli
    let output = Command::new("nmcli")
        .args(["-t", "-f", "SSID", "connection", "show", "--active"])
        .output()
        .await
        .ok()?;
    let ssid = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_string();
    if ssid.is_empty() {
        return None;
    }
    Some(CurrentConnection {
        ssid,
        bssid: "Unknown".to_string(),
        signal: 100, // nmcli active-connection listing carries no quality
        platform: "Linux (nmcli)".to_string(),
    })
}

// ============================================================================
// Parsers (pure functions, unit-tested on every platform)
// ============================================================================

/// Parse `nmcli -t -f SSID,BSSID,SIGNAL,FREQ,SECURITY device wifi list`.
///
/// Terse nmcli output separates fields with ':' and escapes literal colons
/// (as in BSSIDs) with a backslash.
#[cfg(any(test, not(target_os = "windows")))]
pub fn parse_nmcli_scan(output: &str) -> Vec<NetworkInfo> {
    output.lines().filter_map(parse_nmcli_line).collect()
}

#[cfg(any(test, not(target_os = "windows")))]
fn parse_nmcli_line(line: &str) -> Option<NetworkInfo> {
    let fields = split_terse(line);
    if fields.len() < 5 {
        return None;
    }

    let ssid = fields[0].clone();
    let bssid = fields[1].clone();
    // SIGNAL is a quality percentage; recover dBm from the linear model
    let signal_pct: i32 = fields[2].trim().parse().ok()?;
    let rssi = signal_pct / 2 - 100;

    let freq_mhz: u32 = fields[3]
        .trim()
        .trim_end_matches("MHz")
        .trim()
        .parse()
        .unwrap_or(0);
    let (channel, band) = channel_and_band(freq_mhz);

    let security = if fields[4].trim().is_empty() {
        "Open".to_string()
    } else {
        fields[4].trim().replace(' ', " / ")
    };

    Some(NetworkInfo {
        vendor: vendor_for(&bssid),
        ssid,
        bssid,
        rssi,
        channel,
        band,
        security,
        quality: quality_from_rssi(rssi),
        distance: distance_from_rssi(rssi, freq_mhz),
    })
}

/// Split one line of terse nmcli output on unescaped colons.
#[cfg(any(test, not(target_os = "windows")))]
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(any(test, not(target_os = "windows")))]
static IWCONFIG_ESSID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"ESSID:"([^"]+)""#).unwrap());
#[cfg(any(test, not(target_os = "windows")))]
static IWCONFIG_AP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Access Point:\s*([0-9A-Fa-f:]+)").unwrap());
#[cfg(any(test, not(target_os = "windows")))]
static IWCONFIG_QUALITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Link Quality=(\d+)/(\d+)").unwrap());

/// Parse `iwconfig` output into the current connection, if associated.
#[cfg(any(test, not(target_os = "windows")))]
pub fn parse_iwconfig(output: &str) -> Option<CurrentConnection> {
    let ssid = IWCONFIG_ESSID.captures(output)?[1].to_string();

    let bssid = IWCONFIG_AP
        .captures(output)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let signal = IWCONFIG_QUALITY
        .captures(output)
        .and_then(|c| {
            let current: f64 = c[1].parse().ok()?;
            let total: f64 = c[2].parse().ok()?;
            Some((current / total * 100.0) as u8)
        })
        .unwrap_or(0);

    Some(CurrentConnection {
        ssid,
        bssid,
        signal,
        platform: "Linux (iwconfig)".to_string(),
    })
}

#[cfg(any(test, target_os = "windows"))]
static NETSH_SSID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*SSID\s*:\s*(.+)$").unwrap());
#[cfg(any(test, target_os = "windows"))]
static NETSH_BSSID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*BSSID\s*:\s*(.+)$").unwrap());
#[cfg(any(test, target_os = "windows"))]
static NETSH_SIGNAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Signal\s*:\s*(\d+)%").unwrap());

/// Parse `netsh wlan show interfaces` output into the current connection.
#[cfg(any(test, target_os = "windows"))]
pub fn parse_netsh_interfaces(output: &str) -> Option<CurrentConnection> {
    let ssid = NETSH_SSID.captures(output)?[1].trim().to_string();
    let bssid = NETSH_BSSID
        .captures(output)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let signal = NETSH_SIGNAL
        .captures(output)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);

    Some(CurrentConnection {
        ssid,
        bssid,
        signal,
        platform: "Windows".to_string(),
    })
}

/// Parse `netsh wlan show networks mode=bssid` output.
///
/// The format is block-structured: an `SSID N : name` header followed by
/// authentication and per-BSSID sub-blocks carrying signal % and channel.
#[cfg(any(test, target_os = "windows"))]
pub fn parse_netsh_networks(output: &str) -> Vec<NetworkInfo> {
    static SSID_HEADER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^SSID \d+\s*:\s*(.*)$").unwrap());
    static AUTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"Authentication\s*:\s*(.+)").unwrap());
    static BSSID_LINE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^\s*BSSID \d+\s*:\s*([0-9a-fA-F:]+)").unwrap());
    static SIGNAL_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Signal\s*:\s*(\d+)%").unwrap());
    static CHANNEL_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Channel\s*:\s*(\d+)").unwrap());

    let mut networks = Vec::new();
    let headers: Vec<_> = SSID_HEADER.find_iter(output).collect();

    for (i, header) in headers.iter().enumerate() {
        let block_end = headers
            .get(i + 1)
            .map(|next| next.start())
            .unwrap_or(output.len());
        let block = &output[header.start()..block_end];

        let ssid = SSID_HEADER.captures(block).map(|c| c[1].trim().to_string());
        let ssid = match ssid {
            Some(s) => s,
            None => continue,
        };

        let auth = AUTH
            .captures(block)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let security = if auth.to_lowercase().contains("open") {
            "Open".to_string()
        } else {
            auth
        };

        for (j, bssid_match) in BSSID_LINE.find_iter(block).enumerate() {
            let sub_end = BSSID_LINE
                .find_iter(block)
                .nth(j + 1)
                .map(|m| m.start())
                .unwrap_or(block.len());
            let sub = &block[bssid_match.start()..sub_end];

            let bssid = match BSSID_LINE.captures(sub) {
                Some(c) => c[1].to_string(),
                None => continue,
            };
            let signal_pct: i32 = SIGNAL_LINE
                .captures(sub)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0);
            let rssi = signal_pct / 2 - 100;
            let channel: u32 = CHANNEL_LINE
                .captures(sub)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0);

            let freq_mhz = freq_from_channel(channel);
            let band = channel_and_band(freq_mhz).1;

            networks.push(NetworkInfo {
                ssid: ssid.clone(),
                vendor: vendor_for(&bssid),
                bssid,
                rssi,
                channel,
                band,
                security: security.clone(),
                quality: quality_from_rssi(rssi),
                distance: distance_from_rssi(rssi, freq_mhz),
            });
        }
    }

    networks
}

/// Decode console-tool output that is not guaranteed to be UTF-8.
///
/// `netsh` writes in the legacy OEM code page; on Cyrillic-locale Windows
/// that is cp866, which mangles non-ASCII SSIDs under a lossy UTF-8 read.
/// Valid UTF-8 passes through untouched.
#[cfg(any(test, target_os = "windows"))]
fn decode_console(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => encoding_rs::IBM866.decode(bytes).0.into_owned(),
    }
}

/// Approximate center frequency from a channel number. netsh reports only
/// the channel, so band metrics work from this estimate.
#[cfg(any(test, target_os = "windows"))]
fn freq_from_channel(channel: u32) -> u32 {
    match channel {
        0 => 0,
        14 => 2484,
        1..=13 => 2407 + channel * 5,
        _ => 5000 + channel * 5,
    }
}
