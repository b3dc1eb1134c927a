//! Speed-test invocation via the `speedtest-cli` tool.

use chrono::Utc;
use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

use wifi_common::{WifiError, WifiResult};

use crate::store::SpeedtestResult;

/// Raw JSON shape produced by `speedtest-cli --json`.
#[derive(Debug, Deserialize)]
struct CliOutput {
    /// Bits per second.
    download: f64,
    /// Bits per second.
    upload: f64,
    /// Milliseconds.
    ping: f64,
    server: CliServer,
}

#[derive(Debug, Deserialize)]
struct CliServer {
    sponsor: String,
}

/// Run a speed test and convert to the stored result shape
/// (Mbit/s, rounded the way the app has always displayed them).
pub async fn run_speedtest() -> WifiResult<SpeedtestResult> {
    let output = Command::new("speedtest-cli")
        .arg("--json")
        .output()
        .await
        .map_err(|e| WifiError::Speedtest(format!("failed to launch speedtest-cli: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WifiError::Speedtest(format!(
            "speedtest-cli exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let raw: CliOutput = serde_json::from_slice(&output.stdout)
        .map_err(|e| WifiError::Speedtest(format!("unexpected speedtest-cli output: {}", e)))?;

    let result = convert(raw);
    info!(
        download = result.download,
        upload = result.upload,
        ping = result.ping,
        "speedtest complete"
    );
    Ok(result)
}

fn convert(raw: CliOutput) -> SpeedtestResult {
    SpeedtestResult {
        timestamp: Utc::now(),
        download: round2(raw.download / 1_000_000.0),
        upload: round2(raw.upload / 1_000_000.0),
        ping: round1(raw.ping),
        server: raw.server.sponsor,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_units_and_rounding() {
        let raw: CliOutput = serde_json::from_str(
            r#"{
                "download": 93457123.9,
                "upload": 11234560.2,
                "ping": 17.8642,
                "server": {"sponsor": "Example ISP"}
            }"#,
        )
        .unwrap();

        let result = convert(raw);
        assert_eq!(result.download, 93.46);
        assert_eq!(result.upload, 11.23);
        assert_eq!(result.ping, 17.9);
        assert_eq!(result.server, "Example ISP");
    }
}
