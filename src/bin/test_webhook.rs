//! Manual smoke test for the Slack webhook integration: sends one sample
//! alert to the URL given on the command line and exits 0/1 on delivery.

use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

const WEBHOOK_PREFIX: &str = "https://hooks.slack.com/services/";

fn sample_alert() -> serde_json::Value {
    let now = Utc::now();

    json!({
        "text": "🚨 AutoPot Security Alert - Test Message",
        "attachments": [
            {
                "color": "#FF6600",
                "fields": [
                    { "title": "Alert Type", "value": "Honey User Sign-in Attempt", "short": true },
                    { "title": "Severity", "value": "HIGH", "short": true },
                    { "title": "Source IP", "value": "192.168.1.100", "short": true },
                    {
                        "title": "Time Detected",
                        "value": now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                        "short": true
                    },
                    {
                        "title": "Description",
                        "value": "Failed login attempt detected for honey user account john.doe@autopot.local",
                        "short": false
                    },
                    {
                        "title": "User Agent",
                        "value": "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
                        "short": false
                    }
                ],
                "footer": "AutoPot Security Monitor - Test",
                "ts": now.timestamp()
            }
        ]
    })
}

async fn send_test_alert(webhook_url: &str) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            eprintln!("❌ Failed to build HTTP client: {}", error);
            return false;
        }
    };

    println!("🔄 Sending test notification to Slack...");

    match client.post(webhook_url).json(&sample_alert()).send().await {
        Ok(response) if response.status().is_success() => {
            println!("✅ Test notification sent successfully!");
            println!("📱 Check your Slack channel for the test alert.");
            true
        }
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            eprintln!("❌ Failed to send notification: {}", status);
            eprintln!("Response: {}", body);
            false
        }
        Err(error) => {
            eprintln!("❌ Error sending notification: {}", error);
            false
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    println!("🧪 AutoPot Slack Notification Test");
    println!("{}", "=".repeat(40));

    let Some(webhook_url) = std::env::args().nth(1) else {
        eprintln!("Usage: test_webhook <slack_webhook_url>");
        eprintln!();
        eprintln!("Example:");
        eprintln!(
            "test_webhook {}T00000000/B00000000/XXXXXXXXXXXXXXXXXXXXXXXX",
            WEBHOOK_PREFIX
        );
        return ExitCode::FAILURE;
    };

    if !webhook_url.starts_with(WEBHOOK_PREFIX) {
        eprintln!("❌ Invalid Slack webhook URL format");
        eprintln!("URL should start with: {}", WEBHOOK_PREFIX);
        return ExitCode::FAILURE;
    }

    let shown: String = webhook_url.chars().take(50).collect();
    println!("🎯 Testing webhook: {}...", shown);

    if send_test_alert(&webhook_url).await {
        println!();
        println!("✅ Test completed successfully!");
        println!("Your AutoPot monitoring system is ready to send Slack notifications.");
        ExitCode::SUCCESS
    } else {
        println!();
        println!("❌ Test failed!");
        println!("Please check your webhook URL and try again.");
        ExitCode::FAILURE
    }
}
