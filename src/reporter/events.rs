use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::TestError;

/// Browser/platform identity reported by a runner on start.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    pub browser_name: String,
    pub version: String,
    pub platform: String,
    pub platform_name: String,
    pub platform_version: String,
}

/// Failure screenshot captured out of band by a runner.
///
/// A screenshot carries no identity of its own; `uid` is the unique id of the
/// test it documents, and may arrive before, during, or after that test's
/// outcome event. Screenshots are buffered and only attached to tests once,
/// when the run ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub cid: String,
    pub uid: String,
    pub filename: String,
    /// Base64-encoded image payload.
    pub data: String,
    pub time: DateTime<Utc>,
}

/// Lifecycle events emitted by the test runner.
///
/// Events for a single cid arrive in order (start before end); across
/// different cids no ordering is assumed. `End` is the terminal event for the
/// whole run, distinct from any single runner's `RunnerEnd`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum RunnerEvent {
    #[serde(rename = "runner:start", rename_all = "camelCase")]
    RunnerStart {
        cid: String,
        capabilities: Capabilities,
        specs: Vec<String>,
        spec_hash: String,
    },

    #[serde(rename = "runner:end", rename_all = "camelCase")]
    RunnerEnd {
        cid: String,
        spec_hash: String,
        #[serde(default)]
        failures: u32,
    },

    #[serde(rename = "runner:screenshot")]
    RunnerScreenshot(Screenshot),

    #[serde(rename = "test:pass")]
    TestPass { cid: String, uid: String },

    #[serde(rename = "test:fail")]
    TestFail {
        cid: String,
        uid: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        err: Option<TestError>,
    },

    #[serde(rename = "test:pending")]
    TestPending { cid: String, uid: String },

    /// Terminal event for the whole run.
    #[serde(rename = "end")]
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        let event: RunnerEvent =
            serde_json::from_str(r#"{"event":"test:pass","cid":"0-0","uid":"t1"}"#).unwrap();
        assert_eq!(
            event,
            RunnerEvent::TestPass {
                cid: "0-0".to_string(),
                uid: "t1".to_string()
            }
        );

        let event: RunnerEvent = serde_json::from_str(r#"{"event":"end"}"#).unwrap();
        assert_eq!(event, RunnerEvent::End);
    }

    #[test]
    fn test_parse_runner_start() {
        let json = r#"{
            "event": "runner:start",
            "cid": "0-0",
            "capabilities": { "browserName": "chrome", "platform": "linux" },
            "specs": ["login.spec.js"],
            "specHash": "h1"
        }"#;

        let event: RunnerEvent = serde_json::from_str(json).unwrap();
        match event {
            RunnerEvent::RunnerStart {
                cid,
                capabilities,
                specs,
                spec_hash,
            } => {
                assert_eq!(cid, "0-0");
                assert_eq!(capabilities.browser_name, "chrome");
                assert_eq!(specs, vec!["login.spec.js".to_string()]);
                assert_eq!(spec_hash, "h1");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_screenshot_event_round_trip() {
        let json = r#"{
            "event": "runner:screenshot",
            "cid": "0-1",
            "uid": "checkout-3",
            "filename": "ERROR_checkout.png",
            "data": "aW1hZ2U=",
            "time": "2024-05-01T12:00:00Z"
        }"#;

        let event: RunnerEvent = serde_json::from_str(json).unwrap();
        let RunnerEvent::RunnerScreenshot(ref shot) = event else {
            panic!("expected screenshot event");
        };
        assert_eq!(shot.uid, "checkout-3");
        assert_eq!(shot.filename, "ERROR_checkout.png");

        let reparsed: RunnerEvent =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(reparsed, event);
    }
}
