//! Test doubles and common utilities for provider contract tests
//!
//! [`FakeNetcup`] is an in-memory stand-in for the CCP endpoint. It speaks
//! the same envelope, tracks sessions, records every action it receives and
//! applies `updateDnsRecords` to its zone the way the provider does:
//! deletion entries remove by id, entries with an id update in place,
//! entries without one are created with a fresh id, and the answer is the
//! whole post-update record set.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zonesync_core::{ClientConfig, Error, ProviderRecord, Result};
use zonesync_provider_netcup::{ActionClient, Credentials, NetcupProvider, Transport};

pub const ZONE: &str = "example.com";
pub const PASSWORD: &str = "password";

#[derive(Default)]
struct State {
    records: Vec<ProviderRecord>,
    ttl: u32,
    next_id: u64,
    actions: Vec<String>,
    submitted: Vec<Vec<ProviderRecord>>,
    sessions: HashSet<String>,
    session_counter: u64,
    max_open_sessions: usize,
    failing: HashMap<String, (String, String)>,
    broken: HashSet<String>,
    hanging: HashSet<String>,
    overrides: HashMap<String, Value>,
    delay: Option<Duration>,
}

/// In-memory CCP endpoint
#[derive(Clone)]
pub struct FakeNetcup {
    state: Arc<Mutex<State>>,
}

impl FakeNetcup {
    /// A zone with the given records and TTL; ids are preserved
    pub fn with_records(records: Vec<ProviderRecord>, ttl: u32) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Arc::new(Mutex::new(State {
                records,
                ttl,
                next_id,
                ..State::default()
            })),
        }
    }

    /// An empty zone
    pub fn empty() -> Self {
        Self::with_records(Vec::new(), 300)
    }

    /// Answer `action` with an error envelope
    pub fn fail_action(&self, action: &str, short: &str, long: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(action.to_string(), (short.to_string(), long.to_string()));
    }

    /// Fail `action` at the transport level
    pub fn break_action(&self, action: &str) {
        self.state.lock().unwrap().broken.insert(action.to_string());
    }

    /// Never answer `action`
    pub fn hang_action(&self, action: &str) {
        self.state.lock().unwrap().hanging.insert(action.to_string());
    }

    /// Answer `action` successfully with `data` as its `responsedata`
    pub fn respond_with(&self, action: &str, data: Value) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(action.to_string(), data);
    }

    /// Delay every answer
    pub fn set_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    /// Actions received so far, in order
    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    /// Number of times `action` was received
    pub fn count(&self, action: &str) -> usize {
        self.actions().iter().filter(|a| *a == action).count()
    }

    /// Batches received by `updateDnsRecords`
    pub fn submitted(&self) -> Vec<Vec<ProviderRecord>> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Current zone content
    pub fn records(&self) -> Vec<ProviderRecord> {
        self.state.lock().unwrap().records.clone()
    }

    /// Sessions logged in but not logged out
    pub fn open_sessions(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    /// Highest number of simultaneously open sessions seen
    pub fn max_open_sessions(&self) -> usize {
        self.state.lock().unwrap().max_open_sessions
    }

    fn handle(&self, action: &str, param: &Value) -> Value {
        let mut state = self.state.lock().unwrap();

        if let Some((short, long)) = state.failing.get(action) {
            return error_envelope(action, short, long);
        }

        if action == "login" {
            if param["apipassword"] != PASSWORD || param.get("apisessionid").is_some() {
                return error_envelope(action, "Login failed", "Invalid credentials");
            }
            state.session_counter += 1;
            let id = format!("session-{}", state.session_counter);
            state.sessions.insert(id.clone());
            state.max_open_sessions = state.max_open_sessions.max(state.sessions.len());
            return success_envelope(action, json!({ "apisessionid": id }));
        }

        let session = param["apisessionid"].as_str().unwrap_or_default();
        if !state.sessions.contains(session) || param.get("apipassword").is_some() {
            return error_envelope(action, "Session expired", "The session id is invalid");
        }

        if let Some(data) = state.overrides.get(action) {
            return success_envelope(action, data.clone());
        }

        match action {
            "logout" => {
                state.sessions.remove(session);
                success_envelope(action, json!(""))
            }
            "infoDnsZone" => success_envelope(
                action,
                json!({
                    "name": param["domainname"],
                    "ttl": state.ttl.to_string(),
                    "serial": "2024010101",
                    "refresh": "28800",
                    "retry": "7200",
                    "expire": "1209600",
                    "dnssecstatus": false,
                }),
            ),
            "infoDnsRecords" => {
                success_envelope(action, json!({ "dnsrecords": state.records }))
            }
            "updateDnsRecords" => {
                let batch: Vec<ProviderRecord> =
                    serde_json::from_value(param["dnsrecordset"]["dnsrecords"].clone())
                        .expect("well-formed dnsrecordset");
                state.submitted.push(batch.clone());
                for entry in batch {
                    apply(&mut state, entry);
                }
                success_envelope(action, json!({ "dnsrecords": state.records }))
            }
            other => error_envelope(other, "Unknown action", "No such action"),
        }
    }
}

fn apply(state: &mut State, mut entry: ProviderRecord) {
    if entry.marked_for_deletion {
        state.records.retain(|r| r.id != entry.id);
        return;
    }
    if let Some(existing) = state.records.iter_mut().find(|r| r.has_id() && r.id == entry.id) {
        *existing = entry;
        return;
    }
    entry.id = state.next_id.to_string();
    state.next_id += 1;
    state.records.push(entry);
}

fn success_envelope(action: &str, data: Value) -> Value {
    json!({
        "serverrequestid": "srv",
        "clientrequestid": "",
        "action": action,
        "status": "success",
        "statuscode": 2000,
        "shortmessage": format!("{} successful", action),
        "longmessage": "",
        "responsedata": data,
    })
}

fn error_envelope(action: &str, short: &str, long: &str) -> Value {
    json!({
        "serverrequestid": "srv",
        "clientrequestid": "",
        "action": action,
        "status": "error",
        "statuscode": 4013,
        "shortmessage": short,
        "longmessage": long,
        "responsedata": "",
    })
}

#[async_trait]
impl Transport for FakeNetcup {
    async fn exchange(&self, request: &Value) -> Result<Value> {
        let action = request["action"].as_str().unwrap_or_default().to_string();

        let (delay, hang, broken) = {
            let mut state = self.state.lock().unwrap();
            state.actions.push(action.clone());
            (
                state.delay,
                state.hanging.contains(&action),
                state.broken.contains(&action),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if hang {
            return std::future::pending().await;
        }
        if broken {
            return Err(Error::transport(format!("connection reset during {}", action)));
        }

        Ok(self.handle(&action, &request["param"]))
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("12345", "key", PASSWORD)
}

pub fn client_config() -> ClientConfig {
    ClientConfig {
        request_timeout_secs: 5,
        logout_timeout_secs: 1,
        dry_run: false,
    }
}

pub fn action_client(fake: &FakeNetcup) -> ActionClient {
    ActionClient::new(Arc::new(fake.clone()), credentials(), Duration::from_millis(200))
}

pub fn provider(fake: &FakeNetcup) -> NetcupProvider {
    NetcupProvider::with_transport(credentials(), Arc::new(fake.clone()), &client_config())
}

pub fn dry_run_provider(fake: &FakeNetcup) -> NetcupProvider {
    NetcupProvider::with_transport(
        credentials(),
        Arc::new(fake.clone()),
        &client_config().with_dry_run(true),
    )
}

pub fn rec(id: &str, host: &str, ty: &str, dest: &str, priority: u32) -> ProviderRecord {
    ProviderRecord::new(host, ty, dest)
        .with_id(id)
        .with_priority(priority)
}
