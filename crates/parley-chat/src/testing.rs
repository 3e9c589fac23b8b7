//! Hand-written capability stubs shared by the unit tests in this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use parley_core::{
    CapabilityError, ChatRecord, ChatRecorder, CompletionRequest, EncyclopediaLookup,
    LanguageModel, WeatherLookup, WeatherReport, WebSearch,
};

/// Weather stub that knows a fixed set of places.
pub struct StubWeather {
    known: Vec<&'static str>,
    fail_with: Option<CapabilityError>,
    pub requested: Mutex<Vec<String>>,
}

impl StubWeather {
    pub fn knowing(known: &[&'static str]) -> Self {
        Self {
            known: known.to_vec(),
            fail_with: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CapabilityError) -> Self {
        Self {
            known: Vec::new(),
            fail_with: Some(err),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherLookup for StubWeather {
    async fn geocode_and_forecast(
        &self,
        location: &str,
    ) -> Result<WeatherReport, CapabilityError> {
        self.requested.lock().unwrap().push(location.to_string());
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        self.known
            .iter()
            .find(|k| k.eq_ignore_ascii_case(location))
            .map(|name| WeatherReport {
                resolved_name: name.to_string(),
                temperature_celsius: 18.5,
                wind_speed_kph: 12.0,
            })
            .ok_or_else(|| CapabilityError::NotFound(location.to_string()))
    }
}

/// Encyclopedia stub returning a canned summary per topic.
pub struct StubEncyclopedia {
    entries: Vec<(&'static str, &'static str)>,
    pub calls: AtomicUsize,
    pub last_topic: Mutex<Option<String>>,
}

impl StubEncyclopedia {
    pub fn with(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.to_vec(),
            calls: AtomicUsize::new(0),
            last_topic: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EncyclopediaLookup for StubEncyclopedia {
    async fn summary(&self, topic: &str) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_topic.lock().unwrap() = Some(topic.to_string());
        self.entries
            .iter()
            .find(|(t, _)| *t == topic)
            .map(|(_, s)| s.to_string())
            .ok_or_else(|| CapabilityError::NotFound(topic.to_string()))
    }
}

/// Search stub with a fixed outcome.
pub struct StubSearch {
    outcome: Result<Option<String>, CapabilityError>,
    pub calls: AtomicUsize,
}

impl StubSearch {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(Some(text.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            outcome: Ok(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: CapabilityError) -> Self {
        Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearch for StubSearch {
    async fn search(&self, _query: &str) -> Result<Option<String>, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Language-model stub that echoes whether it saw search context.
pub struct StubModel {
    fail_with: Option<CapabilityError>,
    fail_when_context: bool,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    pub fn working() -> Self {
        Self {
            fail_with: None,
            fail_when_context: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CapabilityError) -> Self {
        Self {
            fail_with: Some(err),
            fail_when_context: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails only the contextual synthesis call; direct calls succeed.
    pub fn failing_with_context() -> Self {
        Self {
            fail_with: None,
            fail_when_context: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CapabilityError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        let with_context = request.user_content.contains("Search results:");
        if with_context && self.fail_when_context {
            return Err(CapabilityError::Unavailable("synthesis failed".into()));
        }
        if with_context {
            Ok("synthesized answer".to_string())
        } else {
            Ok("direct answer".to_string())
        }
    }
}

/// Recorder stub that keeps records in memory.
pub struct StubRecorder {
    ready: bool,
    pub records: Mutex<Vec<ChatRecord>>,
    pub ready_checks: AtomicUsize,
}

impl StubRecorder {
    pub fn new(ready: bool) -> Self {
        Self {
            ready,
            records: Mutex::new(Vec::new()),
            ready_checks: AtomicUsize::new(0),
        }
    }

    pub fn recorded(&self) -> Vec<ChatRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatRecorder for StubRecorder {
    fn is_ready(&self) -> bool {
        self.ready_checks.fetch_add(1, Ordering::SeqCst);
        self.ready
    }

    async fn record_chat(&self, record: ChatRecord) -> Result<(), CapabilityError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}
