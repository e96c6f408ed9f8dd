//! Scripted endpoints for unit tests

use crate::dispatch::{Dispatcher, RecordingSleeper};
use crate::endpoint::{Endpoint, EndpointRegistry};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Params};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses and records every call
#[derive(Default)]
pub struct ScriptedEndpoint {
    responses: Mutex<VecDeque<Result<JsonValue>>>,
    calls: Mutex<Vec<Params>>,
}

impl ScriptedEndpoint {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ok(self: &Arc<Self>, value: JsonValue) -> Arc<Self> {
        self.responses.lock().unwrap().push_back(Ok(value));
        self.clone()
    }

    pub fn status(self: &Arc<Self>, status: u16) -> Arc<Self> {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(Error::http_status(status, "")));
        self.clone()
    }

    pub fn fail(self: &Arc<Self>, err: Error) -> Arc<Self> {
        self.responses.lock().unwrap().push_back(Err(err));
        self.clone()
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Endpoint for ScriptedEndpoint {
    async fn call(&self, params: &Params) -> Result<JsonValue> {
        self.calls.lock().unwrap().push(params.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(JsonValue::Null))
    }
}

/// Dispatcher over one scripted endpoint, with a recording sleeper
pub fn dispatcher_for(
    id: &str,
    endpoint: &Arc<ScriptedEndpoint>,
) -> (Dispatcher, RecordingSleeper) {
    dispatcher_with(&[(id, endpoint)])
}

/// Dispatcher over several scripted endpoints, with a recording sleeper
pub fn dispatcher_with(
    endpoints: &[(&str, &Arc<ScriptedEndpoint>)],
) -> (Dispatcher, RecordingSleeper) {
    let mut builder = EndpointRegistry::builder();
    for (id, endpoint) in endpoints {
        builder = builder.register_arc(*id, Arc::clone(endpoint) as Arc<dyn Endpoint>);
    }
    let sleeper = RecordingSleeper::new();
    let dispatcher =
        Dispatcher::new(Arc::new(builder.build())).with_sleeper(Arc::new(sleeper.clone()));
    (dispatcher, sleeper)
}
