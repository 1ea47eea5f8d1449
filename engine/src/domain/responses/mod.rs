//! Response DTOs and the response wire contract
//!
//! Every response carries a `response_name` (the top-level wire key) and an
//! `object_name` used to wrap single objects and list elements.

mod dto;

pub use dto::{
    AsyncJobResponse, CapabilitiesResponse, EventTypeResponse, JobCreatedResponse,
    KeyPairResponse, PasswordResponse, SuccessResponse, SystemVmResponse,
};

use serde::Serialize;
use serde_json::{Map, Value};

/// Typed payload of a response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    Success(SuccessResponse),
    KeyPair(KeyPairResponse),
    KeyPairs(Vec<KeyPairResponse>),
    SystemVm(SystemVmResponse),
    Password(PasswordResponse),
    Capabilities(CapabilitiesResponse),
    EventTypes(Vec<EventTypeResponse>),
    JobCreated(JobCreatedResponse),
    AsyncJob(AsyncJobResponse),
    AsyncJobs(Vec<AsyncJobResponse>),
}

enum WireShape {
    Inline(Value),
    Object(Value),
    List(Vec<Value>),
}

impl ResponsePayload {
    /// Object name used when a command does not set one
    pub fn default_object_name(&self) -> &'static str {
        match self {
            ResponsePayload::Success(_) => "success",
            ResponsePayload::KeyPair(_) => "keypair",
            ResponsePayload::KeyPairs(_) => "sshkeypair",
            ResponsePayload::SystemVm(_) => "systemvm",
            ResponsePayload::Password(_) => "password",
            ResponsePayload::Capabilities(_) => "capability",
            ResponsePayload::EventTypes(_) => "eventtype",
            ResponsePayload::JobCreated(_) => "job",
            ResponsePayload::AsyncJob(_) | ResponsePayload::AsyncJobs(_) => "asyncjobs",
        }
    }

    fn shape(&self) -> serde_json::Result<WireShape> {
        Ok(match self {
            ResponsePayload::Success(dto) => WireShape::Inline(serde_json::to_value(dto)?),
            ResponsePayload::JobCreated(dto) => WireShape::Inline(serde_json::to_value(dto)?),
            ResponsePayload::AsyncJob(dto) => WireShape::Inline(serde_json::to_value(dto)?),
            ResponsePayload::KeyPair(dto) => WireShape::Object(serde_json::to_value(dto)?),
            ResponsePayload::SystemVm(dto) => WireShape::Object(serde_json::to_value(dto)?),
            ResponsePayload::Password(dto) => WireShape::Object(serde_json::to_value(dto)?),
            ResponsePayload::Capabilities(dto) => WireShape::Object(serde_json::to_value(dto)?),
            ResponsePayload::KeyPairs(items) => WireShape::List(to_values(items)?),
            ResponsePayload::EventTypes(items) => WireShape::List(to_values(items)?),
            ResponsePayload::AsyncJobs(items) => WireShape::List(to_values(items)?),
        })
    }
}

fn to_values<T: Serialize>(items: &[T]) -> serde_json::Result<Vec<Value>> {
    items.iter().map(serde_json::to_value).collect()
}

/// A tagged command result
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    response_name: String,
    object_name: String,
    payload: ResponsePayload,
}

impl ApiResponse {
    pub fn new(response_name: impl Into<String>, payload: ResponsePayload) -> Self {
        Self {
            response_name: response_name.into(),
            object_name: payload.default_object_name().to_string(),
            payload,
        }
    }

    pub fn with_object_name(mut self, object_name: impl Into<String>) -> Self {
        self.object_name = object_name.into();
        self
    }

    pub fn set_response_name(&mut self, response_name: impl Into<String>) {
        self.response_name = response_name.into();
    }

    pub fn set_object_name(&mut self, object_name: impl Into<String>) {
        self.object_name = object_name.into();
    }

    pub fn response_name(&self) -> &str {
        &self.response_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn payload(&self) -> &ResponsePayload {
        &self.payload
    }

    /// The value rendered under the response name
    pub fn body(&self) -> serde_json::Result<Value> {
        let body = match self.payload.shape()? {
            WireShape::Inline(value) => value,
            WireShape::Object(value) => {
                let mut map = Map::new();
                map.insert(self.object_name.clone(), value);
                Value::Object(map)
            }
            WireShape::List(values) => {
                let mut map = Map::new();
                map.insert("count".to_string(), Value::from(values.len()));
                if !values.is_empty() {
                    map.insert(self.object_name.clone(), Value::Array(values));
                }
                Value::Object(map)
            }
        };
        Ok(body)
    }

    /// Render as `{"<response_name>": <body>}`
    pub fn to_wire(&self) -> serde_json::Result<Value> {
        let mut map = Map::new();
        map.insert(self.response_name.clone(), self.body()?);
        Ok(Value::Object(map))
    }
}
