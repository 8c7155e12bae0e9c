//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use weikio_core::error::{Result, WeikioError};
use weikio_core::metadata::{MetadataResource, MetadataSource};
use weikio_core::{MetadataStore, ToolHandler, WeikioCli};

/// Components in the upstream wrapped-entry layout
pub const COMPONENTS_WRAPPED: &str = r#"[
  {
    "component": {
      "name": "kafka",
      "title": "Kafka",
      "description": "Sent and receive messages to/from an Apache Kafka broker. Supports SSL.",
      "scheme": "kafka",
      "groupId": "org.apache.camel",
      "artifactId": "camel-kafka",
      "version": "4.4.0",
      "supportLevel": "Stable",
      "label": "messaging",
      "componentProperties": {
        "brokers": {
          "displayName": "Brokers",
          "type": "string",
          "required": false,
          "description": "URL of the Kafka brokers to use."
        }
      }
    },
    "properties": {
      "topic": {
        "displayName": "Topic",
        "type": "string",
        "required": true,
        "description": "Name of the topic to use."
      }
    }
  },
  {
    "component": {
      "name": "timer",
      "title": "Timer",
      "description": "Generate messages in specified intervals using java.util.Timer.",
      "scheme": "timer",
      "consumerOnly": true,
      "label": "core,scheduling"
    }
  },
  {
    "component": {
      "name": "old-http",
      "title": "Old HTTP",
      "deprecated": true,
      "description": "Legacy HTTP client."
    }
  }
]"#;

pub const KAMELETS: &str = r#"apiVersion: camel.apache.org/v1
kind: Kamelet
metadata:
  name: kafka-source
  annotations:
    camel.apache.org/provider: Apache Software Foundation
    camel.apache.org/kamelet.group: Kafka
  labels:
    camel.apache.org/kamelet.type: source
spec:
  definition:
    title: Kafka Source
    description: Receive data from Kafka topics.
    required:
      - topic
    properties:
      topic:
        title: Topic Names
        description: Comma separated list of Kafka topic names
        type: string
  dependencies:
    - camel:kafka
---
apiVersion: camel.apache.org/v1
kind: Kamelet
metadata:
  name: timer-source
spec:
  definition:
    title: Timer Source
    description: Produces periodic events.
"#;

pub const SPI_BEANS: &str = r#"[{"name": "aggregation-repository", "title": "Aggregation Repository"}]"#;

/// Scripted metadata source that counts fetches per resource
pub struct FakeSource {
    components: Mutex<std::result::Result<String, String>>,
    kamelets: Mutex<std::result::Result<String, String>>,
    spi_beans: Mutex<std::result::Result<String, String>>,
    component_fetches: AtomicUsize,
    kamelet_fetches: AtomicUsize,
    spi_bean_fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new(components: &str, kamelets: &str, spi_beans: &str) -> Self {
        Self {
            components: Mutex::new(Ok(components.to_string())),
            kamelets: Mutex::new(Ok(kamelets.to_string())),
            spi_beans: Mutex::new(Ok(spi_beans.to_string())),
            component_fetches: AtomicUsize::new(0),
            kamelet_fetches: AtomicUsize::new(0),
            spi_bean_fetches: AtomicUsize::new(0),
        }
    }

    /// Source serving the standard fixtures
    pub fn standard() -> Self {
        Self::new(COMPONENTS_WRAPPED, KAMELETS, SPI_BEANS)
    }

    fn slot(&self, resource: MetadataResource) -> &Mutex<std::result::Result<String, String>> {
        match resource {
            MetadataResource::Components => &self.components,
            MetadataResource::Kamelets => &self.kamelets,
            MetadataResource::SpiBeans => &self.spi_beans,
        }
    }

    fn counter(&self, resource: MetadataResource) -> &AtomicUsize {
        match resource {
            MetadataResource::Components => &self.component_fetches,
            MetadataResource::Kamelets => &self.kamelet_fetches,
            MetadataResource::SpiBeans => &self.spi_bean_fetches,
        }
    }

    /// Replace the body served for a resource
    pub fn set_body(&self, resource: MetadataResource, body: &str) {
        *self.slot(resource).lock().unwrap() = Ok(body.to_string());
    }

    /// Make fetches of a resource fail
    pub fn set_failure(&self, resource: MetadataResource, message: &str) {
        *self.slot(resource).lock().unwrap() = Err(message.to_string());
    }

    pub fn fetches(&self, resource: MetadataResource) -> usize {
        self.counter(resource).load(Ordering::SeqCst)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches(MetadataResource::Components)
            + self.fetches(MetadataResource::Kamelets)
            + self.fetches(MetadataResource::SpiBeans)
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn fetch(&self, resource: MetadataResource) -> Result<String> {
        self.counter(resource).fetch_add(1, Ordering::SeqCst);
        self.slot(resource)
            .lock()
            .unwrap()
            .clone()
            .map_err(WeikioError::Other)
    }

    fn describe(&self, resource: MetadataResource) -> String {
        format!("fake://{}", resource.file_name())
    }
}

/// Create a store over a fake source rooted at `dir`
pub fn create_test_store(dir: &Path, source: Arc<FakeSource>) -> MetadataStore {
    MetadataStore::new(dir.join("metadata"), source)
}

/// Create a tool handler over the standard fixtures
pub fn create_test_handler(dir: &Path) -> (ToolHandler, Arc<FakeSource>) {
    let source = Arc::new(FakeSource::standard());
    let store = create_test_store(dir, source.clone());
    // `echo` stands in for the Weik.io CLI
    (ToolHandler::new(store, WeikioCli::new("echo")), source)
}
