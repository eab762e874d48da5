use cucumber::World as CucumberWorld;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use studio_core::config::StudioConfig;
use studio_core::http::StudioServer;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Last HTTP exchange seen by a scenario.
#[derive(Debug, Default, Clone)]
pub struct LastResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Default, CucumberWorld)]
pub struct StudioWorld {
    pub base_url: Option<String>,
    pub models_dir: Option<tempfile::TempDir>,
    pub server_handle: Option<JoinHandle<()>>,
    pub client: reqwest::Client,
    pub last: LastResponse,
    /// `_id` of the last document written, per collection.
    pub last_ids: HashMap<String, String>,
    /// Statuses of a batch of concurrent requests.
    pub batch_statuses: Vec<u16>,
}

impl StudioWorld {
    /// Start a real server on `127.0.0.1:0` with its own models directory.
    pub async fn start_server(&mut self) -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| format!("temp dir: {}", e))?;

        let mut config = StudioConfig::default();
        config.storage.models_path = dir.path().join("models").display().to_string();

        let listener =
            TcpListener::bind("127.0.0.1:0").await.map_err(|e| format!("bind: {}", e))?;
        let addr = listener.local_addr().map_err(|e| format!("local addr: {}", e))?;

        let server = StudioServer::new(config);
        self.server_handle = Some(tokio::spawn(async move {
            if let Err(e) = server.serve_on(listener).await {
                eprintln!("studio server stopped: {:#}", e);
            }
        }));
        self.base_url = Some(format!("http://{}", addr));
        self.models_dir = Some(dir);
        Ok(())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_deref().unwrap_or("http://127.0.0.1:3001"), path)
    }

    /// Where the server writes the artifact for `name`.
    pub fn artifact_path(&self, name: &str) -> Option<PathBuf> {
        let dir = self.models_dir.as_ref()?;
        Some(dir.path().join("models").join(format!("{}.model.ts", name)))
    }

    pub async fn request(
        &mut self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), String> {
        let url = self.url(path);
        let request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            other => return Err(format!("unsupported method: {}", other)),
        };
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };

        let response = request.send().await.map_err(|e| format!("{} {}: {}", method, path, e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| format!("read body: {}", e))?;
        self.last = LastResponse {
            status,
            body: serde_json::from_str(&text).unwrap_or(Value::String(text)),
        };
        Ok(())
    }
}

impl Drop for StudioWorld {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            handle.abort();
        }
    }
}
