use serde::{Deserialize, Serialize};

use crate::errors::EventcraftError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_dir: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
    pub save_request: bool,
    pub save_response: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: ".eventcraft".into(),
            model: "gpt-4.1".into(),
            temperature: 0.7,
            max_output_tokens: 3000,
            timeout_secs: 120,
            save_request: true,
            save_response: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, EventcraftError> {
        let text = fs_err::read_to_string(path)
            .map_err(|e| EventcraftError::Configuration(e.to_string()))?;
        toml::from_str(&text)
            .map_err(|e| EventcraftError::Configuration(format!("invalid config file {path}: {e}")))
    }

    /// Flags passed on the command line win over the config file; flags left
    /// unset keep whatever `load` (or `Default`) produced.
    pub fn overlay(&mut self, args: &crate::cli::Args) {
        if let Some(dir) = &args.store_dir {
            self.store_dir = dir.clone();
        }
        if let Some(model) = &args.model {
            self.model = model.clone();
        }
        if let Some(timeout) = args.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(v) = args.save_request {
            self.save_request = v;
        }
        if let Some(v) = args.save_response {
            self.save_response = v;
        }
    }
}
