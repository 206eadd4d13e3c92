// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime configuration: environment (after `.env`), then global CLI flags.

use anyhow::Result;
use std::path::PathBuf;

use crate::advice::{DEFAULT_ENDPOINT, DEFAULT_MODEL, OpenAiAdvisor};
use crate::db;

pub const DEFAULT_USER: &str = "default";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub user_id: String,
    pub openai_api_key: Option<String>,
    pub ai_model: String,
    pub ai_endpoint: String,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let db_path = match env_nonempty("ZENFIN_DB") {
            Some(p) => PathBuf::from(p),
            None => db::default_db_path()?,
        };
        Ok(Self {
            db_path,
            user_id: env_nonempty("ZENFIN_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            ai_model: env_nonempty("ZENFIN_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ai_endpoint: env_nonempty("ZENFIN_AI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }

    /// Apply the global `--user` / `--db` flags.
    pub fn with_overrides(mut self, m: &clap::ArgMatches) -> Self {
        if let Some(u) = m.get_one::<String>("user").filter(|u| !u.trim().is_empty()) {
            self.user_id = u.trim().to_string();
        }
        if let Some(p) = m.get_one::<String>("db") {
            self.db_path = PathBuf::from(p);
        }
        self
    }

    pub fn advisor(&self) -> OpenAiAdvisor {
        OpenAiAdvisor::new(
            self.openai_api_key.clone(),
            self.ai_model.clone(),
            self.ai_endpoint.clone(),
        )
    }
}
