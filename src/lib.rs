// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advice;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod partition;
pub mod snapshot;
pub mod store;
pub mod utils;
pub mod commands;

pub use error::{Error, Result};
