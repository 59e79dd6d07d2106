// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod categorizer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod planning;
pub mod receipt;
pub mod utils;
