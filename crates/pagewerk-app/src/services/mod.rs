// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the command line to the pagewerk backend crates.
//
// Each service wraps one or more backend crate APIs in a way that is convenient
// for a subcommand to call: paths in, files out.

pub mod commands;
pub mod config;
pub mod output;
