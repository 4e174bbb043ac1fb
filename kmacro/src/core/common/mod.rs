// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod bounded_ring;
pub mod friendly_random_id;
pub mod miette_setup_global_report_handler;
pub mod temp_dir;

// Re-export.
pub use bounded_ring::*;
pub use friendly_random_id::*;
pub use miette_setup_global_report_handler::*;
pub use temp_dir::*;
