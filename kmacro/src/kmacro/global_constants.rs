// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const DEBUG_KMACRO_MOD: bool = true;
pub const DEBUG_KMACRO_STEP_EDIT: bool = true;

pub const DEFAULT_RING_MAX: usize = 8;
pub const DEFAULT_COUNTER_FORMAT: &str = "%d";
pub const DEFAULT_COUNTER_START: i64 = 0;
pub const DEFAULT_MAX_UNBOUNDED_REPEAT: usize = 10_000;
pub const DEFAULT_INSERT_TERMINATOR: &str = "C-j";

pub const MAX_COUNTER_FORMAT_WIDTH: usize = 1024;
pub const MAX_INSERT_REPEAT: usize = 100_000;

pub const SELF_INSERT_COMMAND: &str = "self-insert-command";

pub const CONFIG_FOLDER_NAME: &str = "r3bl-kmacro";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";
