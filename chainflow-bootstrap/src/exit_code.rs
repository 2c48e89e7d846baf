// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Management
//!
//! Standardized Unix exit codes following BSD `sysexits.h` conventions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chainflow_bootstrap::exit_code::ExitCode;
//!
//! fn run_application() -> Result<(), Box<dyn std::error::Error>> {
//!     Ok(())
//! }
//!
//! fn main() {
//!     let result = run_application();
//!     let exit_code = match result {
//!         Ok(_) => ExitCode::Success,
//!         Err(e) => ExitCode::from_error(e.as_ref()),
//!     };
//!     std::process::exit(exit_code.as_i32());
//! }
//! ```

use std::fmt;

/// Exit codes following Unix conventions (BSD sysexits.h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful termination (0)
    #[default]
    Success = 0,

    /// General error (1)
    Error = 1,

    /// Command line usage error (64)
    UsageError = 64,

    /// Data format error (65)
    DataError = 65,

    /// Cannot open input (66)
    NoInput = 66,

    /// User does not exist (67)
    NoUser = 67,

    /// Host name unknown (68)
    NoHost = 68,

    /// Service unavailable (69)
    Unavailable = 69,

    /// Internal software error (70)
    Software = 70,

    /// System error (71)
    OsError = 71,

    /// Critical OS file missing (72)
    OsFile = 72,

    /// Cannot create output file (73)
    CantCreate = 73,

    /// I/O error (74)
    IoError = 74,

    /// Temporary failure, retry (75)
    TempFail = 75,

    /// Remote error in protocol (76)
    Protocol = 76,

    /// Permission denied (77)
    NoPerm = 77,

    /// Configuration error (78)
    Config = 78,

    /// Interrupted by signal (SIGINT - Ctrl+C) (130)
    Interrupted = 130,

    /// Terminated by signal (SIGTERM) (143)
    Terminated = 143,
}

impl ExitCode {
    /// Convert to i32 for use with `std::process::exit`.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map an error to an exit code by pattern-matching its `Display` text.
    ///
    /// `ChainFlowError::category()` is the more precise source of truth for
    /// errors originating in `chainflow-domain`/`chainflow-engine`; this
    /// exists for the broader `Box<dyn Error>` surface `main` actually
    /// receives.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let error_string = error.to_string().to_lowercase();

        if error_string.contains("permission") || error_string.contains("access denied") {
            ExitCode::NoPerm
        } else if error_string.contains("not found") || error_string.contains("no such") {
            ExitCode::NoInput
        } else if error_string.contains("invalid") || error_string.contains("argument") {
            ExitCode::UsageError
        } else if error_string.contains("parse") || error_string.contains("format") {
            ExitCode::DataError
        } else if error_string.contains("io") || error_string.contains("read") || error_string.contains("write") {
            ExitCode::IoError
        } else if error_string.contains("config") {
            ExitCode::Config
        } else if error_string.contains("unavailable") || error_string.contains("not available") {
            ExitCode::Unavailable
        } else {
            ExitCode::Error
        }
    }

    /// Human-readable description of the exit code.
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::Error => "General error",
            ExitCode::UsageError => "Command line usage error",
            ExitCode::DataError => "Data format error",
            ExitCode::NoInput => "Cannot open input",
            ExitCode::NoUser => "User does not exist",
            ExitCode::NoHost => "Host name unknown",
            ExitCode::Unavailable => "Service unavailable",
            ExitCode::Software => "Internal software error",
            ExitCode::OsError => "System error",
            ExitCode::OsFile => "Critical OS file missing",
            ExitCode::CantCreate => "Cannot create output file",
            ExitCode::IoError => "I/O error",
            ExitCode::TempFail => "Temporary failure, retry",
            ExitCode::Protocol => "Remote error in protocol",
            ExitCode::NoPerm => "Permission denied",
            ExitCode::Config => "Configuration error",
            ExitCode::Interrupted => "Interrupted by signal (SIGINT)",
            ExitCode::Terminated => "Terminated by signal (SIGTERM)",
        }
    }

    /// Whether this is the success exit code.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Whether this is an error exit code.
    pub fn is_error(self) -> bool {
        !self.is_success()
    }

    /// Whether this represents a signal interruption.
    pub fn is_signal(self) -> bool {
        matches!(self, ExitCode::Interrupted | ExitCode::Terminated)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

/// Map a `Result` to an exit code: `Ok` becomes `ExitCode::Success`,
/// `Err` is printed to stderr and mapped via [`ExitCode::from_error`].
pub fn result_to_exit_code<T, E: std::error::Error>(result: Result<T, E>) -> std::process::ExitCode {
    match result {
        Ok(_) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::from(ExitCode::from_error(&e).as_i32() as u8)
        }
    }
}

/// Map a `ChainFlowError` to an exit code using its
/// [`chainflow_domain::ChainFlowError::category`], a more precise source of
/// truth than [`ExitCode::from_error`]'s string matching.
pub fn map_error_to_exit_code(error: &chainflow_domain::ChainFlowError) -> ExitCode {
    match error.category() {
        "configuration" => ExitCode::Config,
        "queue" => ExitCode::Unavailable,
        "lifecycle" | "runtime" | "internal" => ExitCode::Software,
        _ => ExitCode::Error,
    }
}
