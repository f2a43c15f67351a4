// src/exit.rs
//! Standardized process exit codes for `peppermill`.
//!
//! Provides a stable contract for build scripts and CI agents.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PeppermillExit {
    /// Report generated, or help/version printed.
    Success = 0,
    /// Runtime or configuration failure (unreadable input, bad generator,
    /// unwritable output).
    Error = 1,
}

impl PeppermillExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}
