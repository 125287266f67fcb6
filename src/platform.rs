//! Platform detection.
//!
//! The dependency and permission checks differ per OS family; everything
//! that branches on the platform goes through [`OsFamily`] so tests can
//! exercise both branches regardless of the host.

use std::path::PathBuf;

/// The OS families pydoctor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    MacOs,
    Linux,
    Other,
}

impl OsFamily {
    /// Detect the family of the running host.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else if cfg!(target_os = "linux") {
            OsFamily::Linux
        } else {
            OsFamily::Other
        }
    }

    /// Build tools expected on this family.
    ///
    /// The base set applies everywhere; macOS additionally expects Homebrew
    /// and Linux expects apt-get.
    pub fn expected_build_tools(&self) -> Vec<&'static str> {
        let mut tools = vec!["make", "gcc", "git"];
        match self {
            OsFamily::MacOs => tools.push("brew"),
            OsFamily::Linux => tools.push("apt-get"),
            OsFamily::Other => {}
        }
        tools
    }

    /// Directories whose writability matters for Python tooling.
    ///
    /// Only directories that exist are probed; the list errs on the side of
    /// the common layouts for each family.
    pub fn writable_dirs(&self, home: &std::path::Path) -> Vec<PathBuf> {
        match self {
            OsFamily::MacOs => vec![
                PathBuf::from("/usr/local/lib/python3.12/site-packages"),
                home.join(".pyenv"),
            ],
            OsFamily::Linux => vec![
                PathBuf::from("/usr/lib/python3/dist-packages"),
                home.join(".pyenv"),
            ],
            OsFamily::Other => Vec::new(),
        }
    }
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}
