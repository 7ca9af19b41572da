use std::fmt;
use std::str::FromStr;

/// Desktop platforms the kiosk knows how to launch Chrome on
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for. Other unixes use the Linux conventions.
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        return Platform::MacOs;

        #[cfg(target_os = "windows")]
        return Platform::Windows;

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        return Platform::Linux;
    }

    pub fn all() -> [Platform; 3] {
        [Platform::MacOs, Platform::Windows, Platform::Linux]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos" | "mac" | "darwin" => Ok(Platform::MacOs),
            "windows" | "win32" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            other => Err(format!(
                "unknown platform '{}' (expected macos, windows or linux)",
                other
            )),
        }
    }
}
