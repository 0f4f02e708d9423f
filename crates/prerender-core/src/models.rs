use std::fmt;
use std::str::FromStr;

/// Condition a navigation waits for before it is considered complete.
///
/// Each variant corresponds to a Chrome page lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaitUntil {
    /// The window `load` event fired.
    Load,
    /// The DOM finished parsing.
    DomContentLoaded,
    /// No network connections for at least 500 ms.
    NetworkIdle,
    /// At most two network connections for at least 500 ms.
    #[default]
    NetworkAlmostIdle,
}

impl WaitUntil {
    /// Name of the `Page.lifecycleEvent` that signals this condition.
    pub fn lifecycle_event(self) -> &'static str {
        match self {
            WaitUntil::Load => "load",
            WaitUntil::DomContentLoaded => "DOMContentLoaded",
            WaitUntil::NetworkIdle => "networkIdle",
            WaitUntil::NetworkAlmostIdle => "networkAlmostIdle",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            WaitUntil::Load => "load",
            WaitUntil::DomContentLoaded => "domcontentloaded",
            WaitUntil::NetworkIdle => "networkidle0",
            WaitUntil::NetworkAlmostIdle => "networkidle2",
        }
    }
}

impl fmt::Display for WaitUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitUntil {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "load" => Ok(WaitUntil::Load),
            "domcontentloaded" => Ok(WaitUntil::DomContentLoaded),
            "networkidle0" => Ok(WaitUntil::NetworkIdle),
            "networkidle2" => Ok(WaitUntil::NetworkAlmostIdle),
            other => Err(format!(
                "unknown wait condition '{other}' (expected load, domcontentloaded, networkidle0 or networkidle2)"
            )),
        }
    }
}
