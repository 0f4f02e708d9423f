mod chromium;

pub use chromium::{
    ChromiumLauncher, ChromiumPage, ChromiumSession, DEFAULT_NAVIGATION_TIMEOUT, LaunchOptions,
};
