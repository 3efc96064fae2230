//! X11 window manager backed by command-line tools.
//!
//! Every query shells out, so answers are always live. Nothing is cached.
//! Only Linux is supported; other targets report
//! [`WindowError::PlatformNotSupported`] from every fallible call.

use tracing::{debug, warn};

use dialogwatch_protocols::{KeyStroke, Rect, WindowError, WindowHandle, WindowManager};

pub mod parsers;

use parsers::{
    parse_cardinal, parse_transient_for, parse_wm_class, parse_wmctrl_windows, parse_xwininfo,
    parse_xwininfo_parent, parse_xwininfo_tree,
};

/// Window manager for a live X11 session.
#[derive(Debug, Clone, Default)]
pub struct X11Desktop;

impl X11Desktop {
    /// Create a new X11 desktop.
    pub fn new() -> Result<Self, WindowError> {
        Ok(Self)
    }

    /// Run a tool and return its stdout.
    #[cfg(target_os = "linux")]
    fn run(&self, program: &str, args: &[&str]) -> Result<String, WindowError> {
        use std::process::Command;

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| WindowError::command_failed(program, e.to_string()))?;

        if !output.status.success() {
            return Err(WindowError::command_failed(
                program,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a tool (unsupported platform).
    #[cfg(not(target_os = "linux"))]
    fn run(&self, _program: &str, _args: &[&str]) -> Result<String, WindowError> {
        Err(WindowError::PlatformNotSupported(std::env::consts::OS.to_string()))
    }

    fn id_arg(handle: WindowHandle) -> String {
        format!("0x{:x}", handle.raw())
    }

    fn xprop(&self, handle: WindowHandle, property: &str) -> Option<String> {
        self.run("xprop", &["-id", &Self::id_arg(handle), property]).ok()
    }

    fn xwininfo(&self, handle: WindowHandle) -> Option<parsers::XwininfoSummary> {
        self.run("xwininfo", &["-id", &Self::id_arg(handle)])
            .ok()
            .map(|out| parse_xwininfo(&out))
    }
}

impl WindowManager for X11Desktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, WindowError> {
        let stdout = self
            .run("wmctrl", &["-l", "-p"])
            .map_err(|e| WindowError::ListFailed(e.to_string()))?;
        let windows = parse_wmctrl_windows(&stdout);
        debug!(count = windows.len(), "Listed top-level windows");
        Ok(windows.into_iter().map(|w| w.handle).collect())
    }

    fn child_windows(&self, parent: WindowHandle) -> Result<Vec<WindowHandle>, WindowError> {
        let stdout = self.run("xwininfo", &["-tree", "-id", &Self::id_arg(parent)])?;
        Ok(parse_xwininfo_tree(&stdout))
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        !handle.is_none() && self.run("xwininfo", &["-id", &Self::id_arg(handle)]).is_ok()
    }

    fn class_name(&self, handle: WindowHandle) -> String {
        self.xprop(handle, "WM_CLASS")
            .and_then(|out| parse_wm_class(&out))
            .unwrap_or_default()
    }

    fn text(&self, handle: WindowHandle) -> String {
        self.run("xdotool", &["getwindowname", &handle.raw().to_string()])
            .map(|out| out.trim_end_matches('\n').to_string())
            .unwrap_or_default()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.xwininfo(handle).map(|info| info.viewable).unwrap_or(false)
    }

    fn is_enabled(&self, handle: WindowHandle) -> bool {
        self.is_window(handle)
    }

    fn parent(&self, handle: WindowHandle) -> WindowHandle {
        self.run("xwininfo", &["-children", "-id", &Self::id_arg(handle)])
            .map(|out| parse_xwininfo_parent(&out))
            .unwrap_or(WindowHandle::NONE)
    }

    fn owner(&self, handle: WindowHandle) -> WindowHandle {
        self.xprop(handle, "WM_TRANSIENT_FOR")
            .map(|out| parse_transient_for(&out))
            .unwrap_or(WindowHandle::NONE)
    }

    fn process_id(&self, handle: WindowHandle) -> u32 {
        self.xprop(handle, "_NET_WM_PID")
            .and_then(|out| parse_cardinal(&out))
            .unwrap_or(0)
    }

    fn control_id(&self, _handle: WindowHandle) -> i32 {
        0
    }

    fn bounds(&self, handle: WindowHandle) -> Option<Rect> {
        self.xwininfo(handle).and_then(|info| info.bounds)
    }

    fn focus(&self, handle: WindowHandle) -> bool {
        match self.run("wmctrl", &["-i", "-a", &Self::id_arg(handle)]) {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to focus window {}: {}", handle, e);
                false
            }
        }
    }

    fn click(&self, handle: WindowHandle) -> Result<(), WindowError> {
        let id = handle.raw().to_string();
        self.run(
            "xdotool",
            &["mousemove", "--window", &id, "1", "1", "click", "1"],
        )
        .map(|_| ())
        .map_err(|e| WindowError::ActionFailed(e.to_string()))
    }

    fn post_char(&self, handle: WindowHandle, c: char) -> Result<(), WindowError> {
        let id = handle.raw().to_string();
        let text = c.to_string();
        self.run("xdotool", &["type", "--window", &id, "--", &text])
            .map(|_| ())
    }

    fn send_input(&self, strokes: &[KeyStroke]) -> Result<(), WindowError> {
        let text: String = strokes
            .iter()
            .map(|s| {
                if s.shift {
                    s.key
                } else {
                    s.key.to_ascii_lowercase()
                }
            })
            .collect();
        self.run("xdotool", &["type", "--", &text]).map(|_| ())
    }

    fn close(&self, handle: WindowHandle) -> Result<(), WindowError> {
        self.run("wmctrl", &["-i", "-c", &Self::id_arg(handle)])
            .map(|_| ())
    }
}

#[cfg(test)]
#[path = "x11_tests.rs"]
mod tests;
