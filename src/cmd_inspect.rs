//! Read-only commands: `windows`, `kinds` and `check-config`.

use std::path::Path;

use serde::Serialize;

use dialogwatch_config::{ConfigLoader, ConfigValidator};
use dialogwatch_core::DialogFactory;
use dialogwatch_protocols::{DialogKind, Rect, WindowHandle, WindowManager};

use crate::cli::OutputFormat;
use crate::desktop;

#[derive(Debug, Serialize)]
struct WindowInfo {
    handle: WindowHandle,
    class_name: String,
    title: String,
    process_id: u32,
    visible: bool,
    owner: WindowHandle,
    bounds: Option<Rect>,
}

impl WindowInfo {
    fn collect(wm: &dyn WindowManager, handle: WindowHandle) -> Self {
        Self {
            handle,
            class_name: wm.class_name(handle),
            title: wm.text(handle),
            process_id: wm.process_id(handle),
            visible: wm.is_visible(handle),
            owner: wm.owner(handle),
            bounds: wm.bounds(handle),
        }
    }
}

pub(crate) fn windows(format: OutputFormat, all: bool) -> anyhow::Result<()> {
    let wm = desktop::window_manager()?;
    let windows: Vec<WindowInfo> = wm
        .top_level_windows()?
        .into_iter()
        .map(|handle| WindowInfo::collect(wm.as_ref(), handle))
        .filter(|info| all || info.visible)
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&windows)?),
        OutputFormat::Table => {
            println!("{:<12} {:<8} {:<28} TITLE", "HANDLE", "PID", "CLASS");
            for info in &windows {
                println!(
                    "{:<12} {:<8} {:<28} {}",
                    info.handle.to_string(),
                    info.process_id,
                    info.class_name,
                    info.title
                );
            }
            println!("\n{} window(s)", windows.len());
        }
    }
    Ok(())
}

pub(crate) fn kinds() -> anyhow::Result<()> {
    let factory = DialogFactory::builtin()?;
    println!("{:<34} WRAPPER", "KIND");
    for kind in DialogKind::ALL {
        let wrapped = if factory.is_registered(kind) { "yes" } else { "no" };
        println!("{:<34} {}", kind.as_str(), wrapped);
    }
    Ok(())
}

pub(crate) fn check_config(path: Option<&Path>) -> anyhow::Result<()> {
    let config = ConfigLoader::load_or_default(path)?;
    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    let warnings = result.into_result()?;
    println!(
        "Configuration OK (browser: {}, {} warning(s))",
        config.watcher.browser.display_name(),
        warnings.len()
    );
    Ok(())
}
