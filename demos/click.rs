//! xembed_tray :: click
//!
//! Inspect an X window as if it were an embedded tray icon and fake a click on it.
//!
//!   cargo run --example click -- 0x1c00003 [button]
//!
//! The pid, title and class of the window are printed before the click is sent. Set
//! RUST_LOG=trace to see each of the synthetic events being delivered.
use std::{env, process::exit};
use tracing_subscriber::{self, prelude::*, EnvFilter};
use xembed_tray::{
    pure::geometry::Point, x11rb::RustConn, EmbeddedWindow, InputEvent, Result, TrayIcon, Xid,
};

fn parse_id(s: &str) -> Option<u32> {
    match s.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (id, button) = match args.as_slice() {
        [id] => (parse_id(id), Some(1)),
        [id, button] => (parse_id(id), button.parse().ok()),
        _ => (None, None),
    };

    let (id, button) = match (id, button) {
        (Some(id), Some(button)) => (Xid::from(id), button),
        _ => {
            eprintln!("usage: click <window-id> [button]");
            exit(1);
        }
    };

    let conn = RustConn::new()?;
    let icon = TrayIcon::new(EmbeddedWindow::new(id), &conn)?;
    println!(
        "pid={} title={:?} wm-class={:?}",
        icon.pid(),
        icon.title(),
        icon.wm_class()
    );

    // the time of the click is not checked by most clients so CurrentTime is fine here.
    // The connection is flushed by the click itself.
    icon.click(&InputEvent::button_release(button, 0, Point::default()), &conn);

    Ok(())
}
