use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use blogfeed_client::constants::CARD_SHORTEN;
use blogfeed_client::{shorten_address, PostRecord};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

/// User-facing alert, shown in both output modes.
pub fn alert(msg: &str) {
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let _ = err.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = write!(err, "alert:");
    let _ = err.reset();
    let _ = writeln!(err, " {msg}");
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

/// `BlogDapp` title plus the connect button.
pub fn render_header(label: &str, connected: bool) -> io::Result<()> {
    let mut out = stdout();
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "BlogDapp")?;
    out.reset()?;
    write!(out, "  ")?;
    let button = if connected { Color::White } else { Color::Blue };
    out.set_color(ColorSpec::new().set_fg(Some(button)))?;
    writeln!(out, "[{label}]")?;
    out.reset()?;
    writeln!(out)
}

pub fn render_feed(posts: &[PostRecord]) -> io::Result<()> {
    let mut out = stdout();
    if posts.is_empty() {
        return writeln!(out, "(no posts yet)");
    }
    for post in posts {
        render_card(&mut out, post)?;
    }
    Ok(())
}

fn render_card(out: &mut StandardStream, post: &PostRecord) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{}", post.title)?;
    out.reset()?;
    writeln!(out, "{}", post.desc)?;
    writeln!(out, "image: {}", post.img)?;
    writeln!(out, "By: {}", card_author(&post.address))?;
    writeln!(out)
}

fn card_author(address: &str) -> String {
    shorten_address(address, CARD_SHORTEN.0, CARD_SHORTEN.1)
}
