//! Headless landing page session.
//!
//! Mounts the landing page, lets the hero intro play, scrolls to the bottom
//! one step at a time, pokes the contact modal and navigation, and prints
//! every motion event on the way.
//!
//! Flags: `--json` prints events as JSON lines, `--config=PATH` reads a
//! config file other than `reveal.toml`. `RUST_LOG` controls logging.

use anyhow::{Context, Result};
use reveal_config::RevealConfig;
use reveal_motion::MotionEvent;
use reveal_page::{Key, LandingPage, PageAction, SectionId};
use tracing::info;

struct Printer {
    json: bool,
}

impl Printer {
    fn flush(&self, page: &mut LandingPage) -> Result<()> {
        let scroll_y = page.viewport().scroll_y;
        for event in page.drain_events() {
            self.print(scroll_y, &event)?;
        }
        Ok(())
    }

    fn print(&self, scroll_y: f64, event: &MotionEvent) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{scroll_y:>8.0}px  {event:?}");
        }
        Ok(())
    }
}

/// Run frames until nothing animates, printing as we go.
fn settle(page: &mut LandingPage, printer: &Printer, frame_ms: f32) -> Result<()> {
    // Upper bound in case a host-supplied timeline never ends.
    for _ in 0..10_000 {
        let running = page.frame(frame_ms);
        printer.flush(page)?;
        if !running {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config_arg = std::env::args().find_map(|a| a.strip_prefix("--config=").map(String::from));
    let mut config = match config_arg {
        Some(path) => RevealConfig::load_from_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => RevealConfig::load_or_default(),
    };
    config.merge_with_env();

    let printer = Printer {
        json: config.demo.json_events || std::env::args().any(|a| a == "--json"),
    };
    let frame_ms = config.demo.frame_ms;
    let step = config.demo.scroll_step_px.max(1.0);

    let mut page = LandingPage::new(&config)?;
    info!(
        width = config.viewport.width,
        height = config.viewport.height,
        document_height = page.layout().document_height(),
        "session started"
    );
    printer.flush(&mut page)?;
    settle(&mut page, &printer, frame_ms)?;

    // Scroll to the bottom, a wheel step per frame.
    while page.scroll_by(step) {
        printer.flush(&mut page)?;
        page.frame(frame_ms);
        printer.flush(&mut page)?;
    }
    settle(&mut page, &printer, frame_ms)?;

    // Modal open: scroll is ignored until Escape.
    page.dispatch(PageAction::OpenContact);
    let moved = page.scroll_by(-step);
    info!(moved, "scroll while contact modal is open");
    page.dispatch(PageAction::KeyPressed(Key::Escape));

    // Back up via navigation; reveals above the line reverse on the way.
    for section in [SectionId::Work, SectionId::Services, SectionId::Hero] {
        page.dispatch(PageAction::NavigateTo(section));
        printer.flush(&mut page)?;
        settle(&mut page, &printer, frame_ms)?;
    }

    info!(
        scroll_y = page.viewport().scroll_y,
        nav_scrolled = page.state().nav_scrolled(),
        styled_elements = page.styles().len(),
        "session finished"
    );
    Ok(())
}
