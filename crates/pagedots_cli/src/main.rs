//! pagedots CLI
//!
//! Replay swipes against the rect page indicator and inspect the highlight
//! offsets and draw commands it produces.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagedots_core::{DrawCommand, RecordingContext, Size};
use pagedots_widgets::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{PagedotsConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "pagedots")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rect page indicator playground", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (indicator attributes and pager settings)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Swipe to a page and print the highlight offset after every event
    Simulate {
        /// Number of pages (overrides the config)
        #[arg(short, long)]
        pages: Option<usize>,

        /// Page to swipe to, counted from the starting page
        #[arg(short, long, default_value = "1")]
        to: usize,

        /// Scroll events emitted per page crossed
        #[arg(short, long, default_value = "4")]
        frames: usize,

        /// Only move the highlight on page selection
        #[arg(long)]
        discrete: bool,

        /// Use a looping (banner) pager
        #[arg(long)]
        looping: bool,
    },

    /// Print the draw commands for a single scroll position
    Frame {
        /// Number of pages (overrides the config)
        #[arg(short, long)]
        pages: Option<usize>,

        /// Page position
        #[arg(long)]
        position: usize,

        /// Drag progress toward the next page
        #[arg(long, default_value = "0.0")]
        progress: f32,
    },

    /// Write a default config file
    Init {
        /// Output path
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = PagedotsConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            pages,
            to,
            frames,
            discrete,
            looping,
        } => cmd_simulate(&config, pages, to, frames, discrete, looping),

        Commands::Frame {
            pages,
            position,
            progress,
        } => cmd_frame(&config, pages, position, progress),

        Commands::Init { path } => cmd_init(&path),
    }
}

/// Prints the indicator offset after every scroll or selection event
struct OffsetPrinter {
    indicator: Rc<RefCell<RectIndicator>>,
}

impl OffsetPrinter {
    fn print(&self, event: &str) {
        let indicator = self.indicator.borrow();
        match indicator.highlight_bounds() {
            Some(rect) => println!(
                "{event:<24} offset={:>8.2} highlight.x={:.2}",
                indicator.offset(),
                rect.x()
            ),
            None => println!("{event:<24} offset={:>8.2}", indicator.offset()),
        }
    }
}

impl OnPageChange for OffsetPrinter {
    fn on_page_scrolled(&mut self, position: usize, offset: f32, offset_pixels: i32) {
        self.print(&format!("scrolled {position} {offset:.2} ({offset_pixels}px)"));
    }

    fn on_page_selected(&mut self, position: usize) {
        self.print(&format!("selected {position}"));
    }

    fn on_page_scroll_state_changed(&mut self, state: ScrollState) {
        println!("{:<24}", format!("state {state:?}"));
    }
}

fn build_indicator(config: &PagedotsConfig) -> Result<RectIndicator> {
    let indicator = RectIndicator::from_attrs(&config.indicator)
        .context("Invalid indicator attributes")?;
    Ok(indicator)
}

/// Lay the indicator out one page wide and exactly as tall as its dots
fn layout_for_page(indicator: &mut RectIndicator, page_width: f32) {
    let measured = indicator.measure();
    indicator.layout(Size::new(page_width, measured.height));
}

/// Position `to` pages past `current`, if the pager has it
fn swipe_target(current: usize, to: usize, virtual_count: usize) -> Option<usize> {
    current
        .checked_add(to)
        .filter(|&target| target < virtual_count)
}

fn cmd_simulate(
    config: &PagedotsConfig,
    pages: Option<usize>,
    to: usize,
    frames: usize,
    discrete: bool,
    looping: bool,
) -> Result<()> {
    let pages = pages.unwrap_or(config.pager.pages);
    if pages == 0 {
        anyhow::bail!("Need at least one page to simulate");
    }

    let page_width = config.pager.page_width;
    let mut pager = if looping || config.pager.looping {
        ScriptedPager::looping(pages, page_width)
    } else {
        ScriptedPager::new(pages, page_width)
    };

    let mut indicator = build_indicator(config)?;
    if discrete {
        indicator.apply_style(&StyleUpdate::new().movable(false));
    }
    indicator.configure(pages, Some(&mut pager));
    layout_for_page(&mut indicator, page_width);

    info!(
        pages,
        step = indicator.step(),
        movable = indicator.style().movable,
        "Simulating swipe"
    );

    let indicator = Rc::new(RefCell::new(indicator));
    pager.add_page_change_listener(Box::new(OffsetPrinter {
        indicator: indicator.clone(),
    }));

    let Some(target) = swipe_target(pager.current_item(), to, pager.virtual_count()) else {
        warn!(to, pages, "Target page is past the last page; nothing to replay");
        return Ok(());
    };
    pager.swipe_to(target, frames);

    let indicator = indicator.borrow();
    println!(
        "final page={} offset={:.2}",
        pager.current_item() % pages,
        indicator.offset()
    );
    Ok(())
}

fn cmd_frame(
    config: &PagedotsConfig,
    pages: Option<usize>,
    position: usize,
    progress: f32,
) -> Result<()> {
    let pages = pages.unwrap_or(config.pager.pages);
    let mut indicator = build_indicator(config)?;
    indicator.configure(pages, None);
    layout_for_page(&mut indicator, config.pager.page_width);

    if indicator.style().movable {
        indicator.on_page_scrolled(position, progress);
    } else {
        indicator.on_page_selected(position);
    }

    let bounds = indicator.bounds();
    let mut ctx = RecordingContext::new(bounds.size);
    indicator.draw(&mut ctx);

    for command in ctx.commands() {
        match command {
            DrawCommand::PushTransform(transform) => {
                let (tx, ty) = transform.translation();
                println!("push translate({tx:.2}, {ty:.2})");
            }
            DrawCommand::PopTransform => println!("pop"),
            DrawCommand::FillRect {
                rect,
                corner_radius,
                color,
            } => println!(
                "fill rect({:.2}, {:.2}, {:.2}, {:.2}) radius={:.2} color={}",
                rect.x(),
                rect.y(),
                rect.width(),
                rect.height(),
                corner_radius.top_left,
                color
            ),
        }
    }
    Ok(())
}

fn cmd_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let content = PagedotsConfig::default().to_toml()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
