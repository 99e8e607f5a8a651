use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use easel::config::ClosePolicy;
use easel::{Canvas, Config, EaselError, ShapeStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(version, about = "Retained-mode 2D drawing demos rendered offscreen")]
struct Cli {
    /// Demo scene to run
    #[arg(long, short = 's', value_enum, default_value_t = Demo::Shapes)]
    scene: Demo,

    /// Number of frames to render before the surface closes
    #[arg(long, short = 'f', value_name = "N", default_value_t = 60)]
    frames: u64,

    /// Write the final frame to this PNG file
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Read settings from this config file instead of the default location
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Demo {
    /// A ball bouncing between the walls
    Bounce,
    /// One of each primitive shape
    Shapes,
    /// Styled text
    Text,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config, using defaults: {:#}", err);
            Config::default()
        }),
    };
    config.canvas.backend = "headless".to_string();
    config.lifecycle.on_close = ClosePolicy::Error;
    config.output.max_frames = Some(cli.frames.max(1));
    if cli.output.is_some() {
        config.output.frame_path = cli.output.clone();
    }

    let mut canvas = Canvas::with_config(config).context("Failed to create canvas")?;
    log::info!("Running '{:?}' demo for {} frames", cli.scene, cli.frames);

    let outcome = match cli.scene {
        Demo::Bounce => bounce(&mut canvas),
        Demo::Shapes => shapes(&mut canvas),
        Demo::Text => text(&mut canvas),
    };
    match outcome {
        Ok(()) | Err(EaselError::Finished) => {}
        Err(err) => return Err(err).context("Demo failed"),
    }
    canvas.shutdown();

    if let Some(path) = &cli.output {
        println!("Wrote final frame to {}", path.display());
    }
    Ok(())
}

/// Keeps the scene on screen until the surface closes.
fn hold(canvas: &mut Canvas, anchor: easel::ElementId) -> Result<(), EaselError> {
    loop {
        canvas.sleep(5);
        canvas.show(anchor)?;
    }
}

fn bounce(canvas: &mut Canvas) -> Result<(), EaselError> {
    canvas.draw_rectangle(0, 0, 1000, 1000, ShapeStyle::new().fill("midnightblue"))?;
    let ball = canvas.draw_circle(100, 500, 40, ShapeStyle::new().fill("tomato"))?;
    let (mut x, mut dx) = (100, 7);
    loop {
        x += dx;
        if !(40..=960).contains(&x) {
            dx = -dx;
        }
        canvas.update_position_x(ball, x)?;
    }
}

fn shapes(canvas: &mut Canvas) -> Result<(), EaselError> {
    let sky = canvas.draw_rectangle(0, 0, 1000, 600, ShapeStyle::new().fill("skyblue"))?;
    canvas.draw_rectangle(0, 600, 1000, 400, ShapeStyle::new().fill("#3a7d44"))?;
    canvas.draw_circle(
        820,
        160,
        80,
        ShapeStyle::new().fill("gold").stroke("orange").stroke_width(6),
    )?;
    canvas.draw_polygon(
        "200,600 400,300 600,600",
        ShapeStyle::new().fill("rgb(120, 120, 140)").stroke("white").stroke_width(3),
    )?;
    canvas.draw_line(0, 600, 1000, 600, ShapeStyle::new().stroke("black").stroke_width(4))?;
    canvas.draw_sprite(
        700,
        700,
        &[
            ["transparent", "red", "transparent"],
            ["red", "yellow", "red"],
            ["transparent", "green", "transparent"],
        ],
        90,
        90,
    )?;
    hold(canvas, sky)
}

fn text(canvas: &mut Canvas) -> Result<(), EaselError> {
    canvas.draw_rectangle(0, 0, 1000, 1000, ShapeStyle::new().fill("ivory"))?;
    canvas.draw_text(
        500,
        300,
        "Hello, easel!",
        Some("color: crimson; font-size: 72px; font-weight: bold; text-align: center"),
    )?;
    canvas.draw_text(
        500,
        450,
        "Shapes stay put until you move them.",
        Some("font-family: Serif; font-size: 200%; font-style: italic; text-align: center"),
    )?;
    let counter = canvas.draw_text(500, 700, "frame 0", Some("font-size: 40px; text-align: center"))?;
    let mut frame = 0u64;
    loop {
        frame += 1;
        canvas.update_text(counter, &format!("frame {frame}"))?;
        canvas.sleep(15);
    }
}
