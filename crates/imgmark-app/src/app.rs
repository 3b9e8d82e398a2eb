//! Command loop and application lifecycle.

use crate::config::{AppConfig, ConfigError};
use crate::menu::MenuCommand;
use crate::shortcuts::ShortcutRegistry;
use crate::view;
use clap::Parser;
use image::RgbaImage;
use imgmark_core::{Canvas, LoadError, SessionController, SessionOutcome, ToolKind};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use thiserror::Error;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "imgmark", version, about = "Draw rectangles, lines and circles on an image")]
pub struct Cli {
    /// Image to annotate. Prompted for when omitted.
    pub image: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Opens the windows the menu commands need.
pub trait WindowHost {
    /// Drive the live session of `controller` until it retires.
    fn run_session(
        &mut self,
        config: &AppConfig,
        controller: &mut SessionController,
        tool: ToolKind,
    ) -> Result<SessionOutcome, eframe::Error>;

    /// Display `image` until the user dismisses it.
    fn show_image(&mut self, config: &AppConfig, image: &RgbaImage) -> Result<(), eframe::Error>;
}

/// Native eframe windows.
pub struct EframeHost;

impl WindowHost for EframeHost {
    fn run_session(
        &mut self,
        config: &AppConfig,
        controller: &mut SessionController,
        tool: ToolKind,
    ) -> Result<SessionOutcome, eframe::Error> {
        view::run_session(config, controller, tool)
    }

    fn show_image(&mut self, config: &AppConfig, image: &RgbaImage) -> Result<(), eframe::Error> {
        view::show_image(config, image)
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    controller: SessionController,
}

impl App {
    /// Create an application editing `canvas`.
    pub fn new(config: AppConfig, canvas: Canvas) -> Result<Self, ConfigError> {
        let style = config.shape_style()?;
        Ok(Self {
            config,
            controller: SessionController::with_style(canvas, style),
        })
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Show the menu and run commands read from `input` until Exit is chosen
    /// or the input ends.
    pub fn run_menu(
        &mut self,
        input: &mut impl BufRead,
        host: &mut impl WindowHost,
    ) -> Result<(), AppError> {
        loop {
            MenuCommand::print_menu();
            let Some(line) = prompt(input, "Select an option: ")? else {
                log::info!("Input closed, exiting");
                return Ok(());
            };

            let command = match line.parse::<MenuCommand>() {
                Ok(command) => command,
                Err(err) => {
                    log::debug!("Rejected menu input {line:?}: {err}");
                    println!("{err}");
                    continue;
                }
            };

            if self.dispatch(command, input, host)?.is_break() {
                println!("Exiting");
                log::info!("Exiting");
                return Ok(());
            }
        }
    }

    fn dispatch(
        &mut self,
        command: MenuCommand,
        input: &mut impl BufRead,
        host: &mut impl WindowHost,
    ) -> Result<ControlFlow<()>, AppError> {
        match command {
            MenuCommand::Draw(tool) => self.draw(tool, host),
            MenuCommand::Show => {
                if let Err(err) = host.show_image(&self.config, self.controller.canvas().committed())
                {
                    log::error!("Could not open image window: {err}");
                    println!("Could not open image window: {err}");
                }
            }
            MenuCommand::Save => {
                let filename = prompt(input, "Enter filename to save: ")?.unwrap_or_default();
                match self.controller.save(filename.trim()) {
                    Ok(()) => println!("Image saved as {}", filename.trim()),
                    Err(err) => {
                        log::warn!("Save failed: {err}");
                        println!("{err}");
                    }
                }
            }
            MenuCommand::Reset => {
                self.controller.reset();
                println!("Image reset to original");
            }
            MenuCommand::Exit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn draw(&mut self, tool: ToolKind, host: &mut impl WindowHost) {
        if let Err(err) = self.controller.begin(tool) {
            println!("{err}");
            return;
        }
        ShortcutRegistry::print_session_help(tool);

        match host.run_session(&self.config, &mut self.controller, tool) {
            Ok(SessionOutcome::Committed(shape)) => println!("{shape}"),
            Ok(SessionOutcome::Cancelled) => println!("{tool} operation cancelled"),
            Err(err) => {
                log::error!("Could not open drawing window: {err}");
                println!("Could not open drawing window: {err}");
            }
        }
        // A host that returns early must not leave a session behind.
        self.controller.cancel();
    }
}

/// Print `message` and read one line. Returns `None` at end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>, std::io::Error> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Run the application: load the configuration and the image, then the menu.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let path = match cli.image {
        Some(path) => path,
        None => PathBuf::from(
            prompt(&mut input, "Enter image path: ")?
                .unwrap_or_default()
                .trim(),
        ),
    };

    let canvas = Canvas::load(&path)?;
    let mut app = App::new(config, canvas)?;
    app.run_menu(&mut input, &mut EframeHost)
}
