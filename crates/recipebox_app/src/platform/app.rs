use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use recipebox_core::{update, AppState, Msg};
use recipebox_logging::{rb_error, rb_info};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;

/// Everything the main loop reacts to: user lines and client completions.
pub enum Input {
    Msg(Msg),
    Line(String),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let config = config::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    if let Err(err) = recipebox_logging::initialize(
        config.log_destination,
        config.level(),
        &recipebox_logging::default_log_path(),
    ) {
        eprintln!("Warning: logging disabled: {err}");
    }
    rb_info!("Recipebox starting against {}", config.base_url);

    let (tx, rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(&config.client_settings(), tx.clone())
        .context("starting the backend client")?;
    spawn_stdin_reader(tx);

    let mut app = App {
        state: AppState::new(),
        runner,
        config,
    };
    println!("Recipebox. Type 'help' for commands.");
    app.dispatch(Msg::ListOpened);
    app.render();

    while let Ok(input) = rx.recv() {
        match input {
            Input::Msg(msg) => app.dispatch(msg),
            Input::Line(line) => match parse_command(&line) {
                Ok(Some(Command::Dispatch(msgs))) => msgs.into_iter().for_each(|m| app.dispatch(m)),
                Ok(Some(Command::SaveConfig)) => app.save_config(&config_path),
                Ok(Some(Command::Help)) => println!("{HELP}"),
                Ok(Some(Command::Quit)) => break,
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Input::Closed => break,
        }
        app.render();
    }

    rb_info!("Recipebox exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    config: AppConfig,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = update(state, msg);
        self.state = next;
        self.runner.enqueue(effects);
    }

    fn render(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", render(&self.state.view()));
        let _ = out.flush();
    }

    fn save_config(&self, path: &std::path::Path) {
        match config::save(path, &self.config) {
            Ok(()) => println!("Configuration written to {}", path.display()),
            Err(err) => {
                rb_error!("Saving configuration failed: {}", err);
                println!("Unable to write configuration: {err}");
            }
        }
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });
}
