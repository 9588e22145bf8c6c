use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use aura_core::{review, update, AppState, Msg};
use aura_engine::{ApiError, EngineEvent, EngineHandle};
use aura_logging::{aura_debug, aura_info, aura_warn};

use crate::commands::{self, Command, HELP};
use crate::config::Config;
use crate::render;

/// How often engine events are drained while waiting for input.
const TICK: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(config: Config) -> Result<()> {
    let engine = EngineHandle::new(config.client_settings(), config.search_settings())
        .context("failed to start engine")?;
    aura_info!(
        "Engine ready (api={}, signed_in={})",
        config.api_url,
        config.api_token.is_some()
    );

    // Stdin is read on its own thread so engine events keep flowing while
    // the user is typing.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    aura_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });

    let mut session = Session::new(engine);
    println!("{HELP}");
    session.dispatch(Msg::LoadBatchRequested);
    prompt()?;

    loop {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => {
                if session.handle_line(&line) == Flow::Quit {
                    break;
                }
                prompt()?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if session.pump_engine_events() {
            prompt()?;
        }
    }

    session.engine.shutdown();
    aura_info!("Session ended");
    Ok(())
}

fn prompt() -> Result<()> {
    print!("aura> ");
    io::stdout().flush().context("failed to flush stdout")
}

struct Session {
    state: AppState,
    engine: EngineHandle,
}

impl Session {
    fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            engine,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        aura_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.engine.execute(effects);
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                println!("{err}");
                return Flow::Continue;
            }
        };

        match command {
            Command::Query(query) => self.dispatch(Msg::QueryEdited(query)),
            Command::Search => self.dispatch(Msg::SearchSubmitted),
            Command::Results => print!("{}", render::search(&self.engine.search_state())),
            Command::Load => {
                self.dispatch(Msg::LoadBatchRequested);
                if !self.state.is_loading_batch() {
                    print!("{}", render::dashboard(&self.state.view()));
                }
            }
            Command::NewBatch => self.dispatch(Msg::NewBatchRequested),
            Command::Dashboard => print!("{}", render::dashboard(&self.state.view())),
            Command::Rate { job_id, stars } => {
                if self.state.batch().job(job_id).is_none() {
                    println!("Job {job_id} is not in the current batch.");
                    return Flow::Continue;
                }
                self.dispatch(Msg::JobRated { job_id, stars });
                let progress = self.state.batch().progress();
                println!(
                    "Rated job {job_id} {} stars ({}/{} rated)",
                    stars.get(),
                    progress.rated,
                    progress.total
                );
            }
            Command::Review => print!("{}", render::review(&self.state.view())),
            Command::Toggle(job_id) => {
                // Only eligible jobs get a checkbox on the review page.
                if !review::is_eligible(self.state.batch().rating(job_id))
                    || self.state.batch().job(job_id).is_none()
                {
                    println!("Job {job_id} is not eligible; rate it 4 stars or more first.");
                    return Flow::Continue;
                }
                self.dispatch(Msg::SelectionToggled(job_id));
                print!("{}", render::review(&self.state.view()));
            }
            Command::Applications => print!("{}", render::applications(&self.state.view())),
            Command::JobDetail(job_id) => {
                let api = self.engine.api();
                match self.engine.block_on(async move { api.get_job(job_id).await }) {
                    Ok(job) => print!("{}", render::job_detail(&job)),
                    Err(err) => println!("Could not load job {job_id}: {err}"),
                }
            }
            Command::Preferences => {
                let api = self.engine.api();
                match self.engine.block_on(async move { api.get_preferences().await }) {
                    Ok(prefs) => print!("{}", render::preferences(prefs.as_ref())),
                    Err(err) => println!("Could not load preferences: {err}"),
                }
            }
            Command::SetPreference(edit) => {
                let api = self.engine.api();
                let saved = self.engine.block_on(async move {
                    let mut prefs = api.get_preferences().await?.unwrap_or_default();
                    edit.apply(&mut prefs);
                    api.put_preferences(&prefs).await?;
                    Ok::<_, ApiError>(prefs)
                });
                match saved {
                    Ok(prefs) => {
                        aura_info!("Preferences updated");
                        print!("{}", render::preferences(Some(&prefs)));
                    }
                    Err(err) => println!("Could not save preferences: {err}"),
                }
            }
            Command::Health => {
                let api = self.engine.api();
                match self.engine.block_on(async move { api.health().await }) {
                    Ok(health) => println!("API status: {}", health.status),
                    Err(err) => println!("API unreachable: {err}"),
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Applies pending engine events. Returns true when something was printed.
    fn pump_engine_events(&mut self) -> bool {
        let mut printed = false;
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::BatchLoaded(batch) => {
                    self.dispatch(Msg::BatchLoaded(batch));
                    self.print_dashboard();
                    printed = true;
                }
                EngineEvent::JobsLoaded(jobs) => {
                    self.dispatch(Msg::JobsLoaded(jobs));
                    self.print_dashboard();
                    printed = true;
                }
                EngineEvent::BatchFailed(err) => {
                    self.dispatch(Msg::BatchLoadFailed(err.to_string()));
                    self.print_dashboard();
                    printed = true;
                }
                EngineEvent::SearchUpdated(search) => {
                    // Loading updates are noise in a terminal; settled ones are shown.
                    if !search.loading {
                        println!();
                        print!("{}", render::search(&search));
                        printed = true;
                    }
                }
            }
        }
        printed
    }

    fn print_dashboard(&mut self) {
        if self.state.consume_dirty() {
            println!();
            print!("{}", render::dashboard(&self.state.view()));
        }
    }
}
