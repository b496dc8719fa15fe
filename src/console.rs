//! Line-oriented driver standing in for the chat widget and the tour overlay.
//!
//! Plain lines go to the assistant; `:`-prefixed lines drive the tour and the
//! simulated page.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::session::ChatSession;
use crate::errors::GuideResult;
use crate::guide::types::ResolvedTarget;
use crate::surface::traits::UiSurface;
use crate::surface::tree::UiTree;
use crate::tour::state::{TourSignal, TourStatus};

const HELP: &str = "\
commands:
  <text>          ask the assistant about the current page
  :demo <n>       show the visual demo for message <n>
  :next | :back   move through the tour
  :done | :skip   finish or skip the tour
  :goto <file>    navigate to another page fixture
  :quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Demo(usize),
    Signal(TourSignal),
    Goto(PathBuf),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Say(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "demo" => arg
            .parse()
            .map(Command::Demo)
            .unwrap_or_else(|_| Command::Invalid(format!("bad message index '{arg}'"))),
        "next" => Command::Signal(TourSignal::Advance),
        "back" => Command::Signal(TourSignal::Back),
        "done" => Command::Signal(TourSignal::Finished),
        "skip" => Command::Signal(TourSignal::Skipped),
        "goto" if !arg.is_empty() => Command::Goto(PathBuf::from(arg)),
        "goto" => Command::Invalid("goto needs a page fixture path".into()),
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command ':{other}'")),
    }
}

pub struct Console {
    chat: ChatSession,
    page: UiTree,
}

impl Console {
    pub fn new(chat: ChatSession, page: UiTree) -> Self {
        Self { chat, page }
    }

    pub async fn run(&mut self) -> GuideResult<()> {
        println!("UI Guide on {} (session {}). :help for commands.", self.page.route(), self.chat.session_id());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Command::Quit => break,
                command => self.handle(command).await,
            }
        }
        tracing::info!("console closed");
        Ok(())
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Say(text) => {
                let Some(reply) = self.chat.send(&text, &self.page).await else {
                    return;
                };
                println!("Assistant: {}", reply.text);
                let demo_steps = reply.has_demo().then(|| reply.actions.len());
                if let Some(count) = demo_steps {
                    let index = self.chat.messages().len() - 1;
                    println!("  ({count} steps, `:demo {index}` to show visual demo)");
                }
            }
            Command::Demo(index) => {
                let started = self
                    .chat
                    .show_visual_demo(index, &self.page)
                    .map(|steps| steps.len());
                match started {
                    Ok(_) => self.print_step(),
                    Err(e) => println!("{e}"),
                }
            }
            Command::Signal(signal) => {
                match self.chat.tour_mut().signal(signal, &self.page) {
                    TourStatus::Running => self.print_step(),
                    TourStatus::Finished => println!("Tour finished."),
                    TourStatus::Skipped => println!("Tour skipped."),
                    TourStatus::Idle => println!("No tour running."),
                }
            }
            Command::Goto(path) => match UiTree::load(&path) {
                Ok(page) => {
                    self.page = page;
                    println!("Now on {}", self.page.route());
                    if self.chat.tour_mut().on_route_change(&self.page) {
                        self.print_step();
                    }
                }
                Err(e) => println!("{e}"),
            },
            Command::Help => println!("{HELP}"),
            Command::Invalid(msg) => println!("{msg}"),
            Command::Quit => {}
        }
    }

    fn print_step(&self) {
        let tour = self.chat.tour();
        let Some(step) = tour.current_step() else {
            println!("Nothing to show on this page.");
            return;
        };
        let highlight = match &step.target {
            ResolvedTarget::Element { element, .. } => format!("highlight #{element}"),
            ResolvedTarget::Unresolved => "not found, highlighting page".to_string(),
        };
        println!(
            "[{}/{}] {} ({highlight})",
            tour.cursor() + 1,
            tour.steps().len(),
            step.display_text
        );
        if !tour.deferred().is_empty() {
            println!("  {} more step(s) after navigation", tour.deferred().len());
        }
    }
}
