//! lnav - Main Entry Point
//!
//! Usage: `lnav <file.html> [prefs.toml]`, then commands on stdin.

use anyhow::{Context, Result};
use lnav_a11y::{Configuration, MemoryPreferenceStore};
use lnav_browser::{Command, CommandError, Session, HELP};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let page_path = PathBuf::from(args.next().context("usage: lnav <file.html> [prefs.toml]")?);
    let config = match args.next() {
        Some(path) => Configuration::from_toml_file(Path::new(&path))
            .with_context(|| format!("Failed to load preferences from {}", path))?,
        None => Configuration::default(),
    };

    let document = lnav_html::parse_file(&page_path)
        .with_context(|| format!("Failed to load page {}", page_path.display()))?;

    let mut session =
        Session::new(MemoryPreferenceStore::from_config(&config)).context("Failed to start landmark navigation")?;
    session.load_page(document);
    println!("{}", session.tab().title);
    print_menu(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => run(&mut session, command),
            Err(CommandError::Empty) => {}
            Err(err) => println!("{}", err),
        }
        stdout.flush()?;
    }

    Ok(())
}

fn run(session: &mut Session, command: Command) {
    let focused = match command {
        Command::Next => session.next(),
        Command::Previous => session.previous(),
        Command::Key { key, shift, control } => session.press_key(&key, shift, control),
        Command::Go(position) => session.activate_menu_item(position - 1).map(|_| None),
        Command::Menu => {
            print_menu(session);
            return;
        }
        Command::Set { pref, value } => {
            match session.set_preference_str(&pref, &value) {
                Ok(true) => println!("{} = {}", pref, value),
                Ok(false) => println!("{} unchanged", pref),
                Err(err) => {
                    tracing::warn!("Preference change rejected: {}", err);
                    println!("{}", err);
                }
            }
            return;
        }
        Command::Tick(ms) => {
            let ran = session.advance_time(ms);
            println!("t={}ms ({} task(s) run)", session.tab().now(), ran);
            return;
        }
        Command::Focus => Ok(None),
        Command::Help => {
            println!("{}", HELP);
            return;
        }
        Command::Quit => return,
    };

    match focused {
        Ok(_) => match session.focused_label() {
            Some(label) => println!("> {}", label.trim_start_matches('-')),
            None => println!("No landmark focused"),
        },
        Err(err) => println!("{}", err),
    }
}

fn print_menu(session: &Session) {
    let menu = session.open_menu();
    let selected = session.navigator().state().previous_selected_index;
    for (i, item) in menu.items.iter().enumerate() {
        if item.is_disabled() {
            println!("    {}", item.label);
            continue;
        }
        let marker = if selected == Some(i) { '*' } else { ' ' };
        println!("{} {:>2}. {}", marker, i + 1, item.label);
    }
}
