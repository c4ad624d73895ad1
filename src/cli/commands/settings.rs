use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::settings::{Navigation, SettingsEditor};
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::duration::DURATION_KEY;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREEN, GREY, RESET, color_for_optional_field};
use std::io::{BufRead, Write, stdin, stdout};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        hours,
        minutes,
        seconds,
        due,
        clear_due,
        interactive,
        cancel,
    } = cmd
    {
        let mut store = SqliteStore::open(&cfg.database)?;
        let mut editor = SettingsEditor::load(&store)?;

        let edited = hours.is_some()
            || minutes.is_some()
            || seconds.is_some()
            || due.is_some()
            || *clear_due;

        if let Some(h) = hours {
            editor.set_hours(h);
        }
        if let Some(m) = minutes {
            editor.set_minutes(m);
        }
        if let Some(s) = seconds {
            editor.set_seconds(s);
        }
        if let Some(d) = due {
            editor.set_due_date(d);
        }
        if *clear_due {
            editor.set_due_date("");
        }

        if *interactive {
            prompt_fields(&mut editor, &mut stdin().lock())?;
        }

        print_editor(&editor);

        if !edited && !*interactive {
            return Ok(());
        }

        let save = if *cancel {
            false
        } else if *interactive {
            confirm("Save these settings?", &mut stdin().lock())?
        } else {
            true
        };

        if !save {
            info("Settings not saved.");
            navigate(editor.cancel());
            return Ok(());
        }

        if !editor.preview().save_enabled {
            warning("Save is disabled: the countdown duration is 00:00:00.");
        }

        let nav = editor.save(&mut store, &SystemClock)?;

        let (h, m, s) = editor.components();
        ttlog_quiet(
            store.conn(),
            "save",
            DURATION_KEY,
            &format!(
                "Countdown set to {} ({}h {}m {}s), due: {}",
                editor.preview().text,
                h,
                m,
                s,
                editor.due_preview()
            ),
        );

        success("Settings saved!");
        navigate(nav);
    }

    Ok(())
}

fn navigate(nav: Navigation) {
    match nav {
        Navigation::DisplayPage => info("Back to the countdown: `rcountdown show`"),
    }
}

fn print_editor<Tz>(editor: &SettingsEditor<Tz>)
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let preview = editor.preview();
    let save_state = if preview.save_enabled {
        format!("{GREEN}enabled{RESET}")
    } else {
        format!("{GREY}disabled{RESET}")
    };

    println!("⏱️  Countdown settings");
    println!("    Hours   : {}", editor.hours());
    println!("    Minutes : {}", editor.minutes());
    println!("    Seconds : {}", editor.seconds());
    println!(
        "    Due date: {}",
        if editor.due_date().is_empty() {
            "-"
        } else {
            editor.due_date()
        }
    );
    println!("Preview: {}", preview.text);
    println!(
        "Due:     {}{}{}",
        color_for_optional_field(editor.due_preview()),
        editor.due_preview(),
        RESET
    );
    println!("Save:    {}", save_state);
}

/// Ask for one field; an empty answer keeps `current`.
fn prompt<R: BufRead>(label: &str, current: &str, input: &mut R) -> AppResult<Option<String>> {
    print!("{} [{}]: ", label, current);
    stdout().flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(None);
    }

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

fn prompt_fields<Tz, R>(editor: &mut SettingsEditor<Tz>, input: &mut R) -> AppResult<()>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
    R: BufRead,
{
    if let Some(v) = prompt("Hours", &editor.hours().to_string(), input)? {
        println!("  → {}", editor.set_hours(&v).text);
    }
    if let Some(v) = prompt("Minutes", &editor.minutes().to_string(), input)? {
        println!("  → {}", editor.set_minutes(&v).text);
    }
    if let Some(v) = prompt("Seconds", &editor.seconds().to_string(), input)? {
        println!("  → {}", editor.set_seconds(&v).text);
    }

    let current_due = if editor.due_date().is_empty() {
        "none, '-' clears".to_string()
    } else {
        format!("{}, '-' clears", editor.due_date())
    };
    if let Some(v) = prompt("Due date (YYYY-MM-DDTHH:MM)", &current_due, input)? {
        let v = if v == "-" { String::new() } else { v };
        println!("  → {}", editor.set_due_date(&v));
    }

    Ok(())
}

fn confirm<R: BufRead>(question: &str, input: &mut R) -> AppResult<bool> {
    print!("{} [y/N]: ", question);
    stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}
