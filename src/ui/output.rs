use crate::output::is_quiet;
use crate::record::LocationRecord;
use crate::ui::{theme, Icons};
use console::Term;
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::PIN, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

/// One list entry: label as title, then note, coordinates and capture time
pub fn record(record: &LocationRecord) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {} {}",
        Icons::PIN.style(theme().info.clone()),
        record.label.style(theme().label.clone()),
        muted(&format!("#{}", record.id))
    );
    for line in record.note.lines() {
        println!("   {}", line);
    }
    println!("   {}", record.gps_line().style(theme().coords.clone()));
    println!("   {}", dim(&record.time_line()));
}

/// Ask a yes/no question on the terminal. Anything but "y"/"yes" is a no.
pub fn confirm(prompt: &str) -> std::io::Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!(
        "{} {} {} ",
        Icons::QUESTION,
        prompt.style(theme().warn.clone()),
        dim("[y/N]")
    ))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
