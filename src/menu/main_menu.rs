use crate::config::{NamingMode, Settings};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;

/// Ask for the folder to clean. `None` when the user leaves it empty.
pub fn prompt_input_dir(term: &Term) -> Result<Option<PathBuf>> {
    term.clear_screen()?;
    println!("{}", style("=== NiClean ===").cyan().bold());
    println!(
        "{}",
        style("Copies photos and videos, strips their metadata and renames them.").dim()
    );

    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Folder to clean (empty to quit)")
        .allow_empty(true)
        .interact_text_on(term)?;

    // Drag-and-drop into a terminal often wraps the path in quotes
    let path = path.trim().trim_matches(|c| c == '"' || c == '\'');
    if path.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(path)))
}

/// Let the user adjust the resolved settings. `None` when cancelled.
pub fn prompt_settings(term: &Term, settings: &Settings) -> Result<Option<Settings>> {
    let mut settings = settings.clone();
    println!("{}", style("(ESC to cancel)").dim());

    let styles = [
        "iPhone style (IMG_0001.JPG)",
        "Android style (IMG_20240101_120000.JPG)",
        "Keep original names",
    ];
    let current = match settings.naming {
        NamingMode::Sequential => 0,
        NamingMode::Timestamped => 1,
        NamingMode::Original => 2,
    };
    let Some(selection) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Naming style")
        .items(&styles)
        .default(current)
        .interact_on_opt(term)?
    else {
        return Ok(None);
    };
    settings.naming = match selection {
        1 => NamingMode::Timestamped,
        2 => NamingMode::Original,
        _ => NamingMode::Sequential,
    };

    let Some(include_subfolders) = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Include subfolders?")
        .default(settings.include_subfolders)
        .interact_on_opt(term)?
    else {
        return Ok(None);
    };
    settings.include_subfolders = include_subfolders;

    let Some(strict_tools) = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Stop if exiftool or ffmpeg is missing?")
        .default(settings.strict_tools)
        .interact_on_opt(term)?
    else {
        return Ok(None);
    };
    settings.strict_tools = strict_tools;

    let action = if settings.dry_run {
        "Preview the result without writing anything?"
    } else {
        "Start cleaning?"
    };
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(action)
        .default(true)
        .interact_on_opt(term)?;

    Ok((confirmed == Some(true)).then_some(settings))
}
