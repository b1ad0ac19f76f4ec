use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::game::types::Statistics;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    // Persisted window geometry (absent on first run or unsupported platforms)
    pub window_width: Option<i32>,
    pub window_height: Option<i32>,
}

fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io.github", "oddeven", "HandCricket").map(|p| p.config_dir().to_path_buf())
}

fn ensure_config_dir() -> io::Result<PathBuf> {
    if let Some(dir) = project_config_dir() {
        fs::create_dir_all(&dir)?;
        Ok(dir)
    } else {
        Ok(std::env::current_dir()?)
    }
}

fn settings_path() -> io::Result<PathBuf> {
    let mut p = ensure_config_dir()?;
    p.push("settings.json");
    Ok(p)
}

fn statistics_path() -> io::Result<PathBuf> {
    let mut p = ensure_config_dir()?;
    p.push("statistics.json");
    Ok(p)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: io::Result<PathBuf>) -> Option<T> {
    let p = path.ok()?;
    if !p.is_file() {
        return None;
    }
    let mut s = String::new();
    File::open(&p).ok()?.read_to_string(&mut s).ok()?;
    serde_json::from_str(&s).ok()
}

fn write_json<T: Serialize>(path: io::Result<PathBuf>, value: &T) -> io::Result<()> {
    let p = path?;
    let data =
        serde_json::to_string_pretty(value).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let mut f = File::create(&p)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

pub fn load_settings() -> Settings {
    read_json(settings_path()).unwrap_or_default()
}

pub fn save_settings(s: &Settings) -> io::Result<()> {
    write_json(settings_path(), s)
}

pub fn load_statistics() -> Statistics {
    read_json(statistics_path()).unwrap_or_default()
}

pub fn save_statistics(st: &Statistics) -> io::Result<()> {
    write_json(statistics_path(), st)
}
