use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono_tz::Tz;
use serde::Deserialize;

pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

#[derive(Deserialize, Clone, Debug)]
pub struct Prismic {
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Paths {
    pub template_dir: Option<PathBuf>,
    pub public_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Defaults {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Posts per page on the home listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// How many posts are pre-rendered by the static generation
    #[serde(default = "default_static_paths_size")]
    pub static_paths_size: u32,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            site_name: default_site_name(),
            page_size: default_page_size(),
            static_paths_size: default_static_paths_size(),
            timezone: default_timezone(),
        }
    }
}

fn default_site_name() -> String {
    "spaceTraveling".to_string()
}

fn default_page_size() -> u32 {
    2
}

fn default_static_paths_size() -> u32 {
    3
}

fn default_timezone() -> Tz {
    chrono_tz::America::Sao_Paulo
}

#[derive(Deserialize, Clone, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
    pub max_files: Option<usize>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Settings of the utterances comment widget
#[derive(Deserialize, Clone, Debug)]
pub struct Comments {
    pub repo: String,
    #[serde(default = "default_issue_term")]
    pub issue_term: String,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_issue_term() -> String {
    "pathname".to_string()
}

fn default_label() -> String {
    "comment".to_string()
}

fn default_theme() -> String {
    "github-dark".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub prismic: Prismic,
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
    pub comments: Option<Comments>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match exe_dir {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: cfg.paths.template_dir.map(parse_path),
        public_dir: parse_path(cfg.paths.public_dir),
        output_dir: cfg.paths.output_dir.map(parse_path),
    };
    cfg.prismic.api_endpoint = cfg.prismic.api_endpoint.trim_end_matches('/').to_string();

    if cfg.defaults.page_size == 0 || cfg.defaults.static_paths_size == 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidData, "Page sizes in [defaults] must be greater than 0"));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;

    // The environment wins over the file so tokens can stay out of it
    if let Ok(token) = env::var(ACCESS_TOKEN_ENV) {
        if !token.is_empty() {
            cfg.prismic.access_token = Some(token);
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg_str = r##"
[prismic]
api_endpoint = "https://spacetraveling.cdn.prismic.io/api/v2/"
access_token = "secret"

[paths]
template_dir = "template"
public_dir = "public"

[defaults]
site_name = "My blog"
page_size = 5
static_paths_size = 4
timezone = "Europe/Lisbon"

[server]
address = "0.0.0.0"
port = 3000

[log]
level = "Debug"
log_to_console = true

[comments]
repo = "someone/blog-comments"
theme = "github-light"
"##;
        let cfg = parse_config(cfg_str).unwrap();
        assert_eq!(cfg.prismic.api_endpoint, "https://spacetraveling.cdn.prismic.io/api/v2");
        assert_eq!(cfg.prismic.access_token.as_deref(), Some("secret"));
        assert_eq!(cfg.paths.template_dir, Some(PathBuf::from("template")));
        assert_eq!(cfg.defaults.site_name, "My blog");
        assert_eq!(cfg.defaults.page_size, 5);
        assert_eq!(cfg.defaults.static_paths_size, 4);
        assert_eq!(cfg.defaults.timezone, chrono_tz::Europe::Lisbon);
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.log.unwrap().level, LogLevel::Debug);

        let comments = cfg.comments.unwrap();
        assert_eq!(comments.repo, "someone/blog-comments");
        assert_eq!(comments.issue_term, "pathname");
        assert_eq!(comments.label, "comment");
        assert_eq!(comments.theme, "github-light");
    }

    #[test]
    fn test_parse_defaults() {
        let cfg_str = r##"
[prismic]
api_endpoint = "https://spacetraveling.cdn.prismic.io/api/v2"

[paths]
public_dir = "public"

[server]
address = "127.0.0.1"
port = 8001
"##;
        let cfg = parse_config(cfg_str).unwrap();
        assert_eq!(cfg.defaults.site_name, "spaceTraveling");
        assert_eq!(cfg.defaults.page_size, 2);
        assert_eq!(cfg.defaults.static_paths_size, 3);
        assert_eq!(cfg.defaults.timezone, chrono_tz::America::Sao_Paulo);
        assert!(cfg.paths.template_dir.is_none());
        assert!(cfg.log.is_none());
        assert!(cfg.comments.is_none());
    }

    #[test]
    fn test_reject_zero_page_size() {
        let cfg_str = r##"
[prismic]
api_endpoint = "https://spacetraveling.cdn.prismic.io/api/v2"

[paths]
public_dir = "public"

[defaults]
page_size = 0

[server]
address = "127.0.0.1"
port = 8001
"##;
        let err = parse_config(cfg_str).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_unknown_timezone() {
        let cfg_str = r##"
[prismic]
api_endpoint = "https://spacetraveling.cdn.prismic.io/api/v2"

[paths]
public_dir = "public"

[defaults]
timezone = "Mars/Olympus_Mons"

[server]
address = "127.0.0.1"
port = 8001
"##;
        assert!(parse_config(cfg_str).is_err());
    }
}
