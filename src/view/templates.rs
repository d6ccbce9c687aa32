use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

pub const HOME_TEMPLATE: &str = "home.tpl";
pub const POST_TEMPLATE: &str = "post.tpl";

const BUILTIN_HOME: &str = include_str!("../../res/template/home.tpl");
const BUILTIN_POST: &str = include_str!("../../res/template/post.tpl");

/// Template sources, read once at startup.
#[derive(Clone, Debug)]
pub struct Templates {
    pub home: String,
    pub post: String,
}

impl Templates {
    pub fn builtin() -> Self {
        Templates {
            home: BUILTIN_HOME.to_string(),
            post: BUILTIN_POST.to_string(),
        }
    }

    /// Templates from `template_dir`; missing files fall back to the built-in ones.
    pub fn load(template_dir: Option<&Path>) -> io::Result<Self> {
        let Some(tpl_dir) = template_dir else {
            return Ok(Self::builtin());
        };

        Ok(Templates {
            home: read_template(tpl_dir, HOME_TEMPLATE, BUILTIN_HOME)?,
            post: read_template(tpl_dir, POST_TEMPLATE, BUILTIN_POST)?,
        })
    }
}

fn read_template(tpl_dir: &Path, file_name: &str, fallback: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    match fs::read_to_string(&full_path) {
        Ok(src) => Ok(src),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(fallback.to_string()),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))),
    }
}
