use std::path::{Path, PathBuf};

use clap::Args;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use eyre::{Context as _, Result, bail, eyre};
use stencil_catalog::{Generator, Mode, Request, Template, VariableType};
use stencil_core::{Context, Value};

use super::UnwrapOrExit;
use crate::catalog::CatalogArgs;

#[derive(Args)]
pub struct RenderCommand {
    /// Template id (see `stencil list`)
    pub template: String,

    /// Set a variable, e.g. --set entityName=MerchantCard (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Read variable values from a .json or .toml file
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Start from one of the template's example presets
    #[arg(short, long)]
    pub example: Option<String>,

    /// Fall back to defaults for invalid values instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Prompt for every variable
    #[arg(short, long)]
    pub interactive: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, conflicts_with = "write")]
    pub output: Option<PathBuf>,

    /// Write output to the template's file name in the current directory
    #[arg(short, long)]
    pub write: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let registry = self.catalog.load().unwrap_or_exit();
        let template = registry.get(&self.template).unwrap_or_exit();

        let mut values = match &self.values {
            Some(path) => read_values(path)?,
            None => Context::new(),
        };
        for (key, raw) in &self.set {
            values.insert(key.as_str(), coerce(&template, key, raw));
        }
        if self.interactive {
            values = self.prompt(&template, values)?;
        }

        let mut request = Request::new(self.template.as_str()).values(values);
        if let Some(example) = &self.example {
            request = request.example(example.as_str());
        }
        let mode = if self.lenient {
            Mode::Lenient
        } else {
            Mode::Strict
        };

        let generated = Generator::new(&registry)
            .mode(mode)
            .generate(&request)
            .unwrap_or_exit();

        for warning in &generated.warnings {
            eprintln!("warning: {}", warning);
        }

        let target = match (&self.output, self.write) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => match &generated.file_name {
                Some(name) => Some(PathBuf::from(name)),
                None => bail!("template '{}' does not declare a file name; use --output", template.id),
            },
            (None, false) => None,
        };

        match target {
            Some(path) => {
                std::fs::write(&path, &generated.output)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                println!("✓ Wrote {}", path.display());
            }
            None => print!("{}", generated.output),
        }

        Ok(())
    }

    /// Ask for each variable, offering the value it would otherwise get.
    fn prompt(&self, template: &Template, values: Context) -> Result<Context> {
        let mut current = template.defaults();
        if let Some(example) = self.example.as_deref().and_then(|name| template.example(name)) {
            current = current.merged(&example.values);
        }
        current = current.merged(&values);

        let theme = ColorfulTheme::default();
        let mut answers = values;
        for def in &template.variables {
            let existing = current.get(&def.name).unwrap_or(&def.default_value);
            let answer = match def.ty {
                VariableType::Text => {
                    let text: String = Input::with_theme(&theme)
                        .with_prompt(&def.label)
                        .default(existing.to_string())
                        .allow_empty(true)
                        .interact_text()
                        .wrap_err("Failed to read input")?;
                    Value::String(text)
                }
                VariableType::Select => {
                    let selected = existing.as_str().unwrap_or_default();
                    let index = def.options.iter().position(|o| o == selected).unwrap_or(0);
                    let choice = Select::with_theme(&theme)
                        .with_prompt(&def.label)
                        .items(&def.options)
                        .default(index)
                        .interact()
                        .wrap_err("Failed to get selection")?;
                    Value::String(def.options[choice].clone())
                }
                VariableType::Boolean => {
                    let confirmed = Confirm::with_theme(&theme)
                        .with_prompt(&def.label)
                        .default(existing.as_bool().unwrap_or(false))
                        .interact()
                        .wrap_err("Failed to get confirmation")?;
                    Value::Bool(confirmed)
                }
            };
            answers.insert(def.name.as_str(), answer);
        }
        Ok(answers)
    }
}

fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

/// Convert a `--set` value using the variable's declared type.
fn coerce(template: &Template, key: &str, raw: &str) -> Value {
    match template.variable(key) {
        Some(def) => def.parse_value(raw),
        None => Value::String(raw.to_string()),
    }
}

fn read_values(path: &Path) -> Result<Context> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let json: serde_json::Value = serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        Context::from_json(json)
            .ok_or_else(|| eyre!("{} must contain a JSON object", path.display()))
    } else {
        let table: toml::Table = toml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        Ok(Context::from_toml(table))
    }
}
