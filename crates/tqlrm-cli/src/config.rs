use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "tqlrm.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub tql: TqlConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TqlConfig {
    pub bin: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub separator: Option<String>,
}

impl ConfigFile {
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!("failed to read config file {}: {e}", config_path.display())
        })?;

        let mut file: ConfigFile = toml::from_str(&raw).map_err(|e| {
            anyhow::anyhow!("failed to parse config file {}: {e}", config_path.display())
        })?;

        file.expand_env()?;
        file.validate()?;

        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        for field in [
            &mut self.tql.bin,
            &mut self.defaults.database,
            &mut self.defaults.schema,
            &mut self.defaults.separator,
        ] {
            if let Some(value) = field.as_mut() {
                *value = expand_env_vars(value)?;
            }
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(version) = &self.version {
            if version.trim() != "1" {
                anyhow::bail!("unsupported config version: {version}");
            }
        }

        if let Some(separator) = &self.defaults.separator {
            if separator.len() != 1 {
                anyhow::bail!(
                    "invalid defaults.separator: {separator} (expected a single character)"
                );
            }
        }

        Ok(())
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}}}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
