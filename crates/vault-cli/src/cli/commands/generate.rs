//! Generate command handler.

use std::path::Path;

use anyhow::{Context, Result};
use vault_core::config::Config;
use vault_core::design::DesignRecord;
use vault_core::generation::Generator;
use vault_core::preview;

pub async fn run(config: &Config, prompt: &str, out: Option<&Path>, open: bool) -> Result<()> {
    let generator = Generator::new(config.generation.clone());
    let markup = generator
        .generate(prompt)
        .await
        .map_err(|e| anyhow::Error::new(e.clone()).context(e.user_message()))?;

    if let Some(path) = out {
        std::fs::write(path, &markup)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    } else {
        println!("{markup}");
    }

    if open {
        let record = DesignRecord::from_generation(prompt, markup, chrono::Utc::now());
        let code = record.code.as_deref().unwrap_or_default();
        let page = preview::open_preview(&record.id, code)?;
        eprintln!("Preview at {}", page.display());
    }

    Ok(())
}

