use anyhow::Context;
use serde_json::json;

use netgrid_common::config::Config;
use netgrid_core::vendors::VendorCache;

use crate::commands::{CacheAction, OutputArgs};
use crate::terminal::print;

const KEY_WIDTH: usize = 8;

pub fn cache(action: CacheAction, cfg: &Config, output: OutputArgs) -> anyhow::Result<()> {
    let path = cfg.cache_path();
    let mut cache = VendorCache::load(&path);

    match action {
        CacheAction::Stats => {
            let stats = cache.stats();
            if output.json {
                let doc = json!({ "path": path.display().to_string(), "stats": stats });
                println!("{}", serde_json::to_string_pretty(&doc).context("failed to encode stats")?);
                return Ok(());
            }
            print::header("vendor cache");
            print::aligned_line("Path", path.display().to_string(), KEY_WIDTH);
            print::aligned_line("Entries", stats.total.to_string(), KEY_WIDTH);
            print::aligned_line("Known", stats.positive.to_string(), KEY_WIDTH);
            print::aligned_line("Unknown", stats.negative.to_string(), KEY_WIDTH);
        }
        CacheAction::Clear => {
            let removed = cache.len();
            cache.clear();
            cache
                .flush()
                .with_context(|| format!("failed to rewrite {}", path.display()))?;
            if !output.json {
                print::print_status(format!("Removed {removed} cached vendor entries"));
            }
        }
    }
    Ok(())
}
