use anyhow::{Context, bail};

use netgrid_core::Collector;

use crate::commands::OutputArgs;
use crate::terminal::{network_fmt, print, spinner};

pub async fn show(collector: &Collector, name: &str, output: OutputArgs) -> anyhow::Result<()> {
    let pb = spinner::start(&format!("Looking up {name}..."), output.json);
    let result = collector.collect_one(name).await;
    pb.stop();

    let Some(interface) = result.context("interface discovery failed")? else {
        bail!("no interface named {name:?}");
    };

    if output.json {
        let json = serde_json::to_string_pretty(&interface).context("failed to encode interface")?;
        println!("{json}");
        return Ok(());
    }

    print::header(&format!("interface {name}"));
    network_fmt::print_interface(&interface, 0, true);

    if !interface.flags.names().is_empty() {
        print::print("");
        print::aligned_line("Flags", interface.flags.names().join(" "), 5);
    }
    Ok(())
}
