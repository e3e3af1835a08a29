use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use netgrid_common::network::collection::InterfaceCollection;
use netgrid_common::network::interface::InterfaceType;
use netgrid_core::Collector;

use crate::commands::OutputArgs;
use crate::terminal::{colors, network_fmt, print, spinner};

pub async fn list(collector: &Collector, output: OutputArgs) -> anyhow::Result<()> {
    let pb = spinner::start("Collecting interfaces...", output.json);
    let start_time: Instant = Instant::now();
    let result = collector.collect().await;
    pb.stop();

    let interfaces: InterfaceCollection = result.context("interface discovery failed")?;

    if output.json {
        let json = serde_json::to_string_pretty(&interfaces).context("failed to encode interfaces")?;
        println!("{json}");
        return Ok(());
    }

    if interfaces.is_empty() {
        print::header("zero interfaces");
        print::no_results();
        return Ok(());
    }

    print::header("network interfaces");
    for (idx, interface) in interfaces.iter().enumerate() {
        network_fmt::print_interface(interface, idx, output.show_ipv6);
        if idx + 1 != interfaces.len() {
            print::print("");
        }
    }

    if output.show_summary {
        print_summary(&interfaces);
    }
    print_footer(interfaces.len(), start_time.elapsed());
    Ok(())
}

fn print_summary(interfaces: &InterfaceCollection) {
    let rows: [(&str, usize); 6] = [
        ("Total", interfaces.len()),
        ("Up", interfaces.up().len()),
        ("Down", interfaces.down().len()),
        ("Physical", interfaces.physical().len()),
        ("Wireless", interfaces.filter_by_type(InterfaceType::Wireless).len()),
        ("Virtual", interfaces.filter_by_type(InterfaceType::Virtual).len()),
    ];
    let key_width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    print::header("summary");
    for (key, count) in rows {
        print::aligned_line(key, count.to_string(), key_width);
    }
}

fn print_footer(count: usize, total_time: Duration) {
    let found: ColoredString = format!("{count} interfaces").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Collection Complete: {found} listed in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::print(&format!("{output}"));
}
