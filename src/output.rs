//! Output formatting for the level dump and build reports

use crate::stats::{abbreviate_digits, format_count, format_millis, BuildReport};
use crate::text::escape_bytes;
use crate::tree::LevelEntry;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print the level dump, one edge label per line indented by its level
pub fn print_levels(entries: &[LevelEntry<'_>], color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    write_levels(&mut stdout, entries)
}

pub fn write_levels<W: WriteColor>(out: &mut W, entries: &[LevelEntry<'_>]) -> io::Result<()> {
    for entry in entries {
        write!(out, "{:width$}", "", width = entry.level * 2)?;

        // Level number
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", entry.level)?;
        out.reset()?;
        write!(out, ": ")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(out, "{}", escape_bytes(entry.label))?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print a build report as aligned `key: value` lines
pub fn print_report(report: &BuildReport, color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    write_report(&mut stdout, report)
}

pub fn write_report<W: WriteColor>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    let simple = if report.is_simple { "yes" } else { "no" };

    write_heading(out, "Suffix tree")?;
    write_field(out, "Text length", &format_count(report.text_len as u64))?;
    write_field(out, "Block length", &report.block_len.to_string())?;
    write_field(out, "Prime p", &abbreviate_digits(&report.p, 12))?;
    write_field(out, "Base x", &abbreviate_digits(&report.x, 12))?;
    if let Some(seed) = report.seed {
        write_field(out, "Seed", &seed.to_string())?;
    }
    write_field(out, "Simple", simple)?;
    write_field(out, "Nodes", &format_count(report.node_count as u64))?;
    write_field(out, "Leaves", &format_count(report.leaf_count as u64))?;
    write_field(out, "Height", &report.height.to_string())?;

    writeln!(out)?;
    write_heading(out, "Construction")?;
    let stats = &report.stats;
    write_field(out, "Inserts", &format_count(stats.inserts))?;
    write_field(out, "Splits", &format_count(stats.splits))?;
    write_field(out, "Descents", &format_count(stats.descents))?;
    write_field(out, "LCE probes", &format_count(stats.lce_probes))?;
    write_field(out, "LCE chars", &format_count(stats.lce_chars))?;
    write_field(out, "Params time", &format_millis(report.params_ms))?;
    write_field(out, "Build time", &format_millis(report.build_ms))?;

    if let Some(verified) = report.verified {
        let (label, fg) = if verified {
            ("ok", Color::Green)
        } else {
            ("FAILED", Color::Red)
        };
        write!(out, "{:16}", "Verified:")?;
        out.set_color(ColorSpec::new().set_fg(Some(fg)).set_bold(true))?;
        write!(out, "{}", label)?;
        out.reset()?;
        writeln!(out)?;
    }

    Ok(())
}

fn write_heading<W: WriteColor>(out: &mut W, title: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(out, "{}", title)?;
    out.reset()?;
    writeln!(out, "{}", "=".repeat(title.len()))
}

fn write_field<W: WriteColor>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    write!(out, "{:16}", format!("{}:", key))?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{}", value)?;
    out.reset()?;
    writeln!(out)
}
