//! Rendering of sampled tables and histograms.
//!
//! Three formats: boxed text for terminals, JSON reports and CSV records.

use std::io::Write;

use serde::Serialize;
use tabsim_core::types::{ContingencyTable, Histogram, Margins};

use crate::config::OutputFormat;
use crate::Result;

#[derive(Serialize)]
struct TableReport<'a> {
    seed: i64,
    margins: &'a Margins,
    tables: Vec<Vec<&'a [i64]>>,
}

#[derive(Serialize)]
struct HistogramReport<'a> {
    seed: u64,
    target: i64,
    input: &'a Histogram,
    output: &'a [i64],
}

/// Writes sampled tables in the requested format.
///
/// The text form appends row sums as a last column and column sums as a
/// last row so margins can be checked by eye.
pub fn write_tables<W: Write>(
    out: &mut W,
    format: OutputFormat,
    margins: &Margins,
    seed: i64,
    tables: &[ContingencyTable],
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for (index, table) in tables.iter().enumerate() {
                if tables.len() > 1 {
                    writeln!(out, "Sample {}", index + 1)?;
                }
                let body: Vec<Vec<String>> = table
                    .iter_rows()
                    .zip(margins.row_sums())
                    .map(|(row, sum)| {
                        row.iter()
                            .chain(std::iter::once(sum))
                            .map(i64::to_string)
                            .collect()
                    })
                    .collect();
                let footer: Vec<String> = margins
                    .col_sums()
                    .iter()
                    .chain(std::iter::once(&margins.total()))
                    .map(i64::to_string)
                    .collect();
                render_box(out, None, &body, Some(footer.as_slice()))?;
            }
        }
        OutputFormat::Json => {
            let report = TableReport {
                seed,
                margins,
                tables: tables.iter().map(|t| t.iter_rows().collect()).collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            let mut header = vec!["sample".to_string(), "row".to_string()];
            header.extend((0..margins.cols()).map(|j| format!("col{}", j)));
            writer.write_record(&header)?;
            for (index, table) in tables.iter().enumerate() {
                for (i, row) in table.iter_rows().enumerate() {
                    let mut record = vec![index.to_string(), i.to_string()];
                    record.extend(row.iter().map(i64::to_string));
                    writer.write_record(&record)?;
                }
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Writes a resampled histogram next to its input counts.
pub fn write_histogram<W: Write>(
    out: &mut W,
    format: OutputFormat,
    input: &Histogram,
    target: i64,
    seed: u64,
    output: &[i64],
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let header = ["Bin", "Input", "Output"].map(String::from);
            let body: Vec<Vec<String>> = input
                .counts()
                .iter()
                .zip(output)
                .enumerate()
                .map(|(bin, (c, o))| vec![bin.to_string(), c.to_string(), o.to_string()])
                .collect();
            let footer = vec![
                "Total".to_string(),
                input.total().to_string(),
                output.iter().sum::<i64>().to_string(),
            ];
            render_box(out, Some(header.as_slice()), &body, Some(footer.as_slice()))?;
        }
        OutputFormat::Json => {
            let report = HistogramReport {
                seed,
                target,
                input,
                output,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["bin", "input", "output"])?;
            for (bin, (c, o)) in input.counts().iter().zip(output).enumerate() {
                writer.write_record([bin.to_string(), c.to_string(), o.to_string()])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_box<W: Write>(
    out: &mut W,
    header: Option<&[String]>,
    body: &[Vec<String>],
    footer: Option<&[String]>,
) -> Result<()> {
    let lines: Vec<&[String]> = header
        .into_iter()
        .chain(body.iter().map(Vec::as_slice))
        .chain(footer)
        .collect();
    let columns = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|j| {
            lines
                .iter()
                .filter_map(|l| l.get(j))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(j, w)| format!(" {:>w$} ", cells.get(j).map_or("", String::as_str), w = w))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    if let Some(header) = header {
        writeln!(out, "{}", line(header))?;
        writeln!(out, "{}", rule("├", "┼", "┤"))?;
    }
    for cells in body {
        writeln!(out, "{}", line(cells))?;
    }
    if let Some(footer) = footer {
        writeln!(out, "{}", rule("├", "┼", "┤"))?;
        writeln!(out, "{}", line(footer))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}
