//! `sk samples` — list the sample edge lists compiled into the binary.
//!
//! Samples are small synthetic networks for exercising the pipeline without
//! an input file. Every command that accepts an input also accepts
//! `--sample NAME` in its place.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, render};

// ---------------------------------------------------------------------------
// Embedded data
// ---------------------------------------------------------------------------

const TRIANGLE: &str = "source,target\n\
                        a,b\n\
                        b,c\n\
                        c,a\n";

const STAR: &str = "source,target\n\
                    hub,n1\n\
                    hub,n2\n\
                    hub,n3\n\
                    hub,n4\n\
                    hub,n5\n";

const MUTUAL: &str = "source,target\n\
                      ana,bo\n\
                      bo,ana\n\
                      ana,cy\n\
                      cy,ana\n\
                      bo,cy\n";

const WEIGHTED: &str = "source,target,weight,kind\n\
                        n1,n2,5,road\n\
                        n1,n3,2,rail\n\
                        n2,n3,7,road\n\
                        n3,n4,1,ferry\n";

/// An embedded sample edge list.
#[derive(Debug)]
pub struct Sample {
    /// Lookup key for `--sample NAME`; doubles as the source name.
    pub name: &'static str,
    /// One-line description shown by `sk samples`.
    pub description: &'static str,
    /// The DSV body, header row included.
    pub data: &'static str,
}

/// All embedded samples, in listing order.
pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "triangle",
        description: "smallest cycle; feasible as directed or undirected",
        data: TRIANGLE,
    },
    Sample {
        name: "star",
        description: "hub with five spokes; the hub dominates the degrees",
        data: STAR,
    },
    Sample {
        name: "mutual",
        description: "reciprocal links; representable only as directed",
        data: MUTUAL,
    },
    Sample {
        name: "weighted",
        description: "edges carrying weight and kind attributes",
        data: WEIGHTED,
    },
];

/// Look up a sample by name.
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|sample| sample.name == name)
}

/// All sample names, for error messages.
pub fn names() -> Vec<&'static str> {
    SAMPLES.iter().map(|sample| sample.name).collect()
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Arguments for `sk samples`.
#[derive(Args, Debug, Default)]
pub struct SamplesArgs {}

#[derive(Debug, Serialize)]
struct SampleInfo {
    name: &'static str,
    rows: usize,
    description: &'static str,
}

/// Execute `sk samples`.
pub fn run_samples(_args: &SamplesArgs, output: OutputMode) -> anyhow::Result<()> {
    let infos: Vec<SampleInfo> = SAMPLES
        .iter()
        .map(|sample| SampleInfo {
            name: sample.name,
            rows: sample.data.lines().count().saturating_sub(1),
            description: sample.description,
        })
        .collect();
    render(output, &infos, |infos, w| render_samples_human(infos, w))
}

fn render_samples_human(infos: &[SampleInfo], w: &mut dyn Write) -> std::io::Result<()> {
    let width = infos.iter().map(|info| info.name.len()).max().unwrap_or(0);
    for info in infos {
        writeln!(
            w,
            "{:<width$}  {:>2} rows  {}",
            info.name, info.rows, info.description
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
