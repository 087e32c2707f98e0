use super::CliError;
use anyhow::Context;
use focalmech_core::common::constants::{DEGRAD, RADDEG};
use focalmech_core::{Mat3, MomentTensor};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct AnglesArgs {
    /// Strike in degrees
    #[arg(long, allow_hyphen_values = true)]
    strike: f64,

    /// Dip in degrees
    #[arg(long, allow_hyphen_values = true)]
    dip: f64,

    /// Rake in degrees
    #[arg(long, allow_hyphen_values = true)]
    rake: f64,

    /// Scalar moment in newton meters
    #[arg(long, default_value_t = 1.0)]
    moment: f64,

    #[command(flatten)]
    output: OutputFlags,
}

#[derive(clap::Args)]
pub(super) struct TensorArgs {
    /// Mnn component (north-north)
    #[arg(long, allow_hyphen_values = true)]
    mnn: f64,

    /// Mee component (east-east)
    #[arg(long, allow_hyphen_values = true)]
    mee: f64,

    /// Mdd component (down-down)
    #[arg(long, allow_hyphen_values = true)]
    mdd: f64,

    /// Mne component (north-east)
    #[arg(long, allow_hyphen_values = true)]
    mne: f64,

    /// Mnd component (north-down)
    #[arg(long, allow_hyphen_values = true)]
    mnd: f64,

    /// Med component (east-down)
    #[arg(long, allow_hyphen_values = true)]
    med: f64,

    #[command(flatten)]
    output: OutputFlags,
}

#[derive(clap::Args, Default)]
pub(super) struct OutputFlags {
    /// Render the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Write the JSON report to this path as well
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MechanismReport {
    scalar_moment: f64,
    moment_magnitude: f64,
    tensor: TensorComponents,
    fault_planes: [FaultPlaneReport; 2],
}

#[derive(Debug, Serialize)]
struct TensorComponents {
    mnn: f64,
    mee: f64,
    mdd: f64,
    mne: f64,
    mnd: f64,
    med: f64,
}

#[derive(Debug, Serialize)]
struct FaultPlaneReport {
    strike_deg: f64,
    dip_deg: f64,
    rake_deg: f64,
}

impl MechanismReport {
    fn from_tensor(tensor: &MomentTensor) -> Self {
        let m = tensor.m();
        let fault_planes = tensor.both_strike_dip_rake().map(|solution| {
            let degrees = solution.in_degrees();
            FaultPlaneReport {
                strike_deg: degrees.strike,
                dip_deg: degrees.dip,
                rake_deg: degrees.rake,
            }
        });

        Self {
            scalar_moment: tensor.scalar_moment(),
            moment_magnitude: tensor.moment_magnitude(),
            tensor: TensorComponents {
                mnn: m[(0, 0)],
                mee: m[(1, 1)],
                mdd: m[(2, 2)],
                mne: m[(0, 1)],
                mnd: m[(0, 2)],
                med: m[(1, 2)],
            },
            fault_planes,
        }
    }
}

pub(super) fn run_angles_command(args: AnglesArgs) -> Result<i32, CliError> {
    tracing::debug!(
        strike = args.strike,
        dip = args.dip,
        rake = args.rake,
        moment = args.moment,
        "building mechanism from fault-plane angles"
    );
    let tensor = MomentTensor::from_angles(
        args.strike * DEGRAD,
        args.dip * DEGRAD,
        args.rake * DEGRAD,
        args.moment,
    )?;
    emit_report(&tensor, &args.output)
}

pub(super) fn run_tensor_command(args: TensorArgs) -> Result<i32, CliError> {
    tracing::debug!(
        mnn = args.mnn,
        mee = args.mee,
        mdd = args.mdd,
        "building mechanism from tensor components"
    );
    let m = Mat3::new(
        args.mnn, args.mne, args.mnd, args.mne, args.mee, args.med, args.mnd, args.med, args.mdd,
    );
    let tensor = MomentTensor::from_matrix(&m)?;
    let planes = tensor.both_strike_dip_rake();
    tracing::debug!(
        strike_deg = planes[0].strike * RADDEG,
        dip_deg = planes[0].dip * RADDEG,
        "resolved first nodal plane"
    );
    emit_report(&tensor, &args.output)
}

fn emit_report(tensor: &MomentTensor, output: &OutputFlags) -> Result<i32, CliError> {
    let report = MechanismReport::from_tensor(tensor);

    if output.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to render JSON report")?;
        println!("{rendered}");
    } else {
        print!("{tensor}");
    }

    if let Some(path) = &output.output {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to render JSON report")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create report directory '{}'", parent.display())
                })?;
            }
        }
        fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write report to '{}'", path.display()))?;
    }

    Ok(0)
}
