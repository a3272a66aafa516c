use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;
use steric::{GeomCfg, OverlayOp};
use tracing_subscriber::fmt::SubscriberBuilder;

mod geojson;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Relate and overlay planar geometries given as tagged JSON")]
struct Cmd {
    /// Coordinate equality tolerance
    #[arg(long, global = true)]
    eps: Option<f64>,

    /// Disable snapping of B's vertices onto A's
    #[arg(long, global = true)]
    no_snap: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpArg {
    Union,
    Intersection,
    Difference,
    SymDifference,
}

impl From<OpArg> for OverlayOp {
    fn from(op: OpArg) -> Self {
        match op {
            OpArg::Union => OverlayOp::Union,
            OpArg::Intersection => OverlayOp::Intersection,
            OpArg::Difference => OverlayOp::Difference,
            OpArg::SymDifference => OverlayOp::SymDifference,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Print the DE-9IM of A against B and its catalogue entry
    Relate {
        /// Geometry JSON, or @path to a file holding it
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
    },
    /// Run a boolean overlay; with --out, also write a provenance sidecar
    Overlay {
        #[arg(long, value_enum)]
        op: OpArg,
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
        #[arg(long)]
        out: Option<String>,
    },
    /// Cut polygon A into parts along line B
    Dissolve {
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let mut cfg = GeomCfg::default();
    if let Some(eps) = cmd.eps {
        cfg.eps_equal = eps;
    }
    cfg.snap = !cmd.no_snap;
    match cmd.action {
        Action::Relate { a, b } => {
            let v = relate(&a, &b, cfg)?;
            println!("{}", serde_json::to_string_pretty(&v)?);
            Ok(())
        }
        Action::Overlay { op, a, b, out } => {
            let v = overlay(op.into(), &a, &b, out.as_deref(), cfg)?;
            if out.is_none() {
                println!("{}", serde_json::to_string_pretty(&v)?);
            }
            Ok(())
        }
        Action::Dissolve { a, b } => {
            let v = dissolve(&a, &b, cfg)?;
            println!("{}", serde_json::to_string_pretty(&v)?);
            Ok(())
        }
        Action::Report => report(),
    }
}

fn relate(a: &str, b: &str, cfg: GeomCfg) -> Result<serde_json::Value> {
    let (ga, gb) = (geojson::parse_arg(a)?, geojson::parse_arg(b)?);
    let r = steric::relate_report(&ga, &gb, cfg)?;
    tracing::info!(matrix = %r.matrix, pair = ?r.pair, "relate");
    Ok(serde_json::json!({
        "matrix": r.matrix.to_string(),
        "pair": format!("{:?}", r.pair),
        "entry": r.entry.map(|e| e.to_string()),
        "swapped": r.swapped,
        "shortcut": r.shortcut.map(|s| format!("{s:?}")),
    }))
}

fn overlay(
    op: OverlayOp,
    a: &str,
    b: &str,
    out: Option<&str>,
    cfg: GeomCfg,
) -> Result<serde_json::Value> {
    let (ga, gb) = (geojson::parse_arg(a)?, geojson::parse_arg(b)?);
    let result = steric::overlay(&ga, &gb, op, cfg)?;
    let value = geojson::to_value(&result)?;
    tracing::info!(%op, shape = ?result.shape(), area = result.area(), out = ?out, "overlay");

    if let Some(out) = out {
        let out_path = Path::new(out);
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(out_path, serde_json::to_vec_pretty(&value)?)?;
        let mut payload = provenance::Payload::new(
            op.name(),
            serde_json::json!({
                "eps_equal": cfg.eps_equal,
                "eps_link": cfg.eps_link,
                "snap": cfg.snap
            }),
        );
        payload.inputs = vec![geojson::to_value(&ga)?, geojson::to_value(&gb)?];
        provenance::write_sidecar(out_path, payload)?;
    }
    Ok(value)
}

fn dissolve(a: &str, b: &str, cfg: GeomCfg) -> Result<serde_json::Value> {
    let (ga, gb) = (geojson::parse_arg(a)?, geojson::parse_arg(b)?);
    let parts = steric::dissolve_with_cfg(&ga, &gb, cfg)?;
    tracing::info!(parts = parts.flatten().len(), "dissolve");
    geojson::to_value(&parts)
}

fn report() -> Result<()> {
    let cfg = GeomCfg::default();
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "steric_version": steric::VERSION,
        "params": {
            "eps_equal": cfg.eps_equal,
            "eps_link": cfg.eps_link,
            "max_link_attempts": cfg.max_link_attempts,
            "snap": cfg.snap
        },
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
