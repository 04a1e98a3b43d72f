use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Render gossip propagation rounds over a graph as a looping animated GIF.
#[derive(Parser, Debug)]
#[command(name = "gossip-viz", version)]
struct Cli {
    /// Input graph in node-link JSON form.
    #[arg(long)]
    json: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    gif: PathBuf,

    /// How long each frame is shown, in milliseconds (a multiple of 10).
    #[arg(long, default_value_t = 1000)]
    frame_ms: u32,

    /// Radius of every node marker, in pixels.
    #[arg(long)]
    node_radius: Option<f64>,

    /// Minimum gap between two node markers, in pixels.
    #[arg(long)]
    separation: Option<f64>,

    /// Force simulation steps.
    #[arg(long)]
    iterations: Option<u32>,

    /// Fill of nodes not yet reached (#RRGGBB or #RRGGBBAA).
    #[arg(long)]
    base_color: Option<gossip_viz::Rgba8>,

    /// Fill of nodes already reached (#RRGGBB or #RRGGBBAA).
    #[arg(long)]
    highlight_color: Option<gossip_viz::Rgba8>,

    /// Canvas background (#RRGGBB).
    #[arg(long)]
    background: Option<gossip_viz::Rgba8>,

    /// Upper bound for either canvas side, in pixels.
    #[arg(long)]
    max_side: Option<u32>,

    /// Parent directory for intermediate frames.
    #[arg(long, env = "GOSSIP_VIZ_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,
}

impl Cli {
    fn visualize_opts(&self) -> gossip_viz::VisualizeOpts {
        let mut opts = gossip_viz::VisualizeOpts {
            frame_delay_ms: self.frame_ms,
            ..Default::default()
        };
        if let Some(r) = self.node_radius {
            opts.layout.node_radius = r;
        }
        if let Some(s) = self.separation {
            opts.layout.separation = s;
        }
        if let Some(n) = self.iterations {
            opts.layout.iterations = n;
        }
        if let Some(m) = self.max_side {
            opts.layout.max_side = m;
        }
        if let Some(c) = self.base_color {
            opts.style.base_fill = c;
        }
        if let Some(c) = self.highlight_color {
            opts.style.highlight_fill = c;
        }
        if let Some(c) = self.background {
            opts.style.background = c;
        }
        opts.scratch.root = self.scratch_dir.clone();
        opts
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let opts = cli.visualize_opts();

    let stats = gossip_viz::visualize_path(&cli.json, &cli.gif, &opts, &mut |event| match event {
        gossip_viz::PipelineEvent::FrameStored { path, .. } => {
            println!("Wrote intermediate step to {}", path.display());
        }
        gossip_viz::PipelineEvent::AnimationWritten { path } => {
            println!("Wrote gif to {}", path.display());
        }
    })
    .with_context(|| format!("visualize '{}'", cli.json.display()))?;

    tracing::info!(
        frames = stats.frames,
        width = stats.width,
        height = stats.height,
        "done"
    );
    Ok(())
}
