use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use termcanvas::{
    CanvasClient, CanvasId, ClientOpts, Component, DEFAULT_SOCKET_DIR, Element, OutputFormat,
    RenderPipeline, RenderRequest,
};

#[derive(Parser, Debug)]
#[command(name = "termcanvas", version, about = "Drive terminal canvases and render components")]
struct Cli {
    /// Directory holding canvas sockets.
    #[arg(long, global = true, env = "TERMCANVAS_SOCKET_DIR", default_value = DEFAULT_SOCKET_DIR)]
    socket_dir: PathBuf,

    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a new configuration to a running canvas.
    Update(UpdateArgs),
    /// Print the current selection of a running canvas as JSON.
    Selection(FetchArgs),
    /// Print the current content of a running canvas as JSON.
    Content(FetchArgs),
    /// Render a built-in component to PNG or SVG.
    Render(RenderArgs),
    /// Render a JSON element tree to PNG or SVG.
    RenderTree(RenderTreeArgs),
}

#[derive(Parser, Debug)]
struct UpdateArgs {
    /// Canvas id.
    id: String,

    /// New canvas configuration (JSON).
    #[arg(long)]
    config: Option<String>,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Canvas id.
    id: String,

    /// How long to wait for the canvas to answer.
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Output file; `.svg` writes SVG, anything else PNG.
    #[arg(long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Component: card, badge or badges.
    component: String,

    #[command(flatten)]
    out: OutputArgs,

    /// Card title.
    #[arg(long)]
    title: Option<String>,

    /// Card description.
    #[arg(long)]
    description: Option<String>,

    /// Badge text.
    #[arg(long)]
    text: Option<String>,

    /// Component variant (default, dark, light, success, ...).
    #[arg(long)]
    variant: Option<String>,

    /// Extra props as a JSON object; overrides the flags above.
    #[arg(long)]
    props: Option<String>,
}

#[derive(Parser, Debug)]
struct RenderTreeArgs {
    /// Element tree JSON file.
    #[arg(long)]
    input: PathBuf,

    #[command(flatten)]
    out: OutputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Update(args) => block_on(cmd_update(&cli.socket_dir, args)),
        Command::Selection(args) => block_on(cmd_fetch(&cli.socket_dir, args, FetchKind::Selection)),
        Command::Content(args) => block_on(cmd_fetch(&cli.socket_dir, args, FetchKind::Content)),
        Command::Render(args) => cmd_render(args),
        Command::RenderTree(args) => cmd_render_tree(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn block_on<F: std::future::Future<Output = anyhow::Result<()>>>(fut: F) -> anyhow::Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?
        .block_on(fut)
}

fn client(socket_dir: &Path, timeout: Duration) -> CanvasClient {
    CanvasClient::new(ClientOpts {
        socket_dir: socket_dir.to_path_buf(),
        timeout,
    })
}

fn parse_json(label: &str, raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("parse {label} JSON"))
}

async fn cmd_update(socket_dir: &Path, args: UpdateArgs) -> anyhow::Result<()> {
    let id = CanvasId::new(args.id)?;
    let config = match args.config.as_deref() {
        Some(raw) => parse_json("--config", raw)?,
        None => Value::Object(Map::new()),
    };
    client(socket_dir, termcanvas::DEFAULT_TIMEOUT)
        .send_update(&id, config)
        .await
        .with_context(|| format!("send update to canvas '{id}'"))?;
    println!("Sent update to canvas '{id}'");
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum FetchKind {
    Selection,
    Content,
}

async fn cmd_fetch(socket_dir: &Path, args: FetchArgs, kind: FetchKind) -> anyhow::Result<()> {
    let id = CanvasId::new(args.id)?;
    let client = client(socket_dir, Duration::from_millis(args.timeout_ms));
    let (payload, what) = match kind {
        FetchKind::Selection => (client.fetch_selection(&id).await, "selection"),
        FetchKind::Content => (client.fetch_content(&id).await, "content"),
    };
    let payload = payload.with_context(|| format!("get {what} from canvas '{id}'"))?;
    println!("{}", serde_json::to_string(&payload.unwrap_or(Value::Null))?);
    Ok(())
}

/// Flags first, then `--props` on top.
fn component_props(component: Component, args: &RenderArgs) -> anyhow::Result<Value> {
    let mut props = Map::new();
    let variant = args.variant.clone().unwrap_or_else(|| "default".to_owned());
    match component {
        Component::Card => {
            let title = args.title.clone().unwrap_or_else(|| "Card Title".to_owned());
            props.insert("title".into(), title.into());
            if let Some(d) = &args.description {
                props.insert("description".into(), d.clone().into());
            }
            props.insert("variant".into(), variant.into());
        }
        Component::Badge => {
            let text = args.text.clone().unwrap_or_else(|| "Badge".to_owned());
            props.insert("text".into(), text.into());
            props.insert("variant".into(), variant.into());
        }
        Component::Badges => {}
    }

    if let Some(raw) = args.props.as_deref() {
        let Value::Object(extra) = parse_json("--props", raw)? else {
            anyhow::bail!("--props must be a JSON object");
        };
        props.extend(extra);
    }
    if let Some(children) = props.remove("children") {
        props.insert("text".into(), children);
    }
    Ok(Value::Object(props))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let component: Component = args.component.parse()?;
    let tree = component.build(component_props(component, &args)?)?;
    let format = render_tree(tree, &args.out)?;
    println!(
        "Rendered {component} to {} ({}x{} {})",
        args.out.output.display(),
        args.out.width,
        args.out.height,
        format.as_str()
    );
    Ok(())
}

fn cmd_render_tree(args: RenderTreeArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read element tree '{}'", args.input.display()))?;
    let tree = Element::from_json(parse_json("element tree", &raw)?)?;
    let format = render_tree(tree, &args.out)?;
    println!(
        "Rendered {} to {} ({}x{} {})",
        args.input.display(),
        args.out.output.display(),
        args.out.width,
        args.out.height,
        format.as_str()
    );
    Ok(())
}

fn render_tree(tree: Element, out: &OutputArgs) -> anyhow::Result<OutputFormat> {
    if let Some(parent) = out.output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let req = RenderRequest::new(tree, out.width, out.height, OutputFormat::from_path(&out.output))?;
    let format = RenderPipeline::default()
        .render_to_file(&req, &out.output)
        .with_context(|| format!("render '{}'", out.output.display()))?;
    Ok(format)
}
