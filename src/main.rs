use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    config_dir: Option<PathBuf>,
    media_root: Option<PathBuf>,
    null_audio: bool,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => songdeck::config::config_root()?,
    };
    let config_dir = songdeck::config::ensure_config_dir(config_dir)?;
    let _log_guard = songdeck::logging::init(&config_dir)?;

    let media_root = match args.media_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    tracing::info!(
        config_dir = %config_dir.display(),
        media_root = %media_root.display(),
        "starting songdeck"
    );

    songdeck::app::run(songdeck::app::AppOptions {
        config_dir,
        media_root,
        null_audio: args.null_audio,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--config-dir" => {
                index += 1;
                out.config_dir = Some(path_value(&args, index, "--config-dir")?);
            }
            "--media-root" => {
                index += 1;
                out.media_root = Some(path_value(&args, index, "--media-root")?);
            }
            "--null-audio" => out.null_audio = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn path_value(args: &[String], index: usize, flag: &str) -> anyhow::Result<PathBuf> {
    let Some(value) = args.get(index) else {
        anyhow::bail!("{flag} requires a directory");
    };
    if value.trim().is_empty() {
        anyhow::bail!("{flag} cannot be empty");
    }
    Ok(PathBuf::from(value.trim()))
}

fn print_help() {
    println!("songdeck");
    println!("  --config-dir <dir>  Where state, cards.json and the log live");
    println!("  --media-root <dir>  Directory containing songs/ (default: cwd)");
    println!("  --null-audio        Run without an audio device");
}
