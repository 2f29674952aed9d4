use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use noteesp::{NoteEsp, RenderConfig, Scene};

const USAGE: &str = "Usage: noteesp [--debug] <scene.yaml> [config.yaml] [output.svg]";

/// Paths and flags from the command line.
#[derive(Debug, PartialEq)]
struct CliArgs {
    debug: bool,
    scene: String,
    config: Option<String>,
    output: Option<String>,
}

/// Positional arguments: `<scene> [config] [output]`. With a single optional
/// argument its role comes from the extension; anything else is rejected.
fn parse_args(mut args: Vec<String>) -> Result<CliArgs, String> {
    // Parse flags
    let debug = if let Some(i) = args.iter().position(|a| a == "--debug") {
        args.remove(i);
        true
    } else {
        false
    };

    let mut args = args.into_iter();
    let (scene, config, output) = match (args.next(), args.next(), args.next(), args.next()) {
        (Some(scene), None, None, None) => (scene, None, None),
        (Some(scene), Some(extra), None, None) => {
            if has_extension(&extra, &["svg"]) {
                (scene, None, Some(extra))
            } else if has_extension(&extra, &["yaml", "yml"]) {
                (scene, Some(extra), None)
            } else {
                return Err(format!("Cannot tell whether '{}' is a config or an output file\n{}", extra, USAGE));
            }
        }
        (Some(scene), Some(config), Some(output), None) => (scene, Some(config), Some(output)),
        _ => return Err(USAGE.to_string()),
    };

    Ok(CliArgs {
        debug,
        scene,
        config,
        output,
    })
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match parse_args(env::args().skip(1).collect()) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };
    let scene_path = &cli.scene;
    let config_path = cli.config.as_ref();
    let output_path = cli.output.as_ref();

    let scene = match Scene::load(scene_path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error reading scene '{}': {}", scene_path, e);
            process::exit(1);
        }
    };

    let mut config = match config_path {
        Some(path) => match RenderConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading config '{}': {}", path, e);
                process::exit(1);
            }
        },
        None => RenderConfig::default(),
    };
    config.debug |= cli.debug;

    let esp = match NoteEsp::with_config(config) {
        Ok(esp) => Arc::new(esp),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let svg = match scene.replay(&esp).and_then(|frame| frame.to_svg()) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("Render error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &svg) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote {} notes to {}", esp.store().len(), path);
        }
        None => {
            println!("{}", svg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        parse_args(args.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_three_arguments_are_positional() {
        let cli = parse(&["scene.yaml", "cfg.yaml", "/tmp/out.png"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("cfg.yaml"));
        assert_eq!(cli.output.as_deref(), Some("/tmp/out.png"));

        let cli = parse(&["scene.yaml", "/tmp/a.svg", "/tmp/b.svg"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("/tmp/a.svg"));
        assert_eq!(cli.output.as_deref(), Some("/tmp/b.svg"));
    }

    #[test]
    fn test_single_optional_argument_by_extension() {
        let cli = parse(&["scene.yaml", "frame.SVG"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.output.as_deref(), Some("frame.SVG"));

        let cli = parse(&["scene.yaml", "render.yml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("render.yml"));
        assert_eq!(cli.output, None);

        assert!(parse(&["scene.yaml", "/tmp/out.png"]).is_err());
    }

    #[test]
    fn test_debug_flag_anywhere() {
        let cli = parse(&["scene.yaml", "--debug"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.scene, "scene.yaml");
        assert_eq!(cli.config, None);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        assert_eq!(parse(&[]), Err(USAGE.to_string()));
        assert_eq!(parse(&["--debug"]), Err(USAGE.to_string()));
        assert_eq!(parse(&["a.yaml", "b.yaml", "c.svg", "d.svg"]), Err(USAGE.to_string()));
    }
}
