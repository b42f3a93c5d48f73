//! `overview_viewer [config.toml] [--windowed]`
//!
//! Without a config path the bundled demo scene is used.  Headless runs
//! simulate the configured number of frames with the scripted input and log
//! where everything ended up.

use std::path::PathBuf;

use anyhow::Context as _;
use log::info;
use overview_app::{logger, App, AppConfig};

const DEMO_SCENE: &str = include_str!("../scenes/demo.toml");

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    windowed: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        for arg in args {
            match arg.as_str() {
                "--windowed" | "-w" => parsed.windowed = true,
                flag if flag.starts_with('-') => anyhow::bail!(
                    "unknown flag `{flag}`\nusage: overview_viewer [config.toml] [--windowed]"
                ),
                path => {
                    if parsed.config.is_some() {
                        anyhow::bail!("only one config file may be given");
                    }
                    parsed.config = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }
}

fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading scene {}", path.display())),
        None => AppConfig::from_toml_str(DEMO_SCENE).context("parsing bundled demo scene"),
    }
}

fn report(app: &App) {
    let world = app.runner().world();
    if let Some(cam) = world.main_camera() {
        if let (Some(t), Some(lens)) = (world.transform(cam), world.lens(cam)) {
            let (yaw, pitch) = t.yaw_pitch();
            info!(
                "camera: pos {:?} yaw {:.1} pitch {:.1} fov {:.1}",
                t.position, yaw, pitch, lens.fov
            );
        }
    }
    for element in world.iter() {
        info!("{:>10}: {:?}", element.name, element.transform.position);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let config = load_config(&args)?;
    logger::init(&config.log_level).context("installing logger")?;

    let mut app = App::from_config(config).context("building scene")?;
    if args.windowed {
        app.run_windowed().context("running window")?;
    } else {
        app.run_headless();
        report(&app);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_path_and_flag() {
        let parsed = args(&["scene.toml", "--windowed"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("scene.toml")));
        assert!(parsed.windowed);
        assert_eq!(args(&[]).unwrap(), Args::default());
        assert!(args(&["--fast"]).is_err());
        assert!(args(&["a.toml", "b.toml"]).is_err());
    }

    #[test]
    fn demo_scene_builds_and_runs() {
        let config = load_config(&Args::default()).unwrap();
        assert_eq!(config.entities.len(), 4);
        let mut app = App::from_config(config).unwrap();
        assert_eq!(app.runner().behavior_count(), 3);
        app.run_headless();

        let world = app.runner().world();
        let mover = world.find_by_name("Mover").unwrap();
        let goal = world.find_by_name("Goal").unwrap();
        assert_eq!(world.position(mover), world.position(goal));
    }
}
