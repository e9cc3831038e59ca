use std::io::Write;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use postedit::cli::{action_listing, CliArgs, ImageSpec, StartupConfig};
use postedit::config::EditorConfig;
use postedit::image::ImageFile;
use postedit::messages::{AppMsg, EditorMsg, ImageMsg, Msg};
use postedit::model::EditorSurface;
use postedit::runtime::{Runtime, Services};

/// Slack on top of the collaborator timeout before the CLI gives up
const IDLE_GRACE: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    postedit::tracing::init();

    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    if startup.list_actions {
        print!("{}", action_listing());
        return Ok(());
    }

    let config = match &startup.config_path {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };

    let initial = match &startup.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => String::new(),
    };

    let services = Services::from_config(&config)?;
    let wait = config.collaborator_timeout() + IDLE_GRACE;
    let mut runtime = Runtime::new(EditorSurface::new(&initial, config), services);

    run(&mut runtime, &startup, wait)?;

    let surface = runtime.into_model();
    write_output(&startup, surface.content())
}

fn run(runtime: &mut Runtime, startup: &StartupConfig, wait: Duration) -> Result<()> {
    if let Some((start, end)) = startup.selection {
        runtime.dispatch(Msg::Editor(EditorMsg::SetSelection { start, end }));
    }

    for spec in &startup.actions {
        for msg in spec.to_msgs() {
            runtime.dispatch(msg);
        }
        runtime.run_until_idle(wait)?;
    }

    if let Some(image) = &startup.image {
        for msg in image.prepare_msgs() {
            runtime.dispatch(msg);
        }
        let submit = match image {
            ImageSpec::Upload { path, .. } => {
                let file = ImageFile::from_path(path)
                    .with_context(|| format!("Failed to read image {}", path.display()))?;
                ImageMsg::SubmitUpload(file)
            }
            ImageSpec::Generate { .. } => ImageMsg::SubmitGeneration,
        };
        runtime.dispatch(Msg::Image(submit));
        runtime.run_until_idle(wait)?;

        if let Some(error) = runtime.model().image.error() {
            bail!("Image not inserted: {}", error);
        }
    }

    if let Some(save) = &startup.save {
        runtime.dispatch(Msg::App(AppMsg::SavePost {
            title: save.title.clone(),
            excerpt: save.excerpt.clone(),
        }));
        runtime.run_until_idle(wait)?;

        let ui = &runtime.model().ui;
        match &ui.last_saved {
            Some(location) => eprintln!("Saved post to {}", location),
            None => bail!(
                "{}",
                ui.notice_text().unwrap_or("Post was not saved")
            ),
        }
    }

    Ok(())
}

fn write_output(startup: &StartupConfig, content: &str) -> Result<()> {
    match &startup.output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}
