//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::DocumentService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{
    Attributes, Children, Class, Element, ElementDocument, ElementNode, Identity, Text,
};
use crate::infrastructure::RealFileSystem;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    debug!("settings: {:?}", settings);
    let service = DocumentService::new(Arc::new(RealFileSystem), settings);

    match command {
        Commands::Tree { file } => _tree(&service, file),
        Commands::Find { file, id } => _find(&service, file, id),
        Commands::Children { file, id, ordered } => {
            _children(&service, file, id.as_deref(), *ordered)
        }
        Commands::ByType {
            file,
            content_type,
            id,
        } => _by_type(&service, file, content_type, id.as_deref()),
        Commands::Attrs { file, id } => _attrs(&service, file, id.as_deref()),
        Commands::Export { file, output: target } => _export(&service, file, target.as_deref()),
        Commands::Config { command } => _config(settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_element(element: &ElementNode) {
    if element.text().is_empty() {
        output::info(element);
    } else {
        output::info(&format!("{}\t{}", element, element.text()));
    }
}

#[instrument(skip(service))]
fn _tree(service: &DocumentService, file: &Path) -> CliResult<()> {
    let root = service.load(file)?;
    output::info(&root.to_tree_string());
    Ok(())
}

#[instrument(skip(service))]
fn _find(service: &DocumentService, file: &Path, id: &str) -> CliResult<()> {
    let root = service.load(file)?;
    let element = service.select(&root, Some(id))?;
    print_element(element);
    if !element.attribute_map().is_empty() {
        output::detail(&element.attributes());
    }
    if !element.class().is_empty() {
        output::detail(&format!("class=\"{}\"", element.class()));
    }
    Ok(())
}

#[instrument(skip(service))]
fn _children(
    service: &DocumentService,
    file: &Path,
    id: Option<&str>,
    ordered: bool,
) -> CliResult<()> {
    let root = service.load(file)?;
    let parent = service.select(&root, id)?;
    let children = if ordered {
        parent.children_by_order()
    } else {
        parent.children()
    };
    output::header(&format!("{} ({} children)", parent, parent.child_count()));
    for child in children {
        print_element(child);
    }
    Ok(())
}

#[instrument(skip(service))]
fn _by_type(
    service: &DocumentService,
    file: &Path,
    content_type: &str,
    id: Option<&str>,
) -> CliResult<()> {
    if content_type.trim().is_empty() {
        return Err(CliError::InvalidArgs("content type must not be empty".to_string()));
    }
    let root = service.load(file)?;
    let parent = service.select(&root, id)?;
    let matches = parent.get_content_by_type(content_type);
    if matches.is_empty() {
        output::warning(&format!("no {} children under {}", content_type, parent.id()));
    }
    for child in matches {
        print_element(child);
    }
    Ok(())
}

#[instrument(skip(service))]
fn _attrs(service: &DocumentService, file: &Path, id: Option<&str>) -> CliResult<()> {
    let root = service.load(file)?;
    let element = service.select(&root, id)?;
    output::info(&element.attributes());
    Ok(())
}

#[instrument(skip(service))]
fn _export(service: &DocumentService, file: &Path, target: Option<&Path>) -> CliResult<()> {
    let root = service.load(file)?;
    match target {
        Some(target) => {
            service.save(&root, target)?;
            output::action("Exported", &target.display());
        }
        None => output::info(&ElementDocument::from_element(&root).to_json()?),
    }
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "" } else { " (not found)" };
                output::action("global", &format!("{}{}", path.display(), state));
            }
            None => output::warning("cannot determine config directory"),
        },
        ConfigCommands::Templates => {
            for template in settings.discover_templates()? {
                output::info(&template.display());
            }
        }
    }
    Ok(())
}
