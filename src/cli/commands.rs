//! Command dispatch

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{ExportService, ExportTarget};
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::output;
use crate::cli::tree_view::TreeNodeConvert;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{HierarchyNode, ValidationMode};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    match &cli.command {
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => cmd_config(command, &project_dir),
        Some(Commands::Export {
            input,
            output_dir,
            file,
            stdout,
            no_bom,
        }) => {
            let container = container(&project_dir, *no_bom)?;
            let target = match (output_dir, file) {
                (_, Some(f)) => Some(ExportTarget::File(f.clone())),
                (Some(d), None) => Some(ExportTarget::Directory(d.clone())),
                (None, None) => None,
            };
            cmd_export(&container, input, target, *stdout)
        }
        Some(Commands::Rows { input }) => {
            let container = container(&project_dir, false)?;
            cmd_rows(&container, input)
        }
        Some(Commands::Tree { input, values }) => {
            let container = container(&project_dir, false)?;
            cmd_tree(&container, input, *values)
        }
    }
}

fn resolve_project_dir(arg: Option<&Path>) -> CliResult<PathBuf> {
    match arg {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("determine current directory", e))),
    }
}

fn container(project_dir: &Path, no_bom: bool) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(Some(project_dir))?;
    if no_bom {
        settings.export.bom = false;
    }
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

fn service_for(container: &ServiceContainer, input: &InputArgs) -> ExportService {
    if input.lenient {
        container.export_service_with_mode(ValidationMode::Lenient)
    } else {
        container.export_service()
    }
}

/// Load the hierarchy from a file, or from stdin when the path is `-`.
fn load_input(service: &ExportService, input: &InputArgs) -> CliResult<HierarchyNode> {
    if input.input.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::Infra(InfraError::io("read stdin", e)))?;
        Ok(service.parse(&content)?)
    } else {
        Ok(service.load(&input.input)?)
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_export(
    container: &ServiceContainer,
    input: &InputArgs,
    target: Option<ExportTarget>,
    to_stdout: bool,
) -> CliResult<()> {
    let service = service_for(container, input);
    let root = load_input(&service, input)?;

    if root.is_leaf() {
        output::warning(&format!(
            "hierarchy '{}' has no topics, export contains only the header",
            root.name
        ));
    }

    if to_stdout {
        output::info(&service.render(&root));
        return Ok(());
    }

    let target = target.unwrap_or_else(|| service.default_target());
    let path = service.export(&root, target)?;
    output::action(
        "Exported",
        &format!("{} ({} rows)", path.display(), service.row_count(&root)),
    );
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_rows(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let service = service_for(container, input);
    let root = load_input(&service, input)?;
    output::info(&service.render(&root));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, input: &InputArgs, values: bool) -> CliResult<()> {
    let service = service_for(container, input);
    let root = load_input(&service, input)?;
    output::info(&root.to_tree_string(values));
    Ok(())
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(p) => output::detail(&format!("global: {}", p.display())),
                None => output::detail(&"global: <unavailable>"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CliError::Infra(InfraError::io(
                        format!("create {}", parent.display()),
                        e,
                    ))
                })?;
            }
            std::fs::write(&path, Settings::template()).map_err(|e| {
                CliError::Infra(InfraError::io(format!("write {}", path.display()), e))
            })?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
