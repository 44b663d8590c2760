//! CLI route: one handler per command. Handlers build the wizard from configuration and
//! hand results to presentation.

use super::parse::Commands;
use super::presentation::{
    format_generation_summary, format_init_outcome, format_init_preview, format_snapshot,
    GenerationSummary, ItemDecision,
};
use crate::config::{ConfigLoader, WizardConfig};
use crate::error::WizardError;
use crate::init;
use crate::platform::DirsLocator;
use crate::prompt::{DialoguerPrompt, NonInteractivePrompt, UserPrompt};
use crate::settings::{ConfigSettingsSource, SettingsSource};
use crate::snapshot::ResolvedDir;
use crate::wizard::{GenerationWizard, TemplateWizard};
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type CliWizard = TemplateWizard<DirsLocator, Box<dyn UserPrompt>>;

/// Everything a command needs, loaded once per invocation.
pub struct RunContext {
    workspace: PathBuf,
    config_file: Option<PathBuf>,
    config: WizardConfig,
    non_interactive: bool,
}

impl RunContext {
    pub fn new(
        workspace: PathBuf,
        config_file: Option<PathBuf>,
        non_interactive: bool,
    ) -> Result<Self, WizardError> {
        let config = match &config_file {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace)?,
        };
        config.validate().map_err(|errors| {
            WizardError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;

        Ok(Self {
            workspace,
            config_file,
            config,
            non_interactive,
        })
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, WizardError> {
        match command {
            Commands::Resolve { format } => self.handle_resolve(format),
            Commands::Generate {
                project,
                items,
                format,
            } => self.handle_generate(project, items, format),
            Commands::Init { force, list } => self.handle_init(*force, *list),
        }
    }

    fn settings_source(&self) -> ConfigSettingsSource {
        match &self.config_file {
            Some(path) => ConfigSettingsSource::from_file(path),
            None => ConfigSettingsSource::for_workspace(&self.workspace),
        }
    }

    fn prompt(&self) -> Box<dyn UserPrompt> {
        if self.non_interactive || !std::io::stdin().is_terminal() {
            debug!("Using non-interactive prompt");
            Box::new(NonInteractivePrompt)
        } else {
            Box::new(DialoguerPrompt)
        }
    }

    fn wizard(&self) -> CliWizard {
        TemplateWizard::new(DirsLocator::from_config(&self.config.platform), self.prompt())
    }

    fn handle_resolve(&self, format: &str) -> Result<String, WizardError> {
        let settings = self.settings_source();
        let mut wizard = self.wizard();
        let snapshot = wizard.resolve(&settings)?.clone();
        wizard.run_finished();
        format_snapshot(&snapshot, format)
    }

    fn handle_generate(
        &self,
        project: &Path,
        items: &[String],
        format: &str,
    ) -> Result<String, WizardError> {
        let project_root = ResolvedDir::new(project)?;
        let settings = self.settings_source();
        let mut wizard = self.wizard();

        let result = run_generation(&mut wizard, &settings, project_root.as_path(), items);
        wizard.run_finished();
        let summary = result?;

        info!(
            project = %project_root,
            items = summary.items.len(),
            "Generation run completed"
        );
        format_generation_summary(&summary, format)
    }

    fn handle_init(&self, force: bool, list: bool) -> Result<String, WizardError> {
        if list {
            let (path, exists) = init::preview()?;
            return Ok(format_init_preview(&path, exists));
        }
        let outcome = init::initialize_config(force)?;
        Ok(format_init_outcome(&outcome))
    }
}

/// Drive the wizard callbacks in host order for one project.
fn run_generation(
    wizard: &mut CliWizard,
    settings: &dyn SettingsSource,
    project_root: &Path,
    items: &[String],
) -> Result<GenerationSummary, WizardError> {
    let mut replacements = HashMap::new();
    wizard.run_started(settings, &mut replacements)?;
    debug!(keys = replacements.len(), "Replacement map populated");

    let decisions = items
        .iter()
        .map(|name| {
            let included = wizard.should_add_project_item(name);
            if included {
                let path = project_root.join(name);
                wizard.before_opening_file(&path);
                wizard.project_item_finished_generating(&path);
            }
            ItemDecision {
                name: name.clone(),
                included,
            }
        })
        .collect();

    wizard.project_finished_generating(project_root)?;

    let snapshot = wizard.snapshot().cloned().ok_or_else(|| {
        WizardError::ContractViolation("snapshot vanished during generation".to_string())
    })?;
    let sync = wizard.last_sync().cloned().ok_or_else(|| {
        WizardError::ContractViolation("cache file sync produced no report".to_string())
    })?;

    Ok(GenerationSummary {
        snapshot,
        items: decisions,
        sync,
    })
}
