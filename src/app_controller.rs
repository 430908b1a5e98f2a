use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::catalog::{render_mapping, CatalogScanner, FileJournal, RunStats};
use crate::catalog::scanner::progress_percent;
use crate::errors::AppError;
use crate::file_utils::{CatalogFile, CatalogPaths, FileManager};
use crate::language_utils;
use crate::translation::TranslationGateway;

// @module: Application controller for catalog translation

/// What one processed catalog produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub paths: CatalogPaths,
    pub stats: RunStats,
    pub duration: Duration,
}

/// Main application controller for catalog translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate one catalog given on the command line
    pub async fn run(&self, input_file: PathBuf, force_overwrite: bool) -> Result<RunReport, AppError> {
        if !FileManager::file_exists(&input_file) {
            return Err(AppError::InputNotFound(input_file.display().to_string()));
        }

        let paths = CatalogPaths::derive_now(&input_file, &self.config.output);
        if paths.translated.exists() && !force_overwrite {
            return Err(AppError::OutputExists(paths.translated.display().to_string()));
        }

        self.process_catalog(paths).await
    }

    /// List catalogs in `dir`, ask which one and which languages, then translate it
    pub async fn run_interactive(&mut self, dir: &Path) -> Result<RunReport, AppError> {
        let files = FileManager::find_catalog_files(dir, &self.config.output.extension)?;
        if files.is_empty() {
            return Err(AppError::NoCatalogFiles(dir.display().to_string()));
        }

        println!("\nFound {} .{} file(s):", files.len(), self.config.output.extension);
        for (number, file) in files.iter().enumerate() {
            println!("[{}] {} ({} KB)", number + 1, file.display_name(), file.size_kb());
        }

        let answer = prompt(&format!("\nSelect file [1-{}]: ", files.len())).await?;
        let selected = select_catalog(&files, &answer)?.path.clone();

        let answer = prompt(&format!("Source language (default: {}): ", self.config.source_language)).await?;
        let source_language = language_or_default(&answer, &self.config.source_language);
        let answer = prompt(&format!("Target language (default: {}): ", self.config.target_language)).await?;
        let target_language = language_or_default(&answer, &self.config.target_language);

        language_utils::validate_source_language(&source_language)
            .and_then(|_| language_utils::validate_language_code(&target_language))
            .map_err(|e| AppError::Config(e.to_string()))?;
        self.config.source_language = source_language;
        self.config.target_language = target_language;

        info!(
            "Start: {} -> {}",
            language_utils::describe_language(&self.config.source_language),
            language_utils::describe_language(&self.config.target_language)
        );
        let paths = CatalogPaths::derive_now(&selected, &self.config.output);
        self.process_catalog(paths).await
    }

    /// Translate `paths.input` and write the catalog, log and mapping files
    async fn process_catalog(&self, paths: CatalogPaths) -> Result<RunReport, AppError> {
        let start_time = Instant::now();
        info!("Processing: {}", paths.input.display());

        if !FileManager::file_exists(&paths.input) {
            return Err(AppError::InputNotFound(paths.input.display().to_string()));
        }
        let content = FileManager::read_to_string(&paths.input)?;

        let mut journal = FileJournal::create(
            &paths.log,
            &paths.input,
            &self.config.source_language,
            &self.config.target_language,
        )
        .map_err(|e| AppError::File(format!("Failed to create log file {}: {}", paths.log.display(), e)))?;

        let gateway = TranslationGateway::from_config(&self.config)?;
        info!(
            "Translating with {} ({}): {} -> {}",
            self.config.translation.provider.display_name(),
            gateway.provider_name(),
            language_utils::describe_language(gateway.source_language()),
            language_utils::describe_language(gateway.target_language())
        );

        let progress_bar = ProgressBar::new(0);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} entries {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let outcome = CatalogScanner::new(&gateway)
            .translate_catalog(&content, &mut journal, move |done, total| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
                pb.set_message(format!("Translating... {}/{} ({}%)", done, total, progress_percent(done, total)));
            })
            .await?;
        progress_bar.finish_and_clear();

        FileManager::write_to_file(&paths.translated, &outcome.content())?;
        FileManager::write_to_file(&paths.mapping, &render_mapping(&outcome.tables))?;

        let duration = start_time.elapsed();
        if outcome.stats.failed > 0 {
            warn!("{} entries could not be translated, see {}", outcome.stats.failed, paths.log.display());
        }
        info!("Output: {}", paths.translated.display());
        info!("Log: {}", journal.path().display());
        info!("Mapping: {}", paths.mapping.display());
        info!("{} in {}", outcome.stats, Self::format_duration(duration));

        Ok(RunReport {
            paths,
            stats: outcome.stats,
            duration,
        })
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Resolve a 1-based menu answer to one of `files`
pub fn select_catalog<'a>(files: &'a [CatalogFile], answer: &str) -> Result<&'a CatalogFile, AppError> {
    let choice: usize = answer
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidSelection(answer.trim().to_string()))?;

    choice
        .checked_sub(1)
        .and_then(|index| files.get(index))
        .ok_or_else(|| AppError::InvalidSelection(choice.to_string()))
}

/// A blank answer keeps the default
pub fn language_or_default(answer: &str, default: &str) -> String {
    match answer.trim() {
        "" => default.to_string(),
        language => language.to_string(),
    }
}

/// Print `message` and read one line from stdin. Ctrl-C or end of input cancels.
async fn prompt(message: &str) -> Result<String, AppError> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let read_line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|bytes| (bytes, line))
    });

    tokio::select! {
        result = read_line => match result {
            Ok(Ok((0, _))) => Err(AppError::Cancelled),
            Ok(Ok((_, line))) => Ok(line.trim().to_string()),
            Ok(Err(e)) => Err(e.into()),
            Err(e) => Err(AppError::Unknown(e.to_string())),
        },
        _ = tokio::signal::ctrl_c() => Err(AppError::Cancelled),
    }
}
